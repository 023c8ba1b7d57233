use std::fs;

use anyhow::Result;
use marketplace_profiles::profiles::completion::ProfileSection;
use marketplace_profiles::storage::{JsonFileStore, KeyValueStore};

use crate::support::marketplace_users::{signup_fundi, MarketplaceFixture};
use crate::IntegrationHarness;

#[test]
fn uploads_persist_as_json_files() -> Result<()> {
    let mut fixture = MarketplaceFixture::new();
    fixture.upload_all("701", &["kraPIN"]);

    let path = fixture.service.store().path_for("uploads_demo_701");
    let raw = fs::read_to_string(&path)?;
    assert!(raw.contains("\"kraPIN\""), "unexpected payload: {raw}");
    assert!(raw.contains("\"status\": \"pending\""), "unexpected payload: {raw}");

    // A second store over the same directory sees the same record.
    let reopened = JsonFileStore::new(fixture.harness.store_dir());
    assert!(reopened.get("uploads_demo_701")?.is_some());
    Ok(())
}

#[test]
fn corrupted_store_file_reads_as_missing() -> Result<()> {
    let mut fixture = MarketplaceFixture::new();
    let user = signup_fundi("702");
    fixture.upload_all("702", &["idFront", "idBack", "certificate", "kraPIN"]);
    assert!(fixture
        .service
        .status(Some(&user))?
        .is_complete(ProfileSection::AccountUploads));

    let path = fixture.service.store().path_for("uploads_demo_702");
    fs::write(&path, "{\"idFront\": ")?;
    let status = fixture.service.status(Some(&user))?;
    assert!(!status.is_complete(ProfileSection::AccountUploads));
    Ok(())
}

#[test]
fn store_creates_missing_root() -> Result<()> {
    let harness = IntegrationHarness::new();
    let root = harness.workspace_path().join("nested").join("store");
    let mut store = JsonFileStore::new(&root);
    store.set("fundi_experience_1", serde_json::json!({"grade": "G1"}))?;
    assert!(root.join("fundi_experience_1.json").exists());
    Ok(())
}
