use std::env;
use std::fs;

use anyhow::Result;
use marketplace_profiles::config::{config_file_path, load_or_default, save, AppConfig, HOME_ENV};

use crate::IntegrationHarness;

#[test]
fn config_defaults_then_saved_overrides() -> Result<()> {
    let harness = IntegrationHarness::new();
    env::set_var(HOME_ENV, harness.workspace_path());

    let defaults = load_or_default()?;
    assert_eq!(defaults, AppConfig::default());
    assert_eq!(defaults.store_path()?, harness.workspace_path().join("store"));

    let mut custom = defaults.clone();
    custom.storage.documents_prefix = "documents".into();
    custom.logging.filter = "warn".into();
    save(&custom)?;
    assert!(fs::read_to_string(config_file_path()?)?.contains("documents_prefix = \"documents\""));
    assert_eq!(load_or_default()?, custom);
    Ok(())
}
