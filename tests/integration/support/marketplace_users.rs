use marketplace_profiles::profiles::model::UserRecord;
use marketplace_profiles::service::ProfileCompletionService;
use marketplace_profiles::storage::{JsonFileStore, StorageKeys};
use serde_json::json;

use super::super::IntegrationHarness;

pub struct MarketplaceFixture {
    pub harness: IntegrationHarness,
    pub service: ProfileCompletionService<JsonFileStore>,
}

impl MarketplaceFixture {
    pub fn new() -> Self {
        let harness = IntegrationHarness::new();
        let service = ProfileCompletionService::new(
            JsonFileStore::new(harness.store_dir()),
            StorageKeys::default(),
        );
        Self { harness, service }
    }

    pub fn upload_all(&mut self, user_id: &str, keys: &[&str]) {
        for key in keys {
            self.service
                .record_upload(
                    user_id,
                    key,
                    &format!("{key}.pdf"),
                    &format!("https://files.example/{user_id}/{key}.pdf"),
                    Some("application/pdf".into()),
                )
                .expect("failed to record upload");
        }
    }
}

/// A fundi as returned by the accounts API right after signup.
pub fn signup_fundi(id: &str) -> UserRecord {
    serde_json::from_value(json!({
        "id": id,
        "userType": "FUNDI",
        "accountType": "INDIVIDUAL",
        "adminApproved": false,
        "userProfile": {}
    }))
    .expect("valid fundi record")
}

pub fn professional(id: &str) -> UserRecord {
    serde_json::from_value(json!({
        "id": id,
        "userType": "professional",
        "accountType": "individual",
        "userProfile": {
            "profession": "Quantity Surveyor",
            "professionalLevel": "Professional",
            "yearsOfExperience": "5-10 years",
            "professionalProjects": []
        }
    }))
    .expect("valid professional record")
}
