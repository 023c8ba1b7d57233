use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::profiles::{
    completion::{compute_status, CompletionStatusMap},
    documents::{DocumentRecord, ReviewAction, ReviewSummary, UploadedDocument},
    experience::ExperienceRecord,
    model::UserRecord,
    navigation::{navigation_items, products_unlocked, NavigationItem},
    requirements::requirements_for,
};
use crate::storage::{load_or_empty, save_record, KeyValueStore, StorageKeys};

/// Everything the profile sidebar and review screens need for one user.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub user_id: String,
    pub status: CompletionStatusMap,
    pub missing_documents: Vec<&'static str>,
    pub missing_experience_fields: Vec<&'static str>,
    pub review: ReviewSummary,
    pub products_unlocked: bool,
    pub navigation: Vec<NavigationItem>,
}

/// Completion queries and document/experience writes over an injected store.
pub struct ProfileCompletionService<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> ProfileCompletionService<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn documents(&self, user_id: &str) -> Result<DocumentRecord> {
        load_or_empty(&self.store, &self.keys.documents(user_id))
    }

    /// The saved experience form, if one was stored and is readable.
    pub fn experience(&self, user: &UserRecord) -> Result<Option<ExperienceRecord>> {
        let key = self.keys.experience(user.user_type, &user.id);
        let Some(value) = self.store.get(&key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!(key = %key, error = %err, "ignoring unreadable experience record");
                Ok(None)
            }
        }
    }

    /// The user with any saved experience form folded into its profile.
    pub fn effective_user(&self, user: &UserRecord) -> Result<UserRecord> {
        let mut effective = user.clone();
        if let Some(record) = self.experience(user)? {
            record.apply_to_profile(user.user_type, &mut effective.user_profile);
        }
        Ok(effective)
    }

    pub fn status(&self, user: Option<&UserRecord>) -> Result<CompletionStatusMap> {
        let Some(user) = user else {
            return Ok(CompletionStatusMap::default());
        };
        let effective = self.effective_user(user)?;
        let documents = self.documents(&user.id)?;
        Ok(compute_status(Some(&effective), &documents))
    }

    pub fn navigation(&self, user: &UserRecord) -> Result<Vec<NavigationItem>> {
        let status = self.status(Some(user))?;
        Ok(navigation_items(user, &status))
    }

    pub fn report(&self, user: &UserRecord) -> Result<CompletionReport> {
        let effective = self.effective_user(user)?;
        let documents = self.documents(&user.id)?;
        let requirements = requirements_for(user.user_type, user.account_type);
        let status = compute_status(Some(&effective), &documents);
        Ok(CompletionReport {
            user_id: user.id.clone(),
            missing_documents: documents.missing(requirements.required_documents),
            missing_experience_fields: requirements
                .experience
                .missing_fields(&effective.user_profile),
            review: documents.summary(requirements.catalogue),
            products_unlocked: products_unlocked(user, &status),
            navigation: navigation_items(user, &status),
            status,
        })
    }

    pub fn record_upload(
        &mut self,
        user_id: &str,
        key: &str,
        name: &str,
        url: &str,
        mime_type: Option<String>,
    ) -> Result<UploadedDocument> {
        let document = UploadedDocument::pending(name, url, mime_type, Utc::now());
        let mut documents = self.documents(user_id)?;
        documents.record_upload(key, document.clone());
        self.save_documents(user_id, &documents)?;
        info!(user_id, key, "document uploaded");
        Ok(document)
    }

    /// Returns whether a document was stored under `key`.
    pub fn remove_document(&mut self, user_id: &str, key: &str) -> Result<bool> {
        let mut documents = self.documents(user_id)?;
        let removed = documents.remove(key).is_some();
        if removed {
            self.save_documents(user_id, &documents)?;
            info!(user_id, key, "document removed");
        }
        Ok(removed)
    }

    pub fn review_document(
        &mut self,
        user_id: &str,
        key: &str,
        action: &ReviewAction,
        reviewer: Option<&str>,
    ) -> Result<UploadedDocument> {
        let mut documents = self.documents(user_id)?;
        let reviewed = documents
            .review(key, action, reviewer, Utc::now())
            .with_context(|| format!("Review failed for user {user_id}"))?
            .clone();
        self.save_documents(user_id, &documents)?;
        info!(user_id, key, status = ?reviewed.status, "document reviewed");
        Ok(reviewed)
    }

    /// Validates and stores an experience form for the user.
    pub fn save_experience(&mut self, user: &UserRecord, record: &ExperienceRecord) -> Result<()> {
        record.validate(user.user_type)?;
        let key = self.keys.experience(user.user_type, &user.id);
        save_record(&mut self.store, &key, record)?;
        info!(user_id = %user.id, key = %key, "experience saved");
        Ok(())
    }

    fn save_documents(&mut self, user_id: &str, documents: &DocumentRecord) -> Result<()> {
        let key = self.keys.documents(user_id);
        save_record(&mut self.store, &key, documents)
    }
}
