//! Completion status per profile section.
//!
//! [`compute_status`] is a pure function of the user record and the user's
//! uploaded documents. Nothing is cached; callers recompute whenever either
//! input changes (on load and after every store write).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::documents::DocumentRecord;
use super::model::UserRecord;
use super::requirements::requirements_for;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileSection {
    AccountInfo,
    Address,
    AccountUploads,
    Experience,
    Products,
    Activities,
}

impl ProfileSection {
    pub const ALL: [ProfileSection; 6] = [
        ProfileSection::AccountInfo,
        ProfileSection::Address,
        ProfileSection::AccountUploads,
        ProfileSection::Experience,
        ProfileSection::Products,
        ProfileSection::Activities,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ProfileSection::AccountInfo => "account-info",
            ProfileSection::Address => "address",
            ProfileSection::AccountUploads => "account-uploads",
            ProfileSection::Experience => "experience",
            ProfileSection::Products => "products",
            ProfileSection::Activities => "activities",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileSection::AccountInfo => "Account Info",
            ProfileSection::Address => "Address",
            ProfileSection::AccountUploads => "Account Uploads",
            ProfileSection::Experience => "Experience",
            ProfileSection::Products => "Products",
            ProfileSection::Activities => "Activities",
        }
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Complete,
    Incomplete,
}

impl CompletionStatus {
    pub fn from_complete(complete: bool) -> Self {
        if complete {
            CompletionStatus::Complete
        } else {
            CompletionStatus::Incomplete
        }
    }

    pub fn is_complete(self) -> bool {
        self == CompletionStatus::Complete
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionStatusMap(BTreeMap<ProfileSection, CompletionStatus>);

impl CompletionStatusMap {
    /// Sections absent from the map read as incomplete.
    pub fn get(&self, section: ProfileSection) -> CompletionStatus {
        self.0
            .get(&section)
            .copied()
            .unwrap_or(CompletionStatus::Incomplete)
    }

    pub fn is_complete(&self, section: ProfileSection) -> bool {
        self.get(section).is_complete()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileSection, CompletionStatus)> + '_ {
        self.0.iter().map(|(section, status)| (*section, *status))
    }

    fn set(&mut self, section: ProfileSection, complete: bool) {
        self.0
            .insert(section, CompletionStatus::from_complete(complete));
    }
}

impl Default for CompletionStatusMap {
    /// Status shown before a user record is available.
    fn default() -> Self {
        let mut map = CompletionStatusMap(BTreeMap::new());
        map.set(ProfileSection::AccountInfo, true);
        map.set(ProfileSection::Address, true);
        map.set(ProfileSection::AccountUploads, false);
        map.set(ProfileSection::Experience, false);
        map.set(ProfileSection::Products, false);
        map.set(ProfileSection::Activities, true);
        map
    }
}

pub fn compute_status(user: Option<&UserRecord>, documents: &DocumentRecord) -> CompletionStatusMap {
    let mut status = CompletionStatusMap::default();
    let Some(user) = user else {
        return status;
    };

    let requirements = requirements_for(user.user_type, user.account_type);
    let uploads_complete = documents.satisfies_all(requirements.required_documents);
    let experience_complete = requirements.experience.is_satisfied(&user.user_profile);

    status.set(ProfileSection::AccountUploads, uploads_complete);
    status.set(ProfileSection::Experience, experience_complete);
    tracing::debug!(
        user_id = %user.id,
        user_type = %user.user_type,
        uploads_complete,
        experience_complete,
        "computed profile completion"
    );
    status
}
