//! Uploaded verification documents and their admin review state.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::model::is_present;
use super::requirements::{DocumentCategory, DocumentSpec};

const PENDING_REASON: &str = "Awaiting admin verification";
const APPROVED_REASON: &str = "Document verified and approved";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    ReuploadRequested,
}

impl DocumentStatus {
    /// Rejected and re-upload-requested documents do not count as uploaded.
    pub fn blocks_completion(self) -> bool {
        matches!(
            self,
            DocumentStatus::Rejected | DocumentStatus::ReuploadRequested
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
}

impl UploadedDocument {
    pub fn pending(
        name: impl Into<String>,
        url: impl Into<String>,
        mime_type: Option<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            mime_type,
            uploaded_at: Some(uploaded_at),
            status: Some(DocumentStatus::Pending),
            status_reason: Some(PENDING_REASON.to_string()),
            status_date: None,
            reviewed_by: None,
        }
    }

    pub fn effective_status(&self) -> DocumentStatus {
        self.status.unwrap_or_default()
    }
}

/// Accepts RFC 3339 timestamps and the `M/D/YYYY` dates the uploads tab
/// writes. Anything else reads as `None` rather than failing the entry.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::String(raw)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    Ok(NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc()))
}

fn text_field(map: &serde_json::Map<String, Value>, field: &str) -> String {
    map.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A stored document slot. Older uploads kept only the file URL, so bare
/// strings (and anything else the store hands back) are accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DocumentEntry {
    Uploaded(UploadedDocument),
    Url(String),
    Other(Value),
}

impl DocumentEntry {
    pub fn is_present(&self) -> bool {
        match self {
            DocumentEntry::Uploaded(doc) => {
                !doc.url.trim().is_empty() || !doc.name.trim().is_empty()
            }
            DocumentEntry::Url(url) => !url.trim().is_empty(),
            DocumentEntry::Other(value) => is_present(value),
        }
    }

    pub fn status(&self) -> Option<DocumentStatus> {
        match self {
            DocumentEntry::Uploaded(doc) => doc.status,
            DocumentEntry::Other(Value::Object(map)) => map
                .get("status")
                .and_then(|status| serde_json::from_value(status.clone()).ok()),
            _ => None,
        }
    }

    /// Present and not sent back by a reviewer.
    pub fn satisfies_requirement(&self) -> bool {
        self.is_present() && !self.status().is_some_and(DocumentStatus::blocks_completion)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject { reason: String },
    RequestReupload { reason: String },
}

impl ReviewAction {
    fn status(&self) -> DocumentStatus {
        match self {
            ReviewAction::Approve => DocumentStatus::Approved,
            ReviewAction::Reject { .. } => DocumentStatus::Rejected,
            ReviewAction::RequestReupload { .. } => DocumentStatus::ReuploadRequested,
        }
    }

    fn reason(&self) -> Result<String> {
        match self {
            ReviewAction::Approve => Ok(APPROVED_REASON.to_string()),
            ReviewAction::Reject { reason } if reason.trim().is_empty() => {
                bail!("Please provide a reason for rejection")
            }
            ReviewAction::RequestReupload { reason } if reason.trim().is_empty() => {
                bail!("Please provide a reason for re-upload request")
            }
            ReviewAction::Reject { reason } | ReviewAction::RequestReupload { reason } => {
                Ok(reason.trim().to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverallReviewStatus {
    Approved,
    Pending,
}

/// Counts shown above the uploads dashboard. Portfolio slots are optional
/// and never count toward the required totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewSummary {
    pub uploaded: usize,
    pub total_required: usize,
    pub required_uploaded: usize,
    pub approved: usize,
    pub overall: OverallReviewStatus,
}

/// Per-user document slots keyed by document key (`idFront`, `kraPIN`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DocumentRecord {
    entries: BTreeMap<String, DocumentEntry>,
}

impl DocumentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Looks up a slot by key, falling back to its `<key>Url` spelling.
    pub fn get(&self, key: &str) -> Option<&DocumentEntry> {
        self.entries
            .get(key)
            .or_else(|| self.entries.get(&format!("{key}Url")))
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: DocumentEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn remove(&mut self, key: &str) -> Option<DocumentEntry> {
        self.entries
            .remove(key)
            .or_else(|| self.entries.remove(&format!("{key}Url")))
    }

    pub fn is_satisfied(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(DocumentEntry::satisfies_requirement)
    }

    /// True when the list is non-empty and every key is satisfied.
    pub fn satisfies_all(&self, required: &[&str]) -> bool {
        !required.is_empty() && required.iter().all(|key| self.is_satisfied(key))
    }

    pub fn missing<'k>(&self, required: &[&'k str]) -> Vec<&'k str> {
        required
            .iter()
            .copied()
            .filter(|key| !self.is_satisfied(key))
            .collect()
    }

    pub fn record_upload(&mut self, key: impl Into<String>, document: UploadedDocument) {
        self.entries
            .insert(key.into(), DocumentEntry::Uploaded(document));
    }

    /// Applies an admin decision to an uploaded slot.
    pub fn review(
        &mut self,
        key: &str,
        action: &ReviewAction,
        reviewer: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<&UploadedDocument> {
        let stored_key = if self.entries.contains_key(key) {
            key.to_string()
        } else {
            format!("{key}Url")
        };
        let reason = action.reason()?;
        let entry = self
            .entries
            .get_mut(&stored_key)
            .with_context(|| format!("No uploaded document '{key}' to review"))?;
        match entry {
            DocumentEntry::Url(url) => {
                *entry = DocumentEntry::Uploaded(UploadedDocument {
                    name: key.to_string(),
                    url: std::mem::take(url),
                    ..UploadedDocument::default()
                });
            }
            DocumentEntry::Other(Value::Object(map)) => {
                *entry = DocumentEntry::Uploaded(UploadedDocument {
                    name: text_field(map, "name"),
                    url: text_field(map, "url"),
                    mime_type: map.get("type").and_then(Value::as_str).map(str::to_string),
                    ..UploadedDocument::default()
                });
            }
            _ => {}
        }
        match entry {
            DocumentEntry::Uploaded(doc) => {
                doc.status = Some(action.status());
                doc.status_reason = Some(reason);
                doc.status_date = Some(at);
                doc.reviewed_by = reviewer.map(str::to_string);
                Ok(doc)
            }
            _ => bail!("Document '{key}' has no reviewable upload"),
        }
    }

    pub fn summary(&self, catalogue: &[DocumentSpec]) -> ReviewSummary {
        let uploaded = catalogue
            .iter()
            .filter(|spec| self.get(spec.key).is_some_and(DocumentEntry::is_present))
            .count();
        let required: Vec<&DocumentSpec> = catalogue
            .iter()
            .filter(|spec| spec.category != DocumentCategory::Portfolio)
            .collect();
        let required_uploaded = required
            .iter()
            .filter(|spec| self.get(spec.key).is_some_and(DocumentEntry::is_present))
            .count();
        let approved = required
            .iter()
            .filter(|spec| {
                self.get(spec.key).and_then(DocumentEntry::status)
                    == Some(DocumentStatus::Approved)
            })
            .count();
        let overall = if approved >= required.len() {
            OverallReviewStatus::Approved
        } else {
            OverallReviewStatus::Pending
        };
        ReviewSummary {
            uploaded,
            total_required: required.len(),
            required_uploaded,
            approved,
            overall,
        }
    }
}

impl FromIterator<(String, DocumentEntry)> for DocumentRecord {
    fn from_iter<I: IntoIterator<Item = (String, DocumentEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
