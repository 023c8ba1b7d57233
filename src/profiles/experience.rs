//! Experience forms saved by builders and how they feed the user profile.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::model::{UserProfile, UserType};

/// Project rows a fundi must fill for a grade such as "G2: Skilled".
pub fn required_projects_for_grade(grade: &str) -> usize {
    let code = grade
        .split(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_uppercase();
    match code.as_str() {
        "G1" => 3,
        "G2" => 2,
        "G3" => 1,
        _ => 0,
    }
}

/// Project rows a professional must fill for a level such as "Senior".
pub fn required_projects_for_level(level: &str) -> usize {
    match level.trim().to_ascii_lowercase().as_str() {
        "senior" => 5,
        "professional" => 3,
        "graduate" => 1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAttachment {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub project_name: String,
    /// File URLs, or `{name, size, type}` descriptors for unsent files.
    #[serde(default)]
    pub files: Vec<Value>,
}

impl ProjectAttachment {
    pub fn is_complete(&self) -> bool {
        !self.project_name.trim().is_empty() && !self.files.is_empty()
    }

    fn file_refs(&self) -> impl Iterator<Item = String> + '_ {
        self.files.iter().filter_map(file_ref)
    }
}

fn file_ref(file: &Value) -> Option<String> {
    match file {
        Value::String(url) if !url.trim().is_empty() => Some(url.clone()),
        Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("name"))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// The experience form as stored for one user. For fundis `level` holds the
/// grade; for contractors `category` holds the contractor type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    #[serde(default, alias = "grade")]
    pub level: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub attachments: Vec<ProjectAttachment>,
}

impl ExperienceRecord {
    pub fn required_projects(&self, user_type: UserType) -> usize {
        match user_type {
            UserType::Fundi => required_projects_for_grade(&self.level),
            UserType::Professional => required_projects_for_level(&self.level),
            UserType::Contractor => 1,
            _ => 0,
        }
    }

    /// Complete project rows among those visible for the current grade/level.
    pub fn complete_projects(&self, user_type: UserType) -> Vec<&ProjectAttachment> {
        let visible = match user_type {
            UserType::Contractor => self.attachments.len(),
            _ => self.required_projects(user_type),
        };
        self.attachments
            .iter()
            .take(visible)
            .filter(|row| row.is_complete())
            .collect()
    }

    /// Rejects a submission with fewer complete projects than required.
    pub fn validate(&self, user_type: UserType) -> Result<()> {
        let required = self.required_projects(user_type);
        let complete = self.complete_projects(user_type).len();
        if complete < required {
            bail!("Please add {required} complete project(s); {complete} provided.");
        }
        Ok(())
    }

    /// Folds the saved form into the profile fields read by the completion rules.
    pub fn apply_to_profile(&self, user_type: UserType, profile: &mut UserProfile) {
        let projects = self.complete_projects(user_type);
        match user_type {
            UserType::Fundi => {
                profile.grade = non_empty(&self.level);
                profile.experience = non_empty(&self.experience);
                profile.specialization = non_empty(&self.specialization);
                profile.previous_job_photo_urls = Some(
                    projects
                        .iter()
                        .flat_map(|row| row.file_refs())
                        .map(Value::String)
                        .collect(),
                );
            }
            UserType::Professional => {
                profile.profession = non_empty(&self.category);
                profile.specialization = non_empty(&self.specialization);
                profile.professional_level = non_empty(&self.level);
                profile.years_of_experience = non_empty(&self.experience).map(Value::String);
                profile.professional_projects = Some(project_payloads(&projects));
            }
            UserType::Contractor => {
                profile.contractor_type = non_empty(&self.category);
                profile.license_level = non_empty(&self.level);
                profile.contractor_experiences = non_empty(&self.experience).map(Value::String);
                profile.contractor_projects = Some(project_payloads(&projects));
            }
            UserType::Hardware => {
                profile.hardware_projects = Some(project_payloads(&projects));
            }
            UserType::Customer | UserType::Admin => {}
        }
    }
}

fn project_payloads(projects: &[&ProjectAttachment]) -> Vec<Value> {
    projects
        .iter()
        .map(|row| {
            json!({
                "projectName": row.project_name.trim(),
                "fileUrl": row.file_refs().next().unwrap_or_default(),
            })
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
