//! User records as the marketplace front-end persists them.
//!
//! Field names follow the camelCase wire format so records fetched from the
//! account API or a local store deserialize without translation.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum UserType {
    Customer,
    Fundi,
    Professional,
    Contractor,
    Hardware,
    Admin,
}

impl UserType {
    pub const ALL: [UserType; 6] = [
        UserType::Customer,
        UserType::Fundi,
        UserType::Professional,
        UserType::Contractor,
        UserType::Hardware,
        UserType::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Customer => "CUSTOMER",
            UserType::Fundi => "FUNDI",
            UserType::Professional => "PROFESSIONAL",
            UserType::Contractor => "CONTRACTOR",
            UserType::Hardware => "HARDWARE",
            UserType::Admin => "ADMIN",
        }
    }

    /// FUNDI, PROFESSIONAL, CONTRACTOR and HARDWARE provider accounts.
    pub fn is_builder(self) -> bool {
        !matches!(self, UserType::Customer | UserType::Admin)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(UserType::Customer),
            "fundi" => Ok(UserType::Fundi),
            "professional" => Ok(UserType::Professional),
            "contractor" => Ok(UserType::Contractor),
            "hardware" => Ok(UserType::Hardware),
            "admin" => Ok(UserType::Admin),
            other => bail!(
                "Unknown user type '{other}'. Expected customer/fundi/professional/contractor/hardware/admin."
            ),
        }
    }
}

impl TryFrom<String> for UserType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<UserType> for String {
    fn from(value: UserType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum AccountType {
    Individual,
    Organization,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Individual => "INDIVIDUAL",
            AccountType::Organization => "ORGANIZATION",
        }
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "individual" => Ok(AccountType::Individual),
            "organization" | "organisation" => Ok(AccountType::Organization),
            other => bail!("Unknown account type '{other}'. Expected individual/organization."),
        }
    }
}

impl TryFrom<String> for AccountType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AccountType> for String {
    fn from(value: AccountType) -> Self {
        value.as_str().to_string()
    }
}

/// Type-specific profile fields. Every field is optional; which ones matter
/// depends on the owning user's [`UserType`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    // Fundi
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_job_photo_urls: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,

    // Professional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_projects: Option<Vec<Value>>,

    // Contractor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_experiences: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_projects: Option<Vec<Value>>,

    // Hardware
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_projects: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub user_type: UserType,
    #[serde(
        default,
        deserialize_with = "lenient_account_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_type: Option<AccountType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin_approved: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_profile: UserProfile,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, user_type: UserType) -> Self {
        Self {
            id: id.into(),
            user_type,
            account_type: None,
            admin_approved: false,
            user_profile: UserProfile::default(),
        }
    }

    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.user_profile = profile;
        self
    }
}

/// True when a text field holds something other than whitespace.
pub fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}

/// True when a list field holds at least one entry.
pub fn has_entries(field: &Option<Vec<Value>>) -> bool {
    field.as_ref().is_some_and(|items| !items.is_empty())
}

/// Presence test for loosely typed JSON fields (numbers, strings, lists).
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number user id, found {other}"
        ))),
    }
}

/// Signup leaves `accountType` empty for non-customers; blank or unknown
/// values read as "no account type".
fn lenient_account_type<'de, D>(deserializer: D) -> std::result::Result<Option<AccountType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text.parse().ok(),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
