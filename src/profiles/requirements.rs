//! Per-role requirement table.
//!
//! Each user type maps to one [`RoleRequirements`] record: the documents that
//! must be uploaded before "Account Uploads" counts as complete, the full
//! upload catalogue shown to the user, and the rule deciding whether the
//! "Experience" section is complete.

use serde::{Deserialize, Serialize};

use super::model::{has_entries, has_text, is_present, AccountType, UserProfile, UserType};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Id,
    Certification,
    Portfolio,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub category: DocumentCategory,
}

const fn spec(key: &'static str, name: &'static str, category: DocumentCategory) -> DocumentSpec {
    DocumentSpec {
        key,
        name,
        category,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceRule {
    /// Role has no experience section; it always reads as complete.
    NotApplicable,
    /// grade, experience and at least one previous-job photo.
    Fundi,
    /// profession, level, years of experience and at least one project.
    Professional,
    /// contractor type, licence level, experience and at least one project.
    Contractor,
    /// Role has no experience form to fill in, so the section never completes.
    Unavailable,
}

impl ExperienceRule {
    pub fn is_satisfied(self, profile: &UserProfile) -> bool {
        match self {
            ExperienceRule::NotApplicable => true,
            ExperienceRule::Unavailable => false,
            ExperienceRule::Fundi => {
                has_text(&profile.grade)
                    && has_text(&profile.experience)
                    && has_entries(&profile.previous_job_photo_urls)
            }
            ExperienceRule::Professional => {
                has_text(&profile.profession)
                    && has_text(&profile.professional_level)
                    && profile.years_of_experience.as_ref().is_some_and(is_present)
                    && has_entries(&profile.professional_projects)
            }
            ExperienceRule::Contractor => {
                has_text(&profile.contractor_type)
                    && has_text(&profile.license_level)
                    && profile.contractor_experiences.as_ref().is_some_and(is_present)
                    && has_entries(&profile.contractor_projects)
            }
        }
    }

    /// Names of the fields the rule looks at that are still missing.
    pub fn missing_fields(self, profile: &UserProfile) -> Vec<&'static str> {
        let checks: Vec<(&'static str, bool)> = match self {
            ExperienceRule::NotApplicable => Vec::new(),
            ExperienceRule::Unavailable => vec![("experience", false)],
            ExperienceRule::Fundi => vec![
                ("grade", has_text(&profile.grade)),
                ("experience", has_text(&profile.experience)),
                (
                    "previousJobPhotoUrls",
                    has_entries(&profile.previous_job_photo_urls),
                ),
            ],
            ExperienceRule::Professional => vec![
                ("profession", has_text(&profile.profession)),
                ("professionalLevel", has_text(&profile.professional_level)),
                (
                    "yearsOfExperience",
                    profile.years_of_experience.as_ref().is_some_and(is_present),
                ),
                (
                    "professionalProjects",
                    has_entries(&profile.professional_projects),
                ),
            ],
            ExperienceRule::Contractor => vec![
                ("contractorType", has_text(&profile.contractor_type)),
                ("licenseLevel", has_text(&profile.license_level)),
                (
                    "contractorExperiences",
                    profile
                        .contractor_experiences
                        .as_ref()
                        .is_some_and(is_present),
                ),
                ("contractorProjects", has_entries(&profile.contractor_projects)),
            ],
        };
        checks
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoleRequirements {
    pub required_documents: &'static [&'static str],
    pub catalogue: &'static [DocumentSpec],
    pub experience: ExperienceRule,
}

const INDIVIDUAL_CATALOGUE: &[DocumentSpec] = &[
    spec("idFront", "National ID - Front", DocumentCategory::Id),
    spec("idBack", "National ID - Back", DocumentCategory::Id),
    spec("kraPIN", "KRA PIN Certificate", DocumentCategory::Certification),
];

const ORGANIZATION_CATALOGUE: &[DocumentSpec] = &[
    spec(
        "certificateOfIncorporation",
        "Certificate of Incorporation",
        DocumentCategory::Business,
    ),
    spec("businessPermit", "Business Permit", DocumentCategory::Business),
    spec("kraPIN", "KRA PIN Certificate", DocumentCategory::Certification),
    spec("companyProfile", "Company Profile", DocumentCategory::Certification),
];

const FUNDI_CATALOGUE: &[DocumentSpec] = &[
    spec("idFront", "National ID - Front", DocumentCategory::Id),
    spec("idBack", "National ID - Back", DocumentCategory::Id),
    spec("kraPIN", "KRA PIN Certificate", DocumentCategory::Certification),
    spec("certificate", "Trade Certificate", DocumentCategory::Certification),
    spec("portfolio1", "Portfolio - Project 1", DocumentCategory::Portfolio),
    spec("portfolio2", "Portfolio - Project 2", DocumentCategory::Portfolio),
    spec("portfolio3", "Portfolio - Project 3", DocumentCategory::Portfolio),
];

const PROFESSIONAL_CATALOGUE: &[DocumentSpec] = &[
    spec("idFront", "National ID - Front", DocumentCategory::Id),
    spec("idBack", "National ID - Back", DocumentCategory::Id),
    spec("kraPIN", "KRA PIN Certificate", DocumentCategory::Certification),
    spec(
        "academicCertificate",
        "Academic Certificate",
        DocumentCategory::Certification,
    ),
    spec("practiceLicense", "Practice License", DocumentCategory::Certification),
    spec("cv", "Curriculum Vitae (CV)", DocumentCategory::Certification),
    spec("portfolio1", "Portfolio - Project 1", DocumentCategory::Portfolio),
    spec("portfolio2", "Portfolio - Project 2", DocumentCategory::Portfolio),
    spec("portfolio3", "Portfolio - Project 3", DocumentCategory::Portfolio),
];

const CONTRACTOR_CATALOGUE: &[DocumentSpec] = &[
    spec(
        "certificateOfIncorporation",
        "Certificate of Incorporation",
        DocumentCategory::Business,
    ),
    spec("businessPermit", "Business Permit", DocumentCategory::Business),
    spec("kraPIN", "KRA PIN Certificate", DocumentCategory::Certification),
    spec("companyProfile", "Company Profile", DocumentCategory::Certification),
    spec("ncaCertificate", "NCA Certificate", DocumentCategory::Certification),
    spec("portfolio1", "Portfolio - Project 1", DocumentCategory::Portfolio),
    spec("portfolio2", "Portfolio - Project 2", DocumentCategory::Portfolio),
    spec("portfolio3", "Portfolio - Project 3", DocumentCategory::Portfolio),
];

static INDIVIDUAL_CUSTOMER: RoleRequirements = RoleRequirements {
    required_documents: &["idFront", "idBack", "kraPIN"],
    catalogue: INDIVIDUAL_CATALOGUE,
    experience: ExperienceRule::NotApplicable,
};

static ORGANIZATION_CUSTOMER: RoleRequirements = RoleRequirements {
    required_documents: &["businessPermit", "certificateOfIncorporation", "kraPIN"],
    catalogue: ORGANIZATION_CATALOGUE,
    experience: ExperienceRule::NotApplicable,
};

static FUNDI: RoleRequirements = RoleRequirements {
    required_documents: &["idFront", "idBack", "certificate", "kraPIN"],
    catalogue: FUNDI_CATALOGUE,
    experience: ExperienceRule::Fundi,
};

static PROFESSIONAL: RoleRequirements = RoleRequirements {
    required_documents: &[
        "idFront",
        "idBack",
        "academicCertificate",
        "cv",
        "kraPIN",
        "practiceLicense",
    ],
    catalogue: PROFESSIONAL_CATALOGUE,
    experience: ExperienceRule::Professional,
};

static CONTRACTOR: RoleRequirements = RoleRequirements {
    required_documents: &[
        "businessRegistration",
        "businessPermit",
        "kraPIN",
        "companyProfile",
    ],
    catalogue: CONTRACTOR_CATALOGUE,
    experience: ExperienceRule::Contractor,
};

static HARDWARE: RoleRequirements = RoleRequirements {
    required_documents: &[
        "certificateOfIncorporation",
        "kraPIN",
        "singleBusinessPermit",
        "companyProfile",
    ],
    catalogue: ORGANIZATION_CATALOGUE,
    experience: ExperienceRule::NotApplicable,
};

static ADMIN: RoleRequirements = RoleRequirements {
    required_documents: &[],
    catalogue: &[],
    experience: ExperienceRule::Unavailable,
};

/// Resolves the requirement record for a user. Customers are the only role
/// whose requirements depend on the account type; a customer without one is
/// treated as an organization.
pub fn requirements_for(
    user_type: UserType,
    account_type: Option<AccountType>,
) -> &'static RoleRequirements {
    match (user_type, account_type) {
        (UserType::Customer, Some(AccountType::Individual)) => &INDIVIDUAL_CUSTOMER,
        (UserType::Customer, _) => &ORGANIZATION_CUSTOMER,
        (UserType::Fundi, _) => &FUNDI,
        (UserType::Professional, _) => &PROFESSIONAL,
        (UserType::Contractor, _) => &CONTRACTOR,
        (UserType::Hardware, _) => &HARDWARE,
        (UserType::Admin, _) => &ADMIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_requirements_follow_account_type() {
        let individual = requirements_for(UserType::Customer, Some(AccountType::Individual));
        assert_eq!(individual.required_documents, &["idFront", "idBack", "kraPIN"]);
        let organization = requirements_for(UserType::Customer, Some(AccountType::Organization));
        assert!(organization
            .required_documents
            .contains(&"certificateOfIncorporation"));
        assert_eq!(
            requirements_for(UserType::Customer, None).required_documents,
            organization.required_documents
        );
    }

    #[test]
    fn professional_extends_individual_documents() {
        let docs = requirements_for(UserType::Professional, None).required_documents;
        for key in ["idFront", "idBack", "kraPIN", "academicCertificate", "cv", "practiceLicense"] {
            assert!(docs.contains(&key), "missing {key}");
        }
    }

    #[test]
    fn experience_rule_per_role() {
        for user_type in UserType::ALL {
            let expected = match user_type {
                UserType::Customer | UserType::Hardware => ExperienceRule::NotApplicable,
                UserType::Fundi => ExperienceRule::Fundi,
                UserType::Professional => ExperienceRule::Professional,
                UserType::Contractor => ExperienceRule::Contractor,
                UserType::Admin => ExperienceRule::Unavailable,
            };
            assert_eq!(requirements_for(user_type, None).experience, expected, "{user_type}");
        }
    }

    #[test]
    fn admin_experience_never_completes() {
        let rule = requirements_for(UserType::Admin, None).experience;
        let busy_profile = UserProfile {
            experience: Some("10 years".into()),
            grade: Some("G1".into()),
            ..UserProfile::default()
        };
        assert!(!rule.is_satisfied(&UserProfile::default()));
        assert!(!rule.is_satisfied(&busy_profile));
        assert_eq!(rule.missing_fields(&busy_profile), vec!["experience"]);
    }

    #[test]
    fn contractor_rule_reports_missing_fields() {
        let profile = UserProfile {
            contractor_type: Some("Building".into()),
            ..UserProfile::default()
        };
        assert_eq!(
            ExperienceRule::Contractor.missing_fields(&profile),
            vec!["licenseLevel", "contractorExperiences", "contractorProjects"]
        );
    }
}
