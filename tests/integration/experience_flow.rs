use anyhow::Result;
use marketplace_profiles::profiles::completion::ProfileSection;
use marketplace_profiles::profiles::experience::{ExperienceRecord, ProjectAttachment};
use serde_json::json;

use crate::support::marketplace_users::{professional, signup_fundi, MarketplaceFixture};

fn project(id: u32, name: &str, file: &str) -> ProjectAttachment {
    ProjectAttachment {
        id,
        project_name: name.into(),
        files: vec![json!(file)],
    }
}

#[test]
fn saved_fundi_experience_completes_section() -> Result<()> {
    let mut fixture = MarketplaceFixture::new();
    let user = signup_fundi("601");

    let short = ExperienceRecord {
        level: "G2: Skilled".into(),
        experience: "5-10 years".into(),
        attachments: vec![project(1, "Water tank", "tank.jpg")],
        ..ExperienceRecord::default()
    };
    let err = fixture.service.save_experience(&user, &short).unwrap_err();
    assert!(err.to_string().contains("Please add 2 complete project(s)"));
    assert!(!fixture
        .service
        .status(Some(&user))?
        .is_complete(ProfileSection::Experience));

    let mut full = short.clone();
    full.attachments.push(project(2, "Septic line", "septic.jpg"));
    fixture.service.save_experience(&user, &full)?;

    let effective = fixture.service.effective_user(&user)?;
    assert_eq!(effective.user_profile.grade.as_deref(), Some("G2: Skilled"));
    let report = fixture.service.report(&user)?;
    assert!(report.status.is_complete(ProfileSection::Experience));
    assert!(report.missing_experience_fields.is_empty());
    Ok(())
}

#[test]
fn professional_without_projects_is_incomplete() -> Result<()> {
    let mut fixture = MarketplaceFixture::new();
    let user = professional("602");
    let report = fixture.service.report(&user)?;
    assert_eq!(report.missing_experience_fields, vec!["professionalProjects"]);

    let record = ExperienceRecord {
        category: "Quantity Surveyor".into(),
        level: "Graduate".into(),
        experience: "1-3 years".into(),
        attachments: vec![project(1, "Clinic BoQ", "boq.pdf")],
        ..ExperienceRecord::default()
    };
    fixture.service.save_experience(&user, &record)?;
    assert!(fixture
        .service
        .status(Some(&user))?
        .is_complete(ProfileSection::Experience));
    Ok(())
}
