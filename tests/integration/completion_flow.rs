use anyhow::Result;
use marketplace_profiles::profiles::completion::{CompletionStatus, ProfileSection};
use marketplace_profiles::profiles::documents::{OverallReviewStatus, ReviewAction};
use marketplace_profiles::profiles::navigation::StatusBadge;
use marketplace_profiles::profiles::requirements::requirements_for;

use crate::support::marketplace_users::{signup_fundi, MarketplaceFixture};

#[test]
fn fundi_uploads_then_review_cycle() -> Result<()> {
    let mut fixture = MarketplaceFixture::new();
    let user = signup_fundi("501");
    let required = requirements_for(user.user_type, user.account_type).required_documents;

    // Freshly signed up: only the signup sections are complete.
    let initial = fixture.service.status(Some(&user))?;
    assert_eq!(initial.get(ProfileSection::AccountInfo), CompletionStatus::Complete);
    assert_eq!(initial.get(ProfileSection::Address), CompletionStatus::Complete);
    assert_eq!(initial.get(ProfileSection::AccountUploads), CompletionStatus::Incomplete);
    assert_eq!(initial.get(ProfileSection::Experience), CompletionStatus::Incomplete);

    fixture.upload_all("501", required);
    let uploaded = fixture.service.status(Some(&user))?;
    assert!(uploaded.is_complete(ProfileSection::AccountUploads));

    // A re-upload request sends the section back to incomplete.
    fixture.service.review_document(
        "501",
        "idBack",
        &ReviewAction::RequestReupload {
            reason: "Photo is cropped".into(),
        },
        Some("associate-2"),
    )?;
    let report = fixture.service.report(&user)?;
    assert_eq!(report.missing_documents, vec!["idBack"]);
    assert_eq!(report.review.overall, OverallReviewStatus::Pending);
    let uploads_item = report
        .navigation
        .iter()
        .find(|item| item.section == ProfileSection::AccountUploads)
        .expect("uploads entry in sidebar");
    assert_eq!(uploads_item.status, CompletionStatus::Incomplete);
    assert_eq!(uploads_item.badge, StatusBadge::Text);

    // Re-uploading and approving everything completes the review.
    fixture.upload_all("501", &["idBack"]);
    for key in required {
        fixture
            .service
            .review_document("501", key, &ReviewAction::Approve, Some("admin"))?;
    }
    let report = fixture.service.report(&user)?;
    assert!(report.missing_documents.is_empty());
    assert_eq!(report.review.overall, OverallReviewStatus::Approved);
    assert!(report.status.is_complete(ProfileSection::AccountUploads));
    assert!(!report.products_unlocked, "admin approval still pending");

    let mut approved = user.clone();
    approved.admin_approved = true;
    let report = fixture.service.report(&approved)?;
    assert!(report.products_unlocked);
    assert_eq!(
        report.navigation.last().map(|item| item.section),
        Some(ProfileSection::Activities)
    );
    Ok(())
}

#[test]
fn url_suffixed_keys_count_as_uploaded() -> Result<()> {
    let mut fixture = MarketplaceFixture::new();
    let user = signup_fundi("502");
    fixture.upload_all("502", &["idFrontUrl", "idBackUrl", "certificateUrl", "kraPIN"]);
    let status = fixture.service.status(Some(&user))?;
    assert!(status.is_complete(ProfileSection::AccountUploads));
    Ok(())
}
