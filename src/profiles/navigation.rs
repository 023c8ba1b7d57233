//! Sidebar entries for the profile area, derived from a completion map.

use serde::Serialize;

use super::completion::{CompletionStatus, CompletionStatusMap, ProfileSection};
use super::model::{UserRecord, UserType};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusBadge {
    /// "Complete" / "Incomplete" pill.
    Text,
    /// Check or warning icon.
    Icon,
    Hidden,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavigationItem {
    pub section: ProfileSection,
    pub label: &'static str,
    pub status: CompletionStatus,
    pub badge: StatusBadge,
}

fn short_label(section: ProfileSection) -> &'static str {
    match section {
        ProfileSection::AccountUploads => "Uploads",
        other => other.label(),
    }
}

fn badge_for(section: ProfileSection) -> StatusBadge {
    match section {
        ProfileSection::AccountUploads | ProfileSection::Experience => StatusBadge::Text,
        ProfileSection::Products | ProfileSection::Activities => StatusBadge::Hidden,
        ProfileSection::AccountInfo | ProfileSection::Address => StatusBadge::Icon,
    }
}

pub fn shows_experience(user_type: UserType) -> bool {
    !matches!(
        user_type,
        UserType::Customer | UserType::Hardware | UserType::Admin
    )
}

pub fn shows_uploads(user_type: UserType) -> bool {
    user_type != UserType::Admin
}

/// Products appear only for approved fundis and professionals.
pub fn shows_products(user: &UserRecord) -> bool {
    matches!(user.user_type, UserType::Fundi | UserType::Professional) && user.admin_approved
}

/// Products can be managed once uploads are complete and an admin approved
/// the account.
pub fn products_unlocked(user: &UserRecord, status: &CompletionStatusMap) -> bool {
    user.admin_approved && status.is_complete(ProfileSection::AccountUploads)
}

/// Ordered sidebar: Account Info, Address, Experience, Account Uploads,
/// Products, then Activities last.
pub fn navigation_items(user: &UserRecord, status: &CompletionStatusMap) -> Vec<NavigationItem> {
    let mut sections = vec![ProfileSection::AccountInfo, ProfileSection::Address];
    if shows_experience(user.user_type) {
        sections.push(ProfileSection::Experience);
    }
    if shows_uploads(user.user_type) {
        sections.push(ProfileSection::AccountUploads);
    }
    if shows_products(user) {
        sections.push(ProfileSection::Products);
    }
    sections.push(ProfileSection::Activities);

    sections
        .into_iter()
        .map(|section| NavigationItem {
            section,
            label: short_label(section),
            status: status.get(section),
            badge: badge_for(section),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::completion::compute_status;
    use crate::profiles::documents::DocumentRecord;

    fn sections_for(user: &UserRecord) -> Vec<ProfileSection> {
        let status = compute_status(Some(user), &DocumentRecord::new());
        navigation_items(user, &status)
            .into_iter()
            .map(|item| item.section)
            .collect()
    }

    #[test]
    fn approved_fundi_sees_every_section_in_order() {
        let mut user = UserRecord::new("f1", UserType::Fundi);
        user.admin_approved = true;
        assert_eq!(
            sections_for(&user),
            vec![
                ProfileSection::AccountInfo,
                ProfileSection::Address,
                ProfileSection::Experience,
                ProfileSection::AccountUploads,
                ProfileSection::Products,
                ProfileSection::Activities
            ]
        );
    }

    #[test]
    fn admin_and_customer_layouts() {
        let admin = UserRecord::new("a1", UserType::Admin);
        assert_eq!(
            sections_for(&admin),
            vec![
                ProfileSection::AccountInfo,
                ProfileSection::Address,
                ProfileSection::Activities
            ]
        );
        let mut customer = UserRecord::new("c1", UserType::Customer);
        customer.admin_approved = true;
        assert_eq!(
            sections_for(&customer),
            vec![
                ProfileSection::AccountInfo,
                ProfileSection::Address,
                ProfileSection::AccountUploads,
                ProfileSection::Activities
            ]
        );
    }

    #[test]
    fn uploads_use_short_label_and_text_badge() {
        let user = UserRecord::new("h1", UserType::Hardware);
        let status = compute_status(Some(&user), &DocumentRecord::new());
        let items = navigation_items(&user, &status);
        let uploads = items
            .iter()
            .find(|item| item.section == ProfileSection::AccountUploads)
            .unwrap();
        assert_eq!(uploads.label, "Uploads");
        assert_eq!(uploads.badge, StatusBadge::Text);
        assert_eq!(uploads.status, CompletionStatus::Incomplete);
        assert_eq!(items.last().unwrap().badge, StatusBadge::Hidden);
    }

    #[test]
    fn products_need_approval_and_uploads() {
        let mut user = UserRecord::new("p1", UserType::Professional);
        let status = compute_status(Some(&user), &DocumentRecord::new());
        assert!(!products_unlocked(&user, &status));
        user.admin_approved = true;
        assert!(!products_unlocked(&user, &status));
    }
}
