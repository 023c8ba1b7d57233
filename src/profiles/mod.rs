//! Profile completion for marketplace accounts.
//!
//! `model` and `documents` describe what a user has provided, `requirements`
//! says what each role must provide, and `completion` turns the two into a
//! per-section status that `navigation` renders.

pub mod completion;
pub mod documents;
pub mod experience;
pub mod model;
pub mod navigation;
pub mod requirements;

pub use completion::{compute_status, CompletionStatus, CompletionStatusMap, ProfileSection};
pub use documents::{DocumentRecord, DocumentStatus, UploadedDocument};
pub use model::{AccountType, UserProfile, UserRecord, UserType};
