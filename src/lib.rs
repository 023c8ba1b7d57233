pub mod config;
pub mod logging;
pub mod profiles;
pub mod service;
pub mod storage;

// Re-export commonly used types for convenience.
pub use config::AppConfig;
pub use profiles::{compute_status, CompletionStatusMap, DocumentRecord, UserRecord};
pub use service::ProfileCompletionService;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
