use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self { workspace }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn store_dir(&self) -> PathBuf {
        self.workspace.path().join("store")
    }
}

mod completion_flow;
mod config_workspace;
mod experience_flow;
mod file_store;
pub mod support;
