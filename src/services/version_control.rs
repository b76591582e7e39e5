use async_trait::async_trait;
use clap::ValueEnum;

use crate::domain::change::DiffFormat;
use crate::error::AppResult;

/// Which git view of the working tree to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChangeSource {
    /// Changes staged in the index, compared to HEAD.
    Staged,
    /// Everything `git status` reports, untracked files included.
    Status,
}

impl ChangeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeSource::Staged => "staged",
            ChangeSource::Status => "status",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "staged" => Some(ChangeSource::Staged),
            "status" => Some(ChangeSource::Status),
            _ => None,
        }
    }

    pub fn diff_format(&self) -> DiffFormat {
        match self {
            ChangeSource::Staged => DiffFormat::DiffIndex,
            ChangeSource::Status => DiffFormat::Status,
        }
    }
}

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Raw change lines, one file per line, in the layout of `source.diff_format()`.
    async fn list_changes(&self, source: ChangeSource) -> AppResult<Vec<String>>;
    async fn commit(&self, message: &str) -> AppResult<()>;
}
