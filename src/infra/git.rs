use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::services::{ChangeSource, VersionControlService};

/// Tree object git uses for "nothing", for diffing before the first commit.
const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run(&self, args: &[&str]) -> AppResult<String> {
        debug!(?args, root = %self.workspace_root.display(), "Running git");

        // Non-ASCII paths stay readable; names with spaces or quotes are still
        // C-quoted and get unquoted by the parsers.
        let output = Command::new("git")
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => {
                    AppError::VersionControl("git executable not found".to_string())
                }
                _ => AppError::Io(err),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| AppError::VersionControl("git output is not valid UTF-8".to_string()))
    }

    async fn has_head(&self) -> bool {
        self.run(&["rev-parse", "--verify", "--quiet", "HEAD"])
            .await
            .is_ok()
    }
}

fn split_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn list_changes(&self, source: ChangeSource) -> AppResult<Vec<String>> {
        let stdout = match source {
            ChangeSource::Staged => {
                let base = if self.has_head().await { "HEAD" } else { EMPTY_TREE };
                self.run(&[
                    "diff-index",
                    "--name-status",
                    "--find-renames",
                    "--cached",
                    base,
                ])
                .await?
            }
            ChangeSource::Status => {
                self.run(&["status", "--short", "--untracked-files=all"])
                    .await?
            }
        };

        let lines = split_output(&stdout);
        debug!(source = source.as_str(), lines = lines.len(), "Listed changes");
        Ok(lines)
    }

    async fn commit(&self, message: &str) -> AppResult<()> {
        if message.trim().is_empty() {
            return Err(AppError::VersionControl(
                "commit message cannot be empty".to_string(),
            ));
        }
        self.run(&["commit", "--message", message]).await?;
        info!(message, "Created commit");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_output_lines() {
        let lines = split_output("M\tfoo.txt\nD\tbar.txt\n\n");
        assert_eq!(lines, vec!["M\tfoo.txt".to_string(), "D\tbar.txt".to_string()]);
    }

    #[test]
    fn keeps_status_indentation() {
        let lines = split_output(" M foo.txt\n?? new.txt\n");
        assert_eq!(lines[0], " M foo.txt");
    }

    #[tokio::test]
    async fn rejects_empty_commit_message() {
        let git = GitCli::new(PathBuf::from("."));
        assert!(matches!(
            git.commit("   ").await,
            Err(AppError::VersionControl(_))
        ));
    }
}
