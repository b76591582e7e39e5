use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::change::{DiffFormat, parse_lines};
use crate::domain::message::compose_message;
use crate::error::{AppError, AppResult};
use crate::services::ChangeSource;

/// Where the change lines come from.
#[derive(Debug, Clone)]
pub enum ChangeInput {
    /// Ask the version-control service.
    Repository(ChangeSource),
    /// Lines captured elsewhere, e.g. piped on stdin.
    Lines { lines: Vec<String>, format: DiffFormat },
}

#[derive(Debug, Clone)]
pub struct MessageRequest {
    pub input: ChangeInput,
    pub max_named_files: usize,
    pub commit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOutcome {
    pub message: String,
    pub files_changed: usize,
    pub committed: bool,
}

pub async fn generate_commit_message(
    ctx: &AppContext,
    request: MessageRequest,
) -> AppResult<MessageOutcome> {
    // `git commit` only records the index, so the message must describe the index.
    if request.commit && !matches!(request.input, ChangeInput::Repository(ChangeSource::Staged)) {
        return Err(AppError::InvalidInput(
            "--commit needs the staged changes as input; stage the files and use --source staged"
                .to_string(),
        ));
    }

    let (lines, format) = match request.input {
        ChangeInput::Repository(source) => (
            ctx.version_control.list_changes(source).await?,
            source.diff_format(),
        ),
        ChangeInput::Lines { lines, format } => (lines, format),
    };

    let changes = parse_lines(format, &lines)?;
    debug!(
        files = changes.len(),
        max_named = request.max_named_files,
        "Parsed changes"
    );

    let message = compose_message(&changes, request.max_named_files)?;

    if request.commit {
        ctx.version_control.commit(&message).await?;
        info!(files = changes.len(), "Committed changes");
    }

    Ok(MessageOutcome {
        message,
        files_changed: changes.len(),
        committed: request.commit,
    })
}
