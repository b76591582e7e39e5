use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::context::AppContext;
use crate::domain::change::DiffFormat;
use crate::error::AppResult;
use crate::services::ChangeSource;
use crate::workflow::message::{
    ChangeInput, MessageOutcome, MessageRequest, generate_commit_message,
};

#[derive(Debug, Clone)]
pub struct MessageCommandArgs {
    pub source: Option<ChangeSource>,
    pub stdin: bool,
    pub format: DiffFormat,
    pub max_named: Option<usize>,
    pub commit: bool,
}

pub async fn run(ctx: &AppContext, args: MessageCommandArgs) -> AppResult<MessageOutcome> {
    let input = if args.stdin {
        ChangeInput::Lines {
            lines: read_stdin_lines().await?,
            format: args.format,
        }
    } else {
        // Only the index can be committed, whatever source is configured.
        let default_source = if args.commit {
            ChangeSource::Staged
        } else {
            ctx.config.source
        };
        ChangeInput::Repository(args.source.unwrap_or(default_source))
    };

    let request = MessageRequest {
        input,
        max_named_files: args.max_named.unwrap_or(ctx.config.max_named_files),
        commit: args.commit,
    };

    generate_commit_message(ctx, request).await
}

async fn read_stdin_lines() -> AppResult<Vec<String>> {
    let mut reader = BufReader::new(io::stdin()).lines();
    let mut lines = Vec::new();
    while let Some(line) = reader.next_line().await? {
        lines.push(line);
    }
    Ok(lines)
}
