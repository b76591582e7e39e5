use clap::ValueEnum;

use crate::domain::action::Action;
use crate::domain::path::unquote_path;
use crate::error::{AppError, AppResult};

/// Layout of the lines handed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    /// `git diff-index --name-status`: `<action>\t<path>[\t<path>]`.
    DiffIndex,
    /// `git status --short`: `XY <path>` or `XY <from> -> <to>`.
    Status,
}

/// One changed file. Renames carry the destination in `to_path`; the source is always
/// `from_path`, whichever git command produced the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    action: char,
    from_path: String,
    to_path: Option<String>,
}

impl ChangeRecord {
    pub fn new(action: char, from_path: &str, to_path: Option<&str>) -> AppResult<Self> {
        if from_path.is_empty() {
            return Err(AppError::Parse("change has an empty path".to_string()));
        }

        let to_path = match (Action::from_char(action), to_path) {
            (Action::Rename, Some(to)) if !to.is_empty() => Some(to.to_string()),
            (Action::Rename, _) => {
                return Err(AppError::Parse(format!(
                    "rename of '{from_path}' has no destination path"
                )));
            }
            _ => None,
        };

        Ok(Self {
            action,
            from_path: from_path.to_string(),
            to_path,
        })
    }

    pub fn action_char(&self) -> char {
        self.action
    }

    pub fn action(&self) -> Action {
        Action::from_char(self.action)
    }

    pub fn from_path(&self) -> &str {
        &self.from_path
    }

    pub fn to_path(&self) -> Option<&str> {
        self.to_path.as_deref()
    }
}

pub fn parse_line(format: DiffFormat, line: &str) -> AppResult<ChangeRecord> {
    match format {
        DiffFormat::DiffIndex => parse_diff_index_line(line),
        DiffFormat::Status => parse_status_line(line),
    }
}

/// Parse every non-blank line, stopping at the first malformed one.
pub fn parse_lines<S: AsRef<str>>(format: DiffFormat, lines: &[S]) -> AppResult<Vec<ChangeRecord>> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(format, line))
        .collect()
}

pub fn parse_diff_index_line(line: &str) -> AppResult<ChangeRecord> {
    let mut fields = line.split('\t');

    // Similarity scores follow the action character, e.g. "R100".
    let action = fields
        .next()
        .and_then(|field| field.chars().next())
        .ok_or_else(|| AppError::Parse(format!("missing action in line '{line}'")))?;

    let from = fields
        .next()
        .filter(|field| !field.is_empty())
        .ok_or_else(|| AppError::Parse(format!("missing path in line '{line}'")))?;

    let from = unquote_path(from)?;
    let to = fields.next().map(unquote_path).transpose()?;
    ChangeRecord::new(action, &from, to.as_deref())
}

pub fn parse_status_line(line: &str) -> AppResult<ChangeRecord> {
    let malformed = || AppError::Parse(format!("malformed status line '{line}'"));

    let mut columns = line.chars();
    let index = columns.next().ok_or_else(malformed)?;
    let worktree = columns.next().ok_or_else(malformed)?;
    if columns.next() != Some(' ') {
        return Err(malformed());
    }
    let rest = &line[index.len_utf8() + worktree.len_utf8() + 1..];

    let action = match (index, worktree) {
        ('?', _) => 'A',
        (' ', other) => other,
        (other, _) => other,
    };

    if Action::from_char(action) == Action::Rename {
        let (from, to) = rest.split_once(" -> ").ok_or_else(malformed)?;
        let (from, to) = (unquote_path(from)?, unquote_path(to)?);
        ChangeRecord::new(action, &from, Some(to.as_str()))
    } else {
        ChangeRecord::new(action, &unquote_path(rest)?, None)
    }
}
