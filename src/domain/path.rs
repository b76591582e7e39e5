use crate::domain::action::MoveOrRename;
use crate::error::{AppError, AppResult};

/// A path broken into its directory segments and file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    pub dirs: Vec<String>,
    pub name: String,
}

impl PathParts {
    pub fn dir_path(&self) -> String {
        self.dirs.join("/")
    }
}

pub fn split_path(path: &str) -> PathParts {
    let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
    let name = segments.pop().unwrap_or_default();
    PathParts {
        dirs: segments,
        name,
    }
}

/// Display form of a path. Kept separate so display rules can change in one place.
pub fn format_path(path: &str) -> String {
    path.to_string()
}

/// Join items as prose: "a", "a and b", "a, b and c".
pub fn human_list<S: AsRef<str>>(items: &[S]) -> AppResult<String> {
    match items {
        [] => Err(AppError::InvalidInput(
            "cannot build a list from zero items".to_string(),
        )),
        [only] => Ok(only.as_ref().to_string()),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(|item| item.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            Ok(format!("{head} and {}", last.as_ref()))
        }
    }
}

/// Undo git's C-style quoting of unusual paths, e.g. `"caf\303\251.txt"` or `"a b.txt"`.
/// Paths git left unquoted come back as they are.
pub fn unquote_path(field: &str) -> AppResult<String> {
    let Some(inner) = field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return Ok(field.to_string());
    };

    let invalid = || AppError::Parse(format!("invalid quoted path {field}"));
    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut buf = [0; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let byte = match chars.next().ok_or_else(invalid)? {
            'a' => 0x07,
            'b' => 0x08,
            't' => b'\t',
            'n' => b'\n',
            'v' => 0x0b,
            'f' => 0x0c,
            'r' => b'\r',
            '"' => b'"',
            '\\' => b'\\',
            // Three octal digits, one raw byte of the UTF-8 path.
            first @ '0'..='3' => {
                let mut value = first as u32 - '0' as u32;
                for _ in 0..2 {
                    let digit = chars
                        .next()
                        .and_then(|c| c.to_digit(8))
                        .ok_or_else(invalid)?;
                    value = value * 8 + digit;
                }
                value as u8
            }
            _ => return Err(invalid()),
        };
        bytes.push(byte);
    }

    String::from_utf8(bytes).map_err(|_| invalid())
}

pub fn move_or_rename_from_paths(old: &PathParts, new: &PathParts) -> MoveOrRename {
    if old.dirs == new.dirs {
        MoveOrRename::Rename
    } else if old.name == new.name {
        MoveOrRename::Move
    } else {
        MoveOrRename::MoveAndRename
    }
}
