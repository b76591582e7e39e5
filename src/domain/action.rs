use crate::domain::message::title;
use crate::domain::path::{format_path, move_or_rename_from_paths, split_path};
use crate::error::AppResult;

const ROOT_LABEL: &str = "repo root";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Delete,
    Modify,
    Rename,
    Unknown,
}

/// Raw git action characters and the words used for them in messages.
/// Characters missing from the table are `Action::Unknown`.
pub const ACTION_TABLE: &[(char, Action, &str)] = &[
    ('A', Action::Add, "create"),
    ('M', Action::Modify, "update"),
    ('D', Action::Delete, "delete"),
    ('R', Action::Rename, "rename"),
];

const UNKNOWN_LABEL: &str = "unknown";

impl Action {
    pub fn from_char(value: char) -> Self {
        ACTION_TABLE
            .iter()
            .find(|(raw, _, _)| *raw == value)
            .map(|(_, action, _)| *action)
            .unwrap_or(Action::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        ACTION_TABLE
            .iter()
            .find(|(_, action, _)| action == self)
            .map(|(_, _, label)| *label)
            .unwrap_or(UNKNOWN_LABEL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrRename {
    Move,
    Rename,
    MoveAndRename,
}

impl MoveOrRename {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveOrRename::Move => "move",
            MoveOrRename::Rename => "rename",
            MoveOrRename::MoveAndRename => "move and rename",
        }
    }
}

pub fn classify_move(from: &str, to: &str) -> MoveOrRename {
    move_or_rename_from_paths(&split_path(from), &split_path(to))
}

/// Sentence for a single moved or renamed file, e.g. "Rename foo.txt to bar.txt".
pub fn move_or_rename_phrase(from: &str, to: &str) -> AppResult<String> {
    let old = split_path(from);
    let new = split_path(to);
    let kind = move_or_rename_from_paths(&old, &new);

    let detail = match kind {
        MoveOrRename::Rename => format!("{} to {}", old.name, new.name),
        MoveOrRename::Move => {
            let target = if new.dirs.is_empty() {
                ROOT_LABEL.to_string()
            } else {
                new.dir_path()
            };
            format!("{} to {}", old.name, target)
        }
        MoveOrRename::MoveAndRename => format!("{} to {}", format_path(from), format_path(to)),
    };

    Ok(format!("{} {detail}", title(kind.as_str())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_characters() {
        assert_eq!(Action::from_char('A').as_str(), "create");
        assert_eq!(Action::from_char('M').as_str(), "update");
        assert_eq!(Action::from_char('D').as_str(), "delete");
        assert_eq!(Action::from_char('R').as_str(), "rename");
    }

    #[test]
    fn falls_back_to_unknown() {
        assert_eq!(Action::from_char('C'), Action::Unknown);
        assert_eq!(Action::from_char('x').as_str(), "unknown");
    }

    #[test]
    fn every_label_is_tabled_or_move_label() {
        let move_labels = [
            MoveOrRename::Move,
            MoveOrRename::Rename,
            MoveOrRename::MoveAndRename,
        ]
        .map(|kind| kind.as_str());

        for raw in ['A', 'M', 'D', 'R', 'C', 'T', 'U', '?'] {
            let label = Action::from_char(raw).as_str();
            let tabled = ACTION_TABLE.iter().any(|(_, _, known)| *known == label);
            assert!(tabled || label == UNKNOWN_LABEL, "unexpected label {label}");
        }

        for (from, to) in [
            ("a/foo.txt", "a/bar.txt"),
            ("a/foo.txt", "b/foo.txt"),
            ("a/foo.txt", "b/bar.txt"),
        ] {
            assert!(move_labels.contains(&classify_move(from, to).as_str()));
        }
    }

    #[test]
    fn phrases_rename() {
        assert_eq!(
            move_or_rename_phrase("docs/foo.txt", "docs/bar.txt").unwrap(),
            "Rename foo.txt to bar.txt"
        );
    }

    #[test]
    fn phrases_move() {
        assert_eq!(
            move_or_rename_phrase("foo.txt", "docs/foo.txt").unwrap(),
            "Move foo.txt to docs"
        );
        assert_eq!(
            move_or_rename_phrase("docs/foo.txt", "foo.txt").unwrap(),
            "Move foo.txt to repo root"
        );
    }

    #[test]
    fn phrases_move_and_rename() {
        assert_eq!(
            move_or_rename_phrase("a/foo.txt", "b/bar.txt").unwrap(),
            "Move and rename a/foo.txt to b/bar.txt"
        );
    }
}
