use crate::domain::action::{Action, move_or_rename_phrase};
use crate::domain::change::ChangeRecord;
use crate::domain::count::{count_by_action, count_by_action_msg};
use crate::domain::path::{format_path, human_list};
use crate::error::{AppError, AppResult};

/// Uppercase the first character only; the rest is left as is.
pub fn title(value: &str) -> AppResult<String> {
    let mut chars = value.chars();
    let first = chars.next().ok_or_else(|| {
        AppError::InvalidInput("cannot title-case an empty string".to_string())
    })?;
    Ok(first.to_uppercase().chain(chars).collect())
}

pub fn all_equal<T: PartialEq>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] == pair[1])
}

/// e.g. "Update foo.txt" or "Rename foo.txt to bar.txt".
pub fn one_change(change: &ChangeRecord) -> AppResult<String> {
    if let (Action::Rename, Some(to)) = (change.action(), change.to_path()) {
        return move_or_rename_phrase(change.from_path(), to);
    }

    Ok(format!(
        "{} {}",
        title(change.action().as_str())?,
        format_path(change.from_path())
    ))
}

/// e.g. "Update foo.txt and bar.txt", or "Various changes to ..." when actions differ.
pub fn named_files(changes: &[ChangeRecord]) -> AppResult<String> {
    let actions = changes
        .iter()
        .map(ChangeRecord::action_char)
        .collect::<Vec<_>>();
    let paths = changes
        .iter()
        .map(|change| format_path(change.from_path()))
        .collect::<Vec<_>>();
    let file_list = human_list(&paths)?;

    let action = if all_equal(&actions) {
        Action::from_char(actions[0])
    } else {
        Action::Unknown
    };

    if action == Action::Unknown {
        return Ok(format!("Various changes to {file_list}"));
    }

    Ok(format!("{} {file_list}", title(action.as_str())?))
}

/// Pick the message style for a batch: one change is described in full, small batches
/// name their files, larger ones fall back to per-action counts.
pub fn compose_message(changes: &[ChangeRecord], max_named_files: usize) -> AppResult<String> {
    match changes {
        [] => Err(AppError::InvalidInput("no changes to describe".to_string())),
        [single] => one_change(single),
        _ if changes.len() <= max_named_files => named_files(changes),
        _ => title(&count_by_action_msg(&count_by_action(changes))?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::change::{DiffFormat, parse_lines};

    fn records(lines: &[&str]) -> Vec<ChangeRecord> {
        parse_lines(DiffFormat::DiffIndex, lines).unwrap()
    }

    #[test]
    fn titles_first_character_only() {
        assert_eq!(title("update").unwrap(), "Update");
        assert_eq!(title("move and rename").unwrap(), "Move and rename");
        assert_eq!(title("eXample").unwrap(), "EXample");
        assert!(matches!(title(""), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn compares_all_elements() {
        assert!(all_equal::<char>(&[]));
        assert!(all_equal(&['M']));
        assert!(all_equal(&['M', 'M', 'M']));
        assert!(!all_equal(&['M', 'D']));
    }

    #[test]
    fn describes_one_change() {
        let change = &records(&["M\tfoo.txt"])[0];
        assert_eq!(one_change(change).unwrap(), "Update foo.txt");

        let rename = &records(&["R100\tfoo.txt\tbar.txt"])[0];
        assert_eq!(one_change(rename).unwrap(), "Rename foo.txt to bar.txt");
    }

    #[test]
    fn names_uniform_batch() {
        assert_eq!(
            named_files(&records(&["M\tfoo.txt", "M\tbar.txt"])).unwrap(),
            "Update foo.txt and bar.txt"
        );
        assert_eq!(
            named_files(&records(&["M\tfoo.txt"])).unwrap(),
            "Update foo.txt"
        );
    }

    #[test]
    fn names_mixed_batch() {
        assert_eq!(
            named_files(&records(&["M\tfoo.txt", "D\tbar.txt"])).unwrap(),
            "Various changes to foo.txt and bar.txt"
        );
    }

    #[test]
    fn unknown_uniform_action_is_various() {
        assert_eq!(
            named_files(&records(&["C\tfoo.txt", "C\tbar.txt"])).unwrap(),
            "Various changes to foo.txt and bar.txt"
        );
    }

    #[test]
    fn named_files_rejects_empty_batch() {
        assert!(matches!(named_files(&[]), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn composes_by_batch_size() {
        let changes = records(&["M\ta.txt", "M\tb.txt", "D\tc.txt", "A\td.txt"]);

        assert_eq!(
            compose_message(&changes[..1], 3).unwrap(),
            "Update a.txt"
        );
        assert_eq!(
            compose_message(&changes[..3], 3).unwrap(),
            "Various changes to a.txt, b.txt and c.txt"
        );
        assert_eq!(
            compose_message(&changes, 3).unwrap(),
            "Update 2 files, delete 1 file and create 1 file"
        );
        assert!(matches!(
            compose_message(&[], 3),
            Err(AppError::InvalidInput(_))
        ));
    }
}
