use indexmap::IndexMap;

use crate::domain::action::{Action, classify_move};
use crate::domain::change::ChangeRecord;
use crate::domain::path::human_list;
use crate::error::AppResult;

/// File counts keyed by action label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionCountMap(IndexMap<String, usize>);

impl ActionCountMap {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }

    fn record(&mut self, label: &str) {
        *self.0.entry(label.to_string()).or_insert(0) += 1;
    }
}

/// Label a change by action, or by move/rename kind for renames.
pub fn change_label(change: &ChangeRecord) -> &'static str {
    match (change.action(), change.to_path()) {
        (Action::Rename, Some(to)) => classify_move(change.from_path(), to).as_str(),
        (action, _) => action.as_str(),
    }
}

pub fn count_by_action(changes: &[ChangeRecord]) -> ActionCountMap {
    let mut counts = ActionCountMap::default();
    for change in changes {
        counts.record(change_label(change));
    }
    counts
}

pub fn format_one(label: &str, count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{label} {count} file{plural}")
}

/// e.g. "update 3 files and delete 2 files". Empty counts give an empty message.
pub fn count_by_action_msg(counts: &ActionCountMap) -> AppResult<String> {
    if counts.is_empty() {
        return Ok(String::new());
    }

    let parts = counts
        .iter()
        .map(|(label, count)| format_one(label, count))
        .collect::<Vec<_>>();
    human_list(&parts)
}
