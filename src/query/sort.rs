use crate::models::Task;

/// Ordering applied to a filtered task set.
///
/// `Natural` keeps the snapshot order, most recently created first. The
/// other keys are stable sorts: ties keep their relative snapshot order,
/// so repeated queries over the same data return identical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Natural,
    /// Ascending by due date; tasks without one sort after all dated tasks.
    Date,
    /// By urgency rank: high, then medium, then low.
    Priority,
    /// By workflow rank: todo, then in-progress, then done.
    Status,
}

impl SortKey {
    /// Parse a `sort` request parameter.
    ///
    /// Anything unrecognized falls back to the natural order rather than
    /// erroring; an unknown sort key is a no-op, not a client mistake.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("date") => Self::Date,
            Some("priority") => Self::Priority,
            Some("status") => Self::Status,
            _ => Self::Natural,
        }
    }
}

/// Order tasks in place by the given key. All sorts are stable.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::Natural => {}
        // A missing due date sorts as "latest": after every dated task.
        SortKey::Date => tasks.sort_by_key(|t| (t.due_date.is_none(), t.due_date)),
        SortKey::Priority => tasks.sort_by_key(|t| t.priority.rank()),
        SortKey::Status => tasks.sort_by_key(|t| t.status.rank()),
    }
}
