//! The task query and aggregation engine.
//!
//! Everything in this module is pure, synchronous computation over a task
//! snapshot plus an explicit `now` instant: the same inputs always produce
//! the same output. The persistence layer supplies the snapshot in natural
//! order (most recently created first); callers thread their filter and
//! sort parameters through [`TaskQuery`] instead of any ambient state.

mod filter;
mod sort;
mod stats;

pub use filter::{filter_tasks, matches_term};
pub use sort::{sort_tasks, SortKey};
pub use stats::{collect_stats, PriorityCount, StatusCount, TaskStats};

use chrono::{DateTime, Utc};

use crate::models::{Task, TaskPriority, TaskStatus};

/// A selection and ordering specification against a task snapshot.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    /// Exact status to keep. `None` places no constraint on the field.
    pub status: Option<TaskStatus>,
    /// Exact priority to keep. `None` places no constraint on the field.
    pub priority: Option<TaskPriority>,
    /// Free-text search term, matched per [`matches_term`]. Empty or
    /// whitespace-only terms filter nothing.
    pub term: Option<String>,
    pub sort: SortKey,
}

impl TaskQuery {
    /// Run the query: filter, then order.
    ///
    /// The snapshot's own order is the natural order, so
    /// [`SortKey::Natural`] leaves the filtered subset untouched.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        let mut matched = filter_tasks(tasks, self.status, self.priority, self.term.as_deref());
        sort_tasks(&mut matched, self.sort);
        matched
    }
}

/// Whether a task's deadline has passed.
///
/// True iff the task has a due date, is not done, and the due date is
/// strictly before `now`. A task due exactly at `now` or later is not
/// overdue, and a done task is never overdue regardless of its date.
///
/// This is the single overdue predicate: the row markers in the list
/// views and the aggregate count in [`collect_stats`] both go through it.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) => task.status != TaskStatus::Done && due < now,
        None => false,
    }
}
