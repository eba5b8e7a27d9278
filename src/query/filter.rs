use crate::models::{Task, TaskPriority, TaskStatus};

/// Keep the tasks satisfying every supplied constraint.
///
/// Constraints combine with AND; an absent constraint is vacuously true
/// for every task. An empty or whitespace-only term is treated as absent.
pub fn filter_tasks(
    tasks: &[Task],
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    term: Option<&str>,
) -> Vec<Task> {
    let term = term.map(str::trim).filter(|t| !t.is_empty());

    tasks
        .iter()
        .filter(|task| status.map_or(true, |s| task.status == s))
        .filter(|task| priority.map_or(true, |p| task.priority == p))
        .filter(|task| term.map_or(true, |t| matches_term(task, t)))
        .cloned()
        .collect()
}

/// Case-insensitive substring match against title, description, or tags.
///
/// A task matches when the term appears in any of the three fields;
/// absent fields never match.
pub fn matches_term(task: &Task, term: &str) -> bool {
    let needle = term.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    contains(&task.title)
        || task.description.as_deref().map_or(false, contains)
        || task.tags.as_deref().map_or(false, contains)
}
