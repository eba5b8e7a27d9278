use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::is_overdue;
use crate::models::{Task, TaskPriority, TaskStatus};

/// Aggregate counts over the full task collection.
///
/// Only statuses and priorities actually present in the data appear;
/// there is no zero-filling for absent values. Entries are listed in
/// rank order so the output is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStats {
    pub status: Vec<StatusCount>,
    pub priority: Vec<PriorityCount>,
    pub overdue: u64,
}

/// Occurrence count for one observed status value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: u64,
}

/// Occurrence count for one observed priority value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityCount {
    pub priority: TaskPriority,
    pub count: u64,
}

/// Count tasks by status, by priority, and overdue against `now`.
///
/// An empty collection yields empty count lists and a zero overdue count.
pub fn collect_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let status = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done]
        .into_iter()
        .filter_map(|s| {
            let count = tasks.iter().filter(|t| t.status == s).count() as u64;
            (count > 0).then_some(StatusCount { status: s, count })
        })
        .collect();

    let priority = [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low]
        .into_iter()
        .filter_map(|p| {
            let count = tasks.iter().filter(|t| t.priority == p).count() as u64;
            (count > 0).then_some(PriorityCount { priority: p, count })
        })
        .collect();

    let overdue = tasks.iter().filter(|t| is_overdue(t, now)).count() as u64;

    TaskStats {
        status,
        priority,
        overdue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn task(status: TaskStatus, priority: TaskPriority, due: Option<&str>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Task".to_string(),
            description: None,
            status,
            priority,
            due_date: due.map(|d| d.parse().expect("valid test date")),
            tags: None,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn empty_collection_yields_empty_stats() {
        let stats = collect_stats(&[], "2024-01-01T00:00:00Z".parse().unwrap());
        assert!(stats.status.is_empty());
        assert!(stats.priority.is_empty());
        assert_eq!(stats.overdue, 0);
    }

    #[test]
    fn counts_sum_to_collection_size() {
        let tasks = vec![
            task(TaskStatus::Todo, TaskPriority::High, None),
            task(TaskStatus::Todo, TaskPriority::Low, None),
            task(TaskStatus::InProgress, TaskPriority::Medium, None),
            task(TaskStatus::Done, TaskPriority::High, None),
            task(TaskStatus::Done, TaskPriority::High, None),
        ];
        let stats = collect_stats(&tasks, "2024-01-01T00:00:00Z".parse().unwrap());

        let status_total: u64 = stats.status.iter().map(|s| s.count).sum();
        let priority_total: u64 = stats.priority.iter().map(|p| p.count).sum();
        assert_eq!(status_total, tasks.len() as u64);
        assert_eq!(priority_total, tasks.len() as u64);
    }

    #[test]
    fn absent_values_are_not_zero_filled() {
        let tasks = vec![
            task(TaskStatus::Todo, TaskPriority::High, None),
            task(TaskStatus::Todo, TaskPriority::High, None),
        ];
        let stats = collect_stats(&tasks, "2024-01-01T00:00:00Z".parse().unwrap());

        assert_eq!(stats.status.len(), 1);
        assert_eq!(stats.status[0].status, TaskStatus::Todo);
        assert_eq!(stats.status[0].count, 2);

        assert_eq!(stats.priority.len(), 1);
        assert_eq!(stats.priority[0].priority, TaskPriority::High);
    }

    #[test]
    fn overdue_count_uses_the_shared_classifier() {
        // A done task with a past date, a future date, and no date at all:
        // none of them count.
        let tasks = vec![
            task(TaskStatus::Todo, TaskPriority::High, None),
            task(TaskStatus::Done, TaskPriority::Low, Some("2000-01-01T00:00:00Z")),
            task(TaskStatus::InProgress, TaskPriority::Medium, Some("2999-01-01T00:00:00Z")),
        ];
        let stats = collect_stats(&tasks, "2024-01-01T00:00:00Z".parse().unwrap());
        assert_eq!(stats.overdue, 0);

        let tasks = vec![
            task(TaskStatus::Todo, TaskPriority::High, Some("2023-12-31T00:00:00Z")),
            task(TaskStatus::InProgress, TaskPriority::Low, Some("2023-06-01T00:00:00Z")),
        ];
        let stats = collect_stats(&tasks, "2024-01-01T00:00:00Z".parse().unwrap());
        assert_eq!(stats.overdue, 2);
    }
}
