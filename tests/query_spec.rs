use chrono::{DateTime, Utc};
use speculate2::speculate;
use taskmaster::models::*;
use taskmaster::query::{collect_stats, filter_tasks, is_overdue, SortKey, TaskQuery};
use uuid::Uuid;

fn at(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid test date")
}

fn task(title: &str, status: TaskStatus, priority: TaskPriority, due: Option<&str>) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        status,
        priority,
        due_date: due.map(at),
        tags: None,
        created_at: at("2024-01-01T00:00:00Z"),
        updated_at: at("2024-01-01T00:00:00Z"),
    }
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

speculate! {
    describe "the reference collection" {
        // An open high-priority task with no deadline, a finished
        // low-priority task long past its date, and an in-progress task
        // due far in the future.
        before {
            let tasks = vec![
                task("Fix bug", TaskStatus::Todo, TaskPriority::High, None),
                task("Pay invoice", TaskStatus::Done, TaskPriority::Low, Some("2000-01-01T00:00:00Z")),
                task("Plan trip", TaskStatus::InProgress, TaskPriority::Medium, Some("2999-01-01T00:00:00Z")),
            ];
            let now = at("2024-01-01T00:00:00Z");
        }

        it "has no overdue tasks" {
            assert_eq!(collect_stats(&tasks, now).overdue, 0);
        }

        it "orders by priority rank when asked" {
            let query = TaskQuery { sort: SortKey::Priority, ..Default::default() };
            assert_eq!(
                titles(&query.apply(&tasks)),
                vec!["Fix bug", "Plan trip", "Pay invoice"]
            );
        }

        it "keeps every task when no constraint is supplied" {
            let query = TaskQuery::default();
            assert_eq!(query.apply(&tasks).len(), tasks.len());
        }

        it "sums per-field counts to the collection size" {
            let stats = collect_stats(&tasks, now);
            let by_status: u64 = stats.status.iter().map(|s| s.count).sum();
            let by_priority: u64 = stats.priority.iter().map(|p| p.count).sum();
            assert_eq!(by_status, tasks.len() as u64);
            assert_eq!(by_priority, tasks.len() as u64);
        }
    }

    describe "filtering" {
        it "is idempotent" {
            let tasks = vec![
                task("a", TaskStatus::Todo, TaskPriority::High, None),
                task("b", TaskStatus::Done, TaskPriority::High, None),
                task("c", TaskStatus::Todo, TaskPriority::Low, None),
            ];

            let once = filter_tasks(&tasks, Some(TaskStatus::Todo), None, None);
            let twice = filter_tasks(&once, Some(TaskStatus::Todo), None, None);

            let ids = |ts: &[Task]| ts.iter().map(|t| t.id).collect::<Vec<_>>();
            assert_eq!(ids(&once), ids(&twice));
        }

        it "returns empty for unsatisfiable conjunctions" {
            let tasks = vec![
                task("a", TaskStatus::Todo, TaskPriority::Low, None),
                task("b", TaskStatus::Done, TaskPriority::Medium, None),
            ];

            let matched = filter_tasks(
                &tasks,
                Some(TaskStatus::Done),
                Some(TaskPriority::High),
                None,
            );
            assert!(matched.is_empty());
        }

        it "combines field constraints with a search term" {
            let mut urgent = task("Fix login bug", TaskStatus::Todo, TaskPriority::High, None);
            urgent.tags = Some("auth".to_string());
            let tasks = vec![
                urgent,
                task("Fix logout bug", TaskStatus::Done, TaskPriority::High, None),
                task("Refactor auth", TaskStatus::Todo, TaskPriority::Low, None),
            ];

            let matched = filter_tasks(&tasks, Some(TaskStatus::Todo), None, Some("auth"));
            assert_eq!(titles(&matched), vec!["Fix login bug", "Refactor auth"]);
        }
    }

    describe "the overdue classifier" {
        it "agrees between row flags and the aggregate count" {
            let now = at("2024-06-01T00:00:00Z");
            let tasks = vec![
                task("late", TaskStatus::Todo, TaskPriority::High, Some("2024-01-01T00:00:00Z")),
                task("also late", TaskStatus::InProgress, TaskPriority::Low, Some("2023-01-01T00:00:00Z")),
                task("settled", TaskStatus::Done, TaskPriority::Low, Some("2023-01-01T00:00:00Z")),
                task("undated", TaskStatus::Todo, TaskPriority::Medium, None),
                task("upcoming", TaskStatus::Todo, TaskPriority::Medium, Some("2025-01-01T00:00:00Z")),
            ];

            let flagged = tasks.iter().filter(|t| is_overdue(t, now)).count() as u64;
            assert_eq!(flagged, 2);
            assert_eq!(collect_stats(&tasks, now).overdue, flagged);
        }

        it "is a pure function of task and instant" {
            let t = task("late", TaskStatus::Todo, TaskPriority::High, Some("2024-01-01T00:00:00Z"));
            assert!(is_overdue(&t, at("2024-06-01T00:00:00Z")));
            assert!(!is_overdue(&t, at("2023-06-01T00:00:00Z")));
        }
    }

    describe "date ordering" {
        it "places undated tasks after every dated one" {
            let tasks = vec![
                task("undated", TaskStatus::Todo, TaskPriority::Medium, None),
                task("march", TaskStatus::Todo, TaskPriority::Medium, Some("2024-03-01T00:00:00Z")),
                task("january", TaskStatus::Todo, TaskPriority::Medium, Some("2024-01-01T00:00:00Z")),
            ];

            let query = TaskQuery { sort: SortKey::Date, ..Default::default() };
            assert_eq!(
                titles(&query.apply(&tasks)),
                vec!["january", "march", "undated"]
            );
        }
    }
}
