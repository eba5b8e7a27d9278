//! Terminal rendering for the CLI list and stats views.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::models::{Task, TaskPriority, TaskStatus};
use crate::query::{is_overdue, TaskStats};

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::Grey,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Done => Color::Green,
    }
}

fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::High => Color::Red,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::Green,
    }
}

/// Create a table for displaying tasks. Overdue rows get a red due cell,
/// decided by the same classifier the stats use.
pub fn task_table(tasks: &[Task], now: DateTime<Utc>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new("Due").fg(Color::Cyan),
        Cell::new("Tags").fg(Color::Cyan),
    ]);

    for task in tasks {
        let overdue = is_overdue(task, now);

        let due = match task.due_date {
            Some(d) if overdue => format!("{} (overdue)", d.format("%Y-%m-%d %H:%M")),
            Some(d) => d.format("%Y-%m-%d %H:%M").to_string(),
            None => "-".to_string(),
        };
        let due_cell = if overdue {
            Cell::new(due).fg(Color::Red)
        } else {
            Cell::new(due)
        };

        let tags = match task.tags.as_deref() {
            Some(t) if !t.trim().is_empty() => {
                t.split(',').map(str::trim).collect::<Vec<_>>().join(", ")
            }
            _ => "-".to_string(),
        };

        table.add_row(vec![
            Cell::new(&task.title),
            Cell::new(task.status.label()).fg(status_color(task.status)),
            Cell::new(task.priority.label()).fg(priority_color(task.priority)),
            due_cell,
            Cell::new(tags),
        ]);
    }

    table
}

/// Print the filtered task list.
pub fn print_task_list(tasks: &[Task], now: DateTime<Utc>) {
    if tasks.is_empty() {
        println!("{}", "No tasks found".dimmed());
        return;
    }

    println!("{}", task_table(tasks, now));
}

/// Print the aggregate counts.
pub fn print_stats(stats: &TaskStats) {
    println!("{}", "By status".bold());
    if stats.status.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for entry in &stats.status {
        println!("  {:<12} {}", entry.status.label(), entry.count);
    }

    println!("{}", "By priority".bold());
    if stats.priority.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for entry in &stats.priority {
        println!("  {:<12} {}", entry.priority.label(), entry.count);
    }

    let overdue = if stats.overdue > 0 {
        stats.overdue.to_string().red().bold().to_string()
    } else {
        stats.overdue.to_string()
    };
    println!("{} {}", "Overdue:".bold(), overdue);
}
