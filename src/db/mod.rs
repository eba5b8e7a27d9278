mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::*;
use crate::query::{self, TaskQuery, TaskStats};

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "taskmaster")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("taskmaster.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Task operations
    // ============================================================

    /// The full collection in natural order: most recently created first.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, description, status, priority, due_date, tags, created_at, updated_at
             FROM tasks ORDER BY created_at DESC",
        )?;

        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    pub fn get_task(&self, id: Uuid) -> Result<Option<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, description, status, priority, due_date, tags, created_at, updated_at
             FROM tasks WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(task_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn create_task(&self, input: CreateTaskInput) -> Result<Task> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO tasks (id, title, description, status, priority, due_date, tags, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.title,
                &input.description,
                input.status.as_str(),
                input.priority.as_str(),
                input.due_date.map(|d| d.to_rfc3339()),
                &input.tags,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Task {
            id,
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Full replace of the business fields. `created_at` survives; the
    /// complete transition has its own operation.
    pub fn update_task(&self, id: Uuid, input: UpdateTaskInput) -> Result<Option<Task>> {
        let Some(existing) = self.get_task(id)? else {
            return Ok(None);
        };

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "UPDATE tasks SET title = ?, description = ?, status = ?, priority = ?, due_date = ?, tags = ?, updated_at = ? WHERE id = ?",
            (
                &input.title,
                &input.description,
                input.status.as_str(),
                input.priority.as_str(),
                input.due_date.map(|d| d.to_rfc3339()),
                &input.tags,
                now.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        Ok(Some(Task {
            id,
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
            tags: input.tags,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    /// Status-only transition to done.
    pub fn complete_task(&self, id: Uuid) -> Result<Option<Task>> {
        let Some(existing) = self.get_task(id)? else {
            return Ok(None);
        };

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "UPDATE tasks SET status = 'done', updated_at = ? WHERE id = ?",
            (now.to_rfc3339(), id.to_string()),
        )?;

        Ok(Some(Task {
            status: TaskStatus::Done,
            updated_at: now,
            ..existing
        }))
    }

    pub fn delete_task(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM tasks WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Snapshot views
    // ============================================================

    /// Filtered, ordered view over the current snapshot.
    ///
    /// Selection and ordering run in [`crate::query`] over the
    /// natural-order snapshot rather than being pushed into SQL, so the
    /// list view, the search endpoint, and the stats share one set of
    /// predicates.
    pub fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        Ok(query.apply(&self.get_all_tasks()?))
    }

    /// Full-collection text search with no status/priority constraint.
    pub fn search_tasks(&self, term: &str) -> Result<Vec<Task>> {
        let tasks = self.get_all_tasks()?;
        Ok(query::filter_tasks(&tasks, None, None, Some(term)))
    }

    /// Aggregate counts over the full collection at `now`.
    pub fn task_stats(&self, now: DateTime<Utc>) -> Result<TaskStats> {
        Ok(query::collect_stats(&self.get_all_tasks()?, now))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: parse_uuid(row.get::<_, String>(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        // A row whose stored text no longer parses (edits outside this
        // process) falls back to the field default rather than failing
        // the whole query.
        status: TaskStatus::from_str(&row.get::<_, String>(3)?).unwrap_or_default(),
        priority: TaskPriority::from_str(&row.get::<_, String>(4)?).unwrap_or_default(),
        due_date: row.get::<_, Option<String>>(5)?.map(parse_datetime),
        tags: row.get(6)?,
        created_at: parse_datetime(row.get::<_, String>(7)?),
        updated_at: parse_datetime(row.get::<_, String>(8)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
