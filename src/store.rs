use crate::error::{Result, TaskError};
use crate::models::{Priority, Task};
use rusqlite::{Connection, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};

/// Default backing file name
pub const DEFAULT_DB_NAME: &str = "tasks.db";

/// Suffix appended to an incompatible database when it is set aside
const BACKUP_SUFFIX: &str = ".backup";

/// Columns every compatible database must expose
const TASK_COLUMNS: &str = "id, title, priority, due_date, completed";

/// Durable task store backed by a single SQLite file.
///
/// Every mutation commits before the call returns; every listing re-reads
/// from the file. One store instance owns the file exclusively.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Open the store at the given path.
    ///
    /// If a file already exists there it is probed for the expected record
    /// shape. An incompatible file is renamed to `<path>.backup` (replacing
    /// any previous backup) and a fresh database is created in its place;
    /// the stored data is not repaired or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() && !probe_schema(path) {
            back_up_legacy(path)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let store = TaskStore { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open the store in the current directory (tasks.db)
    pub fn open_current_dir() -> Result<Self> {
        Self::open(DEFAULT_DB_NAME)
    }

    /// Open an in-memory store for testing
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = TaskStore { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 2,
                due_date TEXT,
                completed INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;
        Ok(())
    }

    // ==================== Task Operations ====================

    /// Create a new task. Titles must be non-empty; whitespace-only titles
    /// are rejected. The new task starts out not completed.
    pub fn add_task(
        &self,
        title: &str,
        priority: Priority,
        due_date: Option<&str>,
    ) -> Result<Task> {
        if title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }

        self.conn.execute(
            "INSERT INTO tasks (title, priority, due_date, completed) VALUES (?1, ?2, ?3, 0)",
            (title, priority.ordinal(), due_date),
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_task(id)?.ok_or(TaskError::TaskNotFound(id))
    }

    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                [id],
                task_from_row,
            )
            .optional()
            .map_err(|e| e.into())
    }

    /// Flip a task between active and completed, returning the new state.
    /// A missing id reports `TaskNotFound` and mutates nothing.
    pub fn toggle_completed(&self, id: i64) -> Result<bool> {
        let current: Option<bool> = self
            .conn
            .query_row("SELECT completed FROM tasks WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;

        let current = current.ok_or(TaskError::TaskNotFound(id))?;
        let next = !current;

        self.conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2",
            (next, id),
        )?;
        Ok(next)
    }

    /// Remove a task. Removing an id that does not exist is a no-op.
    pub fn delete_task(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Remove every task unconditionally
    pub fn delete_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM tasks", [])?;
        Ok(())
    }

    /// List tasks, optionally filtered by completion state.
    ///
    /// Ordered by priority (High first), then due date (no due date sorts
    /// before any date), then title, with id as the stable tie-breaker.
    pub fn list(&self, filter_completed: Option<bool>) -> Result<Vec<Task>> {
        let order = "ORDER BY priority, due_date, title, id";

        let mut tasks = Vec::new();
        match filter_completed {
            Some(completed) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {TASK_COLUMNS} FROM tasks WHERE completed = ?1 {order}"
                ))?;
                let rows = stmt.query_map([completed], task_from_row)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks {order}"))?;
                let rows = stmt.query_map([], task_from_row)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
        }
        Ok(tasks)
    }

    /// Release the backing file. Consumes the store, so any use after close
    /// is rejected at compile time.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

/// Minimal read against the expected record shape. Any failure (missing
/// table, missing columns, not a SQLite file at all) marks the file
/// incompatible.
fn probe_schema(path: &Path) -> bool {
    let Ok(conn) = Connection::open(path) else {
        return false;
    };
    let ok = conn
        .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks LIMIT 1"))
        .is_ok();
    ok
}

/// Set an incompatible database aside as `<path>.backup`, replacing any
/// previous backup. Only the most recent legacy file is preserved.
fn back_up_legacy(path: &Path) -> Result<()> {
    let backup = backup_path(path);
    if backup.exists() {
        fs::remove_file(&backup)?;
    }
    fs::rename(path, &backup)?;

    tracing::warn!(
        db = %path.display(),
        backup = %backup.display(),
        "incompatible task database detected, moved aside and recreating"
    );
    Ok(())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

// ==================== Row Parser ====================

fn task_from_row(row: &Row) -> std::result::Result<Task, rusqlite::Error> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        priority: Priority::from_ordinal(row.get(2)?),
        due_date: row.get(3)?,
        completed: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let store = TaskStore::open_in_memory().unwrap();
        let task = store.add_task("Write report", Priority::High, None).unwrap();
        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, Priority::High);
        assert!(!task.completed);
        assert!(task.due_date.is_none());

        let fetched = store.get_task(task.id).unwrap().unwrap();
        assert_eq!(fetched, task);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let store = TaskStore::open_in_memory().unwrap();
        let a = store.add_task("a", Priority::Medium, None).unwrap();
        let b = store.add_task("b", Priority::Medium, None).unwrap();
        assert!(b.id > a.id);

        // A deleted id is never reused
        store.delete_task(b.id).unwrap();
        let c = store.add_task("c", Priority::Medium, None).unwrap();
        assert!(c.id > b.id);
    }

    #[test]
    fn test_empty_title_rejected() {
        let store = TaskStore::open_in_memory().unwrap();
        assert!(matches!(
            store.add_task("", Priority::Medium, None),
            Err(TaskError::EmptyTitle)
        ));
        assert!(matches!(
            store.add_task("   ", Priority::Medium, None),
            Err(TaskError::EmptyTitle)
        ));
        assert!(store.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_stored_out_of_range_priority_reads_as_medium() {
        let store = TaskStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO tasks (title, priority, completed) VALUES ('legacy', 9, 0)",
                [],
            )
            .unwrap();

        let tasks = store.list(None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority, Priority::Medium);
    }

    #[test]
    fn test_close() {
        let store = TaskStore::open_in_memory().unwrap();
        store.add_task("x", Priority::Low, None).unwrap();
        assert!(store.close().is_ok());
    }
}
