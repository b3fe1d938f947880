use crate::error::{Result, TaskError};
use crate::models::{Priority, Task};
use crate::store::TaskStore;
use chrono::NaiveDate;
use std::path::Path;

fn open_store(db: Option<&Path>) -> Result<TaskStore> {
    match db {
        Some(path) => TaskStore::open(path),
        None => TaskStore::open_current_dir(),
    }
}

/// Validate a due date from the command line. Empty and whitespace-only
/// values mean "no due date"; anything else must be a real YYYY-MM-DD date.
fn normalize_due_date(due: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = due else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TaskError::InvalidDueDate(raw.to_string()))?;
    Ok(Some(date.format("%Y-%m-%d").to_string()))
}

/// Handle the add command
pub fn handle_add(
    db: Option<&Path>,
    title: &str,
    priority: Option<&str>,
    due: Option<&str>,
) -> Result<()> {
    let store = open_store(db)?;

    let priority = priority.map(Priority::from_label).unwrap_or_default();
    let due_date = normalize_due_date(due)?;

    let task = store.add_task(title, priority, due_date.as_deref())?;

    println!("Created task #{}: {}", task.id, task.title);
    println!("  Priority: {}", task.priority);
    if let Some(ref due) = task.due_date {
        println!("  Due:      {due}");
    }

    Ok(())
}

/// Handle the list command
pub fn handle_list(db: Option<&Path>, completed: bool, active: bool, json: bool) -> Result<()> {
    let store = open_store(db)?;

    let filter = if completed {
        Some(true)
    } else if active {
        Some(false)
    } else {
        None
    };

    let tasks = store.list(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    for task in &tasks {
        println!("  [#{:>3}] {} {}", task.id, task.icon(), format_line(task));
    }

    println!();
    println!("Legend: ✓ completed  ○ active");

    Ok(())
}

fn format_line(task: &Task) -> String {
    let mut line = format!("{:<8} {}", task.priority, task.title);
    if let Some(ref due) = task.due_date {
        if !due.is_empty() {
            line.push_str(&format!("  (due {due})"));
        }
    }
    line
}

/// Handle the toggle command
pub fn handle_toggle(db: Option<&Path>, id: i64) -> Result<()> {
    let store = open_store(db)?;

    if store.toggle_completed(id)? {
        println!("Completed task #{id}");
    } else {
        println!("Reopened task #{id}");
    }

    Ok(())
}

/// Handle the delete command
pub fn handle_delete(db: Option<&Path>, id: i64) -> Result<()> {
    let store = open_store(db)?;

    store.delete_task(id)?;
    println!("Deleted task #{id}");

    Ok(())
}

/// Handle the clear command
pub fn handle_clear(db: Option<&Path>) -> Result<()> {
    let store = open_store(db)?;

    store.delete_all()?;
    println!("Deleted all tasks");

    Ok(())
}
