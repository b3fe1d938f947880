use thiserror::Error;

/// All possible errors in the task store
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task #{0} not found")]
    TaskNotFound(i64),

    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Invalid due date {0:?}, expected YYYY-MM-DD")]
    InvalidDueDate(String),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TaskError>;
