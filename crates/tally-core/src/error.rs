use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid priority '{0}' (expected high, medium or low)")]
    InvalidPriority(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("unknown filter mode '{0}' (expected all, today, overdue or completed)")]
    UnknownFilter(String),

    #[error("unknown sort mode '{0}' (expected manual, date or priority)")]
    UnknownSort(String),

    #[error("task text cannot be empty")]
    EmptyText,
}
