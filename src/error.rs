use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Domain rule violated: {0}")]
    DomainValidation(String),
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
    #[error("Invalid branch hours: close ({close_minutes} min) must be after open ({open_minutes} min)")]
    InvalidBranchHours { open_minutes: u32, close_minutes: u32 },
    #[error("Session generation failed: {0}")]
    Generation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Internal error")]
    Internal,
}
