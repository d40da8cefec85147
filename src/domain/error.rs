use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("End date must not precede start date")]
    InvalidDateRange,
    #[error("Car is not available for the requested period")]
    CarUnavailable,
    #[error("Internal error: {0}")]
    Internal(String),
}
