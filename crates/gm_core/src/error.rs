use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Roster is locked")]
    RosterLocked,

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl CoreError {
    /// True when re-attempting the same action may succeed without user changes.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CoreError::Persistence(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
