use sakhi_core::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The submitted draft failed form validation. Carries the full
    /// field→message map so callers can render every violation at once.
    #[error("invalid {what}: {} field(s) rejected", .errors.len())]
    Validation {
        what: &'static str,
        errors: FieldErrors,
    },
    /// No record of the given kind with the given id is visible to the
    /// calling session.
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
