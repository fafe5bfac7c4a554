use thiserror::Error;

/// Validation failure for a request body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must contain at least 1 character")]
    Empty { field: &'static str },
}

/// Request bodies that carry field constraints beyond their JSON shape
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn required_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub(crate) fn optional_non_empty(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(value) => required_non_empty(field, value),
        None => Ok(()),
    }
}
