use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}

pub(crate) const MAX_NAME_LEN: usize = 128;

/// Names are required and must fit the `varchar(128)` columns.
pub(crate) fn require_name(entity: &str, name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation(format!("{entity} name required")));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ModelError::Validation(format!("{entity} name longer than {MAX_NAME_LEN} characters")));
    }
    Ok(())
}
