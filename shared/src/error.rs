use thiserror::Error;

/// Client input errors. The display texts are part of the HTTP contract and
/// are returned verbatim in `{ "error": ... }` bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid description provided.")]
    InvalidDescription,

    #[error("Invalid priority provided.")]
    InvalidPriority,

    #[error("Invalid dueDate provided.")]
    InvalidDueDate,

    #[error("Invalid id provided.")]
    InvalidId,
}

impl ValidationError {
    /// Checks a path identifier for the edit and delete operations.
    pub fn check_id(id: Option<&str>) -> Result<&str, Self> {
        match id {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(Self::InvalidId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_http_contract() {
        assert_eq!(
            ValidationError::InvalidDescription.to_string(),
            "Invalid description provided."
        );
        assert_eq!(
            ValidationError::InvalidPriority.to_string(),
            "Invalid priority provided."
        );
        assert_eq!(
            ValidationError::InvalidDueDate.to_string(),
            "Invalid dueDate provided."
        );
        assert_eq!(ValidationError::InvalidId.to_string(), "Invalid id provided.");
    }

    #[test]
    fn check_id_rejects_missing_and_blank() {
        assert_eq!(ValidationError::check_id(None), Err(ValidationError::InvalidId));
        assert_eq!(ValidationError::check_id(Some("")), Err(ValidationError::InvalidId));
        assert_eq!(ValidationError::check_id(Some("  ")), Err(ValidationError::InvalidId));
        assert_eq!(ValidationError::check_id(Some("abc")), Ok("abc"));
    }
}
