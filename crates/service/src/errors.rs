use thiserror::Error;

use crate::catalog::repository::RepoError;

/// Failure taxonomy of the catalog; each variant maps to exactly one HTTP status.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Message safe to hand to a client. Internal causes are replaced.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(m) | ServiceError::NotFound(m) | ServiceError::Conflict(m) => m.clone(),
            ServiceError::Db(_) => "internal server error".into(),
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(m) => ServiceError::Validation(m),
            models::errors::ModelError::Db(e) => ServiceError::Db(e.to_string()),
        }
    }
}

/// Fallback mapping; call sites that know which constraint fired map it themselves.
impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::UniqueViolation(_) | RepoError::ForeignKeyViolation(_) => {
                ServiceError::Conflict("conflicting record".into())
            }
            RepoError::NotFound => ServiceError::NotFound("record not found".into()),
            RepoError::Invalid(m) => ServiceError::Validation(m),
            RepoError::Db(m) => ServiceError::Db(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_are_not_exposed() {
        let e = ServiceError::Db("relation \"store\" does not exist".into());
        assert_eq!(e.public_message(), "internal server error");
    }

    #[test]
    fn not_found_helper_message() {
        assert_eq!(ServiceError::not_found("store").public_message(), "store not found");
    }

    #[test]
    fn repo_errors_fallback_mapping() {
        assert!(matches!(ServiceError::from(RepoError::UniqueViolation("x".into())), ServiceError::Conflict(_)));
        assert!(matches!(ServiceError::from(RepoError::NotFound), ServiceError::NotFound(_)));
        assert!(matches!(ServiceError::from(RepoError::Db("x".into())), ServiceError::Db(_)));
    }
}
