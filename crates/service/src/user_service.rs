use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use rand::rngs::OsRng;
use tracing::{info, instrument};

use models::user;
use crate::catalog::domain::{CreateUserInput, NewUser};
use crate::catalog::repository::{CatalogRepository, RepoError};
use crate::catalog::validation;
use crate::errors::ServiceError;

/// Signup and listing of users.
pub struct UserService {
    repo: Arc<dyn CatalogRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self { Self { repo } }

    /// Create a user. A duplicate email is a `Conflict` whether or not it
    /// was visible before the insert.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateUserInput) -> Result<user::Model, ServiceError> {
        let name = validation::non_blank(input.name.as_deref());
        let email = validation::non_blank(input.email.as_deref());
        let password = input.password.filter(|p| !p.is_empty());
        let (Some(name), Some(email), Some(password)) = (name, email, password) else {
            return Err(ServiceError::Validation("name, email and password are required".into()));
        };
        user::validate_email(&email)?;

        let password_hash = hash_password(&password)?;
        match self.repo.insert_user(NewUser { name, email, password_hash }).await {
            Ok(created) => {
                info!(user_id = created.id, "user_created");
                Ok(created)
            }
            Err(RepoError::UniqueViolation(_)) => Err(ServiceError::Conflict("email already registered".into())),
            Err(e) => Err(e.into()),
        }
    }

    /// All users, ordered by id ascending.
    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(self.repo.list_users().await?)
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Db(format!("password hashing failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog, user_input};

    #[tokio::test]
    async fn create_assigns_fresh_ids() -> Result<(), anyhow::Error> {
        let (_, users, _, _) = catalog();
        let a = users.create(user_input("Ana", "a@x.com")).await?;
        let b = users.create(user_input("Bea", "b@x.com")).await?;
        assert_eq!(a.id, 1);
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_first_user_survives() -> Result<(), anyhow::Error> {
        let (_, users, _, _) = catalog();
        let first = users.create(user_input("Ana", "a@x.com")).await?;
        let err = users.create(user_input("Bea", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let all = users.list().await?;
        assert_eq!(all, vec![first]);
        Ok(())
    }

    #[tokio::test]
    async fn password_is_stored_hashed() -> Result<(), anyhow::Error> {
        let (_, users, _, _) = catalog();
        let u = users.create(user_input("Ana", "a@x.com")).await?;
        assert_ne!(u.password, "p");
        assert!(u.password.starts_with("$argon2"));
        let json = serde_json::to_value(&u)?;
        assert!(json.get("password").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let (_, users, _, _) = catalog();
        let input = CreateUserInput { name: Some("Ana".into()), email: None, password: Some("p".into()) };
        assert!(matches!(users.create(input).await, Err(ServiceError::Validation(_))));

        let bad_email = user_input("Ana", "not-an-email");
        assert!(matches!(users.create(bad_email).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() -> Result<(), anyhow::Error> {
        let (_, users, _, _) = catalog();
        for i in 0..3 {
            users.create(user_input("U", &format!("u{i}@x.com"))).await?;
        }
        let ids: Vec<i32> = users.list().await?.into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn persistence_failure_is_internal() {
        let (repo, users, _, _) = catalog();
        repo.set_fail_all(true);
        let err = users.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert_eq!(err.public_message(), "internal server error");
    }
}
