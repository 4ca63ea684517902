use std::sync::Arc;

use crate::{EngineError, ResultEngine, User, password, repository::UserRepository};

use super::{EMAIL_ALREADY_REGISTERED, INVALID_PASSWORD, USER_NOT_FOUND_FOR_EMAIL};

/// Registration and authentication of users.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Return the user owning `email` if `password` matches its stored hash.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::info!(email, "authentication failed: unknown email");
            return Err(EngineError::Authentication(
                USER_NOT_FOUND_FOR_EMAIL.to_string(),
            ));
        };

        if !password::verify(password, &user.password)? {
            tracing::info!(email, "authentication failed: wrong password");
            return Err(EngineError::Authentication(INVALID_PASSWORD.to_string()));
        }

        Ok(user)
    }

    /// Fail if `email` already belongs to a user.
    pub async fn validate_email(&self, email: &str) -> ResultEngine<()> {
        if self.repository.exists_by_email(email).await? {
            return Err(EngineError::business(EMAIL_ALREADY_REGISTERED));
        }
        Ok(())
    }

    /// Register a user whose `password` is still plaintext.
    ///
    /// The returned user carries the generated id and the password hash.
    pub async fn save_user(&self, mut user: User) -> ResultEngine<User> {
        self.validate_email(&user.email).await?;
        user.password = password::hash(&user.password)?;

        let saved = self.repository.save(&user).await?;
        tracing::debug!(id = ?saved.id, "user registered");
        Ok(saved)
    }

    pub async fn find_by_id(&self, id: i64) -> ResultEngine<Option<User>> {
        self.repository.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct RecordingRepository {
        existing: Option<User>,
        saved: Mutex<Vec<User>>,
    }

    impl RecordingRepository {
        fn with_user(user: User) -> Self {
            Self {
                existing: Some(user),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl UserRepository for RecordingRepository {
        async fn save(&self, user: &User) -> ResultEngine<User> {
            self.saved.lock().unwrap().push(user.clone());
            let mut saved = user.clone();
            saved.id = Some(1);
            Ok(saved)
        }

        async fn exists_by_email(&self, email: &str) -> ResultEngine<bool> {
            Ok(self.existing.as_ref().is_some_and(|u| u.email == email))
        }

        async fn find_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
            Ok(self.existing.clone().filter(|u| u.email == email))
        }

        async fn find_by_id(&self, id: i64) -> ResultEngine<Option<User>> {
            Ok(self.existing.clone().filter(|u| u.id == Some(id)))
        }
    }

    fn stored_user(email: &str, plain_password: &str) -> User {
        User {
            id: Some(1),
            name: "user".to_string(),
            email: email.to_string(),
            password: password::hash(plain_password).unwrap(),
        }
    }

    #[tokio::test]
    async fn save_user_hashes_password() {
        let repository = Arc::new(RecordingRepository::default());
        let service = UserService::new(repository.clone());

        let saved = service
            .save_user(User::new("nome", "email@email.com", "senha"))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.name, "nome");
        assert_eq!(saved.email, "email@email.com");
        assert_ne!(saved.password, "senha");
        assert!(password::verify("senha", &saved.password).unwrap());
        assert_eq!(repository.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_user_rejects_taken_email() {
        let repository = Arc::new(RecordingRepository::with_user(stored_user(
            "email@email.com",
            "senha",
        )));
        let service = UserService::new(repository.clone());

        let err = service
            .save_user(User::new("other", "email@email.com", "123"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::BusinessRule(EMAIL_ALREADY_REGISTERED.to_string())
        );
        assert!(repository.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn authenticate_returns_user() {
        let service = UserService::new(Arc::new(RecordingRepository::with_user(stored_user(
            "email@email.com",
            "senha",
        ))));

        let user = service
            .authenticate("email@email.com", "senha")
            .await
            .unwrap();

        assert_eq!(user.id, Some(1));
    }

    #[tokio::test]
    async fn authenticate_unknown_email() {
        let service = UserService::new(Arc::new(RecordingRepository::default()));

        let err = service
            .authenticate("email@email.com", "senha")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::Authentication(USER_NOT_FOUND_FOR_EMAIL.to_string())
        );
    }

    #[tokio::test]
    async fn authenticate_wrong_password() {
        let service = UserService::new(Arc::new(RecordingRepository::with_user(stored_user(
            "email@email.com",
            "senha",
        ))));

        let err = service
            .authenticate("email@email.com", "123")
            .await
            .unwrap_err();

        assert_eq!(err, EngineError::Authentication(INVALID_PASSWORD.to_string()));
    }

    #[tokio::test]
    async fn validate_email() {
        let empty = UserService::new(Arc::new(RecordingRepository::default()));
        assert_eq!(empty.validate_email("email@email.com").await, Ok(()));

        let taken = UserService::new(Arc::new(RecordingRepository::with_user(stored_user(
            "email@email.com",
            "senha",
        ))));
        assert!(matches!(
            taken.validate_email("email@email.com").await,
            Err(EngineError::BusinessRule(_))
        ));
        assert_eq!(taken.validate_email("other@email.com").await, Ok(()));
    }
}
