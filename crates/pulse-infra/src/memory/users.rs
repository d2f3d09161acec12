//! In-memory user repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use pulse_core::domain::User;
use pulse_core::error::RepoError;
use pulse_core::ports::UserRepository;

/// User repository for when the database is not configured.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        // Uniqueness check and insert under one write lock.
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new("alice".to_string(), "hash".to_string()))
            .await
            .unwrap();

        assert_eq!(repo.find_by_id(user.id).await.unwrap().unwrap().username, "alice");
        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("alice".to_string(), "h1".to_string()))
            .await
            .unwrap();

        let result = repo
            .create(User::new("alice".to_string(), "h2".to_string()))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
