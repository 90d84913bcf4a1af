use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

/// Process-local user store.
///
/// Uniqueness is checked under the write lock, so concurrent inserts of the
/// same username resolve to exactly one record.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    users: Vec<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let mut state = self.state.write().await;

        if state.users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken(user.username.as_str().to_string()));
        }

        state.last_id += 1;
        let created = User {
            id: UserId(state.last_id),
            username: user.username,
            password_hash: user.password_hash,
        };
        state.users.push(created.clone());

        Ok(created)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Vec<User>, AuthError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .iter()
            .filter(|u| &u.username == username)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: Username::new(name.to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository.create(new_user("sue")).await.unwrap();
        let second = repository.create(new_user("bob")).await.unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate() {
        let repository = InMemoryUserRepository::new();

        repository.create(new_user("sue")).await.unwrap();
        let result = repository.create(new_user("sue")).await;

        assert!(matches!(result, Err(AuthError::UsernameTaken(_))));
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("sue")).await.unwrap();

        let sue = Username::new("sue".to_string()).unwrap();
        let upper = Username::new("SUE".to_string()).unwrap();

        assert_eq!(repository.find_by_username(&sue).await.unwrap().len(), 1);
        assert!(repository.find_by_username(&upper).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_one_record() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.create(new_user("sue")).await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                created += 1;
            }
        }

        let sue = Username::new("sue".to_string()).unwrap();
        assert_eq!(created, 1);
        assert_eq!(repository.find_by_username(&sue).await.unwrap().len(), 1);
    }
}
