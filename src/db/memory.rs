use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::{User, UserMutation},
};

/// User store held in process memory
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, username: &str, email: &str) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(username) || users.values().any(|u| u.email == email) {
            return Err(AppError::Conflict(
                "Username or email already registered".to_string(),
            ));
        }

        let user = User::new(username, email);
        users.insert(username.to_string(), user.clone());
        Ok(user)
    }

    async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn update_user(&self, username: &str, mutation: UserMutation) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(username)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

        user.apply(mutation);
        Ok(user.clone())
    }
}
