pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::InMemoryUserStore;
pub use postgres::{create_pool, PgUserStore};
pub use self::redis::{create_redis_client, ApiUsage};

use crate::{
    error::AppResult,
    models::{User, UserMutation},
};

/// Persistence for users and the collections they own
///
/// Lookups are keyed by username. Every store applies mutations through
/// `User::apply`, so fridge merging and saved-recipe set semantics are identical
/// across implementations.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user; fails with `Conflict` if the username or email is taken
    async fn create_user(&self, username: &str, email: &str) -> AppResult<User>;

    async fn find_user(&self, username: &str) -> AppResult<Option<User>>;

    /// Applies `mutation` and returns the updated user; `NotFound` for unknown usernames
    async fn update_user(&self, username: &str, mutation: UserMutation) -> AppResult<User>;
}
