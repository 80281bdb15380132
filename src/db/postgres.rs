use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::{FridgeEntry, ShoppingListEntry, User, UserMutation},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

const USER_COLUMNS: &str =
    "id, username, email, fridge, shopping_list, saved_recipes, created_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    fridge: Json<Vec<FridgeEntry>>,
    shopping_list: Json<Vec<ShoppingListEntry>>,
    saved_recipes: Json<Vec<u64>>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            fridge: row.fridge.0,
            shopping_list: row.shopping_list.0,
            saved_recipes: row.saved_recipes.0,
            created_at: row.created_at,
        }
    }
}

/// User store backed by the `users` table
///
/// The owned collections are JSONB columns. Updates lock the row, apply the
/// mutation in Rust and write the collections back in one transaction.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, username: &str, email: &str) -> AppResult<User> {
        let user = User::new(username, email);

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, fridge, shopping_list, saved_recipes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(Json(&user.fridge))
        .bind(Json(&user.shopping_list))
        .bind(Json(&user.saved_recipes))
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Username or email already registered".to_string())
            }
            other => AppError::Database(other),
        })?;

        tracing::info!(username = %user.username, user_id = %user.id, "User created");

        Ok(user)
    }

    async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn update_user(&self, username: &str, mutation: UserMutation) -> AppResult<User> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "SELECT {} FROM users WHERE username = $1 FOR UPDATE",
            USER_COLUMNS
        );
        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(username)
            .fetch_optional(&mut *tx)
            .await?;

        let mut user: User = row
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?
            .into();

        user.apply(mutation);

        sqlx::query(
            r#"
            UPDATE users
            SET fridge = $2, shopping_list = $3, saved_recipes = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(Json(&user.fridge))
        .bind(Json(&user.shopping_list))
        .bind(Json(&user.saved_recipes))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }
}
