use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// User record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string, never exposed in JSON
    pub created_at: OffsetDateTime,
}

/// Article record as persisted. `author` is the creator's username, written
/// once at creation and never touched by updates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: OffsetDateTime,
}

/// Fields supplied when registering a user. The password arrives pre-hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Duplicate usernames are accepted; the store does
    /// not enforce uniqueness.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn insert_article(
        &self,
        title: &str,
        body: &str,
        author: &str,
    ) -> Result<Article, StoreError>;

    async fn article(&self, id: Uuid) -> Result<Option<Article>, StoreError>;

    /// All articles, newest first.
    async fn list_all(&self) -> Result<Vec<Article>, StoreError>;

    /// Articles by one author, newest first.
    async fn list_by_author(&self, author: &str) -> Result<Vec<Article>, StoreError>;

    /// Replace title and body. Returns false when the id does not exist.
    async fn update_article(&self, id: Uuid, title: &str, body: &str)
        -> Result<bool, StoreError>;

    /// Delete by id. Idempotent: a missing id is not an error.
    async fn delete_article(&self, id: Uuid) -> Result<(), StoreError>;
}
