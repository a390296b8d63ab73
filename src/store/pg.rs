use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Article, ArticleStore, NewUser, StoreError, User, UserStore};

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, username, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl ArticleStore for PgStore {
    async fn insert_article(
        &self,
        title: &str,
        body: &str,
        author: &str,
    ) -> Result<Article, StoreError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (id, title, body, author, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, body, author, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(body)
        .bind(author)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await?;
        Ok(article)
    }

    async fn article(&self, id: Uuid) -> Result<Option<Article>, StoreError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, body, author, created_at
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(article)
    }

    async fn list_all(&self) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, body, author, created_at
            FROM articles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_by_author(&self, author: &str) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, body, author, created_at
            FROM articles
            WHERE author = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_article(
        &self,
        id: Uuid,
        title: &str,
        body: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = $2, body = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(body)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_article(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query(r#"DELETE FROM articles WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
