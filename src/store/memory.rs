use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Article, ArticleStore, NewUser, StoreError, User, UserStore};

/// In-process store. Serves local runs without a database and the test
/// suite. Records live in insertion order; listings iterate in reverse to
/// match the Postgres backend's newest-first ordering.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    articles: RwLock<Vec<Article>>,
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.write().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn insert_article(
        &self,
        title: &str,
        body: &str,
        author: &str,
    ) -> Result<Article, StoreError> {
        let article = Article {
            id: Uuid::new_v4(),
            title: title.to_string(),
            body: body.to_string(),
            author: author.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.articles.write().unwrap().push(article.clone());
        Ok(article)
    }

    async fn article(&self, id: Uuid) -> Result<Option<Article>, StoreError> {
        let articles = self.articles.read().unwrap();
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Article>, StoreError> {
        let articles = self.articles.read().unwrap();
        Ok(articles.iter().rev().cloned().collect())
    }

    async fn list_by_author(&self, author: &str) -> Result<Vec<Article>, StoreError> {
        let articles = self.articles.read().unwrap();
        Ok(articles
            .iter()
            .rev()
            .filter(|a| a.author == author)
            .cloned()
            .collect())
    }

    async fn update_article(
        &self,
        id: Uuid,
        title: &str,
        body: &str,
    ) -> Result<bool, StoreError> {
        let mut articles = self.articles.write().unwrap();
        match articles.iter_mut().find(|a| a.id == id) {
            Some(article) => {
                article.title = title.to_string();
                article.body = body.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_article(&self, id: Uuid) -> Result<(), StoreError> {
        self.articles.write().unwrap().retain(|a| a.id != id);
        Ok(())
    }
}
