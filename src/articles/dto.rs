use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;
use crate::session::Notice;
use crate::store::Article;

/// Form body shared by add and edit.
#[derive(Debug, Deserialize)]
pub struct ArticleForm {
    pub title: String,
    pub body: String,
}

impl ArticleForm {
    pub fn validate(&self) -> Result<(), AppError> {
        let title_len = self.title.chars().count();
        if title_len < 1 || title_len > 150 {
            return Err(AppError::Validation(
                "title must be between 1 and 150 characters".into(),
            ));
        }
        if self.body.chars().count() < 15 {
            return Err(AppError::Validation(
                "body must be at least 15 characters".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleView {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: OffsetDateTime,
}

impl From<Article> for ArticleView {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            body: article.body,
            author: article.author,
            created_at: article.created_at,
        }
    }
}

/// Listing payload for `/articles` and `/dashboard`.
#[derive(Debug, Serialize)]
pub struct ArticlesPage {
    pub articles: Vec<ArticleView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    pub notices: Vec<Notice>,
}

impl ArticlesPage {
    pub fn new(articles: Vec<Article>, notices: Vec<Notice>) -> Self {
        let msg = articles
            .is_empty()
            .then(|| "No articles found".to_string());
        Self {
            articles: articles.into_iter().map(ArticleView::from).collect(),
            msg,
            notices,
        }
    }
}

/// Single-article payload for the detail and edit-prefill views.
#[derive(Debug, Serialize)]
pub struct ArticlePage {
    pub article: ArticleView,
    pub notices: Vec<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_article() {
        let form = ArticleForm {
            title: "Hello".into(),
            body: "This body text is long enough".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn rejects_empty_title_and_oversized_title() {
        let form = ArticleForm { title: String::new(), body: "x".repeat(20) };
        assert!(form.validate().is_err());

        let form = ArticleForm { title: "t".repeat(151), body: "x".repeat(20) };
        assert!(form.validate().is_err());
    }

    #[test]
    fn rejects_short_body() {
        let form = ArticleForm { title: "Hello".into(), body: "too short".into() };
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("body"));
    }

    #[test]
    fn empty_listing_carries_message() {
        let page = ArticlesPage::new(Vec::new(), Vec::new());
        assert_eq!(page.msg.as_deref(), Some("No articles found"));
    }
}
