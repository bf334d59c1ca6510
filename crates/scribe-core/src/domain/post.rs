use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields shared by every publishable piece of content (articles, comments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub content: String,
    pub publication_date: DateTime<Utc>,
    pub published: bool,
}

impl PostFields {
    /// Create unpublished content stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            publication_date: Utc::now(),
            published: false,
        }
    }
}

impl Default for PostFields {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Shared accessors for entities composed over [`PostFields`].
pub trait Post {
    fn post(&self) -> &PostFields;

    fn post_mut(&mut self) -> &mut PostFields;

    fn content(&self) -> &str {
        &self.post().content
    }

    fn set_content(&mut self, content: impl Into<String>)
    where
        Self: Sized,
    {
        self.post_mut().content = content.into();
    }

    fn publication_date(&self) -> DateTime<Utc> {
        self.post().publication_date
    }

    fn set_publication_date(&mut self, date: DateTime<Utc>) {
        self.post_mut().publication_date = date;
    }

    fn is_published(&self) -> bool {
        self.post().published
    }

    fn set_published(&mut self, published: bool) {
        self.post_mut().published = published;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::{Article, ArticleId, Comment, UserId};

    #[test]
    fn test_new_post_is_unpublished_and_stamped() {
        let before = Utc::now();
        let post = PostFields::new("Some content");

        assert_eq!(post.content, "Some content");
        assert!(!post.published);
        assert!(post.publication_date >= before);
        assert!(post.publication_date <= Utc::now());
    }

    #[test]
    fn test_accessors_through_entities() {
        let mut article = Article::new(UserId::new(), "Title", "title", "Article content.");
        let mut comment = Comment::new(ArticleId::new(), None);
        assert_eq!(comment.content(), "");

        let date = Utc::now() - Duration::days(3);
        article.set_publication_date(date);
        article.set_published(true);
        comment.set_content("Comment content");

        assert_eq!(article.publication_date(), date);
        assert!(article.is_published());
        assert_eq!(article.content(), "Article content.");
        assert_eq!(comment.content(), "Comment content");
        assert!(!comment.is_published());
    }
}
