use serde::{Deserialize, Serialize};

use super::ids::{ArticleId, UserId};
use super::post::{Post, PostFields};

/// Article entity - a blog entry written by a registered user.
///
/// The comment and tag collections are not stored here; they live in the
/// relationship index of [`Blog`](super::Blog), which keeps both sides of
/// every link in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    id: ArticleId,
    author: UserId,
    title: String,
    slug: String,
    post: PostFields,
}

impl Article {
    /// Create a new, unpublished article.
    pub fn new(
        author: UserId,
        title: impl Into<String>,
        slug: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::with_id(ArticleId::new(), author, title, slug, PostFields::new(content))
    }

    /// Rebuild an article from already persisted values.
    pub fn with_id(
        id: ArticleId,
        author: UserId,
        title: impl Into<String>,
        slug: impl Into<String>,
        post: PostFields,
    ) -> Self {
        Self {
            id,
            author,
            title: title.into(),
            slug: slug.into(),
            post,
        }
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    /// The author is fixed at construction.
    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
    }
}

impl Post for Article {
    fn post(&self) -> &PostFields {
        &self.post
    }

    fn post_mut(&mut self) -> &mut PostFields {
        &mut self.post
    }
}
