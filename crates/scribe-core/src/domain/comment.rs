use serde::{Deserialize, Serialize};

use super::ids::{ArticleId, CommentId, UserId};
use super::post::{Post, PostFields};

/// Comment entity - a reply attached to exactly one article.
///
/// The author is either a registered user or a guest identified by a name and
/// an optional email. Both shapes are constructible; which one is acceptable
/// is decided by the author validation group at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    article: ArticleId,
    registered_author: Option<UserId>,
    unregistered_author_name: Option<String>,
    unregistered_author_email: Option<String>,
    post: PostFields,
}

impl Comment {
    /// Create an empty comment on `article`.
    pub fn new(article: ArticleId, registered_author: Option<UserId>) -> Self {
        Self::with_id(CommentId::new(), article, registered_author, PostFields::default())
    }

    /// Create a comment written by a guest.
    pub fn guest(
        article: ArticleId,
        name: impl Into<String>,
        email: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut comment = Self::with_id(CommentId::new(), article, None, PostFields::new(content));
        comment.unregistered_author_name = Some(name.into());
        comment.unregistered_author_email = email;
        comment
    }

    /// Rebuild a comment from already persisted values.
    pub fn with_id(
        id: CommentId,
        article: ArticleId,
        registered_author: Option<UserId>,
        post: PostFields,
    ) -> Self {
        Self {
            id,
            article,
            registered_author,
            unregistered_author_name: None,
            unregistered_author_email: None,
            post,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    /// The article this comment belongs to.
    ///
    /// Reassignment goes through [`Blog::set_comment_article`](super::Blog::set_comment_article).
    pub fn article(&self) -> ArticleId {
        self.article
    }

    pub(crate) fn relink(&mut self, article: ArticleId) {
        self.article = article;
    }

    pub fn registered_author(&self) -> Option<UserId> {
        self.registered_author
    }

    pub fn has_registered_author(&self) -> bool {
        self.registered_author.is_some()
    }

    pub fn unregistered_author_name(&self) -> Option<&str> {
        self.unregistered_author_name.as_deref()
    }

    pub fn set_unregistered_author_name(&mut self, name: Option<String>) {
        self.unregistered_author_name = name;
    }

    pub fn unregistered_author_email(&self) -> Option<&str> {
        self.unregistered_author_email.as_deref()
    }

    pub fn set_unregistered_author_email(&mut self, email: Option<String>) {
        self.unregistered_author_email = email;
    }
}

impl Post for Comment {
    fn post(&self) -> &PostFields {
        &self.post
    }

    fn post_mut(&mut self) -> &mut PostFields {
        &mut self.post
    }
}
