use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Article, ArticleId, Comment, Tag, TagId, User, UserId};
use crate::error::RepoError;

/// Gives access to the storage key of a persisted record.
pub trait Keyed<ID> {
    fn key(&self) -> ID;
}

impl Keyed<Uuid> for User {
    fn key(&self) -> Uuid {
        self.id().into()
    }
}

impl Keyed<Uuid> for Article {
    fn key(&self) -> Uuid {
        self.id().into()
    }
}

impl Keyed<Uuid> for Comment {
    fn key(&self) -> Uuid {
        self.id().into()
    }
}

impl Keyed<Uuid> for Tag {
    fn key(&self) -> Uuid {
        self.id().into()
    }
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

#[async_trait]
pub trait ArticleRepository: BaseRepository<Article, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepoError>;

    /// Articles written by `author`, oldest first.
    async fn find_by_author(&self, author: UserId) -> Result<Vec<Article>, RepoError>;
}

#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on `article`, oldest first.
    async fn find_by_article(&self, article: ArticleId) -> Result<Vec<Comment>, RepoError>;

    async fn find_by_registered_author(&self, author: UserId) -> Result<Vec<Comment>, RepoError>;
}

/// Tag repository, also owning the article/tag join table.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    async fn find_by_article(&self, article: ArticleId) -> Result<Vec<Tag>, RepoError>;

    /// Link a tag to an article. Linking twice is not an error.
    async fn attach(&self, article: ArticleId, tag: TagId) -> Result<(), RepoError>;

    /// Unlink a tag from an article. Returns [`RepoError::NotFound`] if they were not linked.
    async fn detach(&self, article: ArticleId, tag: TagId) -> Result<(), RepoError>;
}

