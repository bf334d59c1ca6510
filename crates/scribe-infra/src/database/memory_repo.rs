//! In-memory repositories - used when no database is configured.
//!
//! Note: Data is lost on process restart.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Article, ArticleId, Comment, Post, Tag, TagId, User, UserId};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    ArticleRepository, BaseRepository, CommentRepository, Keyed, TagRepository, UserRepository,
};

/// Records keyed by id, guarded by an async RwLock.
pub struct InMemoryRepository<T> {
    store: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> InMemoryRepository<T> {
    async fn find_first(&self, matches: impl Fn(&T) -> bool) -> Option<T> {
        let store = self.store.read().await;
        store.values().find(|record| matches(record)).cloned()
    }

    async fn find_all(&self, matches: impl Fn(&T) -> bool) -> Vec<T> {
        let store = self.store.read().await;
        store.values().filter(|record| matches(record)).cloned().collect()
    }
}

#[async_trait]
impl<T> BaseRepository<T, Uuid> for InMemoryRepository<T>
where
    T: Keyed<Uuid> + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;
        store.insert(entity.key(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

pub type InMemoryCommentRepository = InMemoryRepository<Comment>;

/// Users, with usernames and emails kept unique like the `users` table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: InMemoryRepository<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        self.users.find_by_id(id).await
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut store = self.users.store.write().await;
        let clash = store.values().any(|other| {
            other.id() != entity.id()
                && (other.username == entity.username || other.email == entity.email)
        });
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(entity.key(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users.delete(id).await
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.find_first(|user| user.email == email).await)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.find_first(|user| user.username == username).await)
    }
}

/// Article/tag pairs, shared by the article and tag repositories.
type TagLinks = Arc<RwLock<BTreeSet<(ArticleId, TagId)>>>;

/// Articles. Deleting one drops its tag links, like the `articles_tags` cascade.
#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: InMemoryRepository<Article>,
    links: TagLinks,
}

impl InMemoryArticleRepository {
    /// An article repository with its own, unshared tag links.
    pub fn new() -> Self {
        Self::default()
    }

    /// An article repository whose deletions reach the links held by `tags`.
    pub fn sharing_links_with(tags: &InMemoryTagRepository) -> Self {
        Self {
            articles: InMemoryRepository::new(),
            links: Arc::clone(&tags.links),
        }
    }
}

#[async_trait]
impl BaseRepository<Article, Uuid> for InMemoryArticleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError> {
        self.articles.find_by_id(id).await
    }

    async fn save(&self, entity: Article) -> Result<Article, RepoError> {
        self.articles.save(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.articles.delete(id).await?;
        let article = ArticleId::from(id);
        self.links.write().await.retain(|(a, _)| *a != article);
        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepoError> {
        Ok(self.articles.find_first(|article| article.slug() == slug).await)
    }

    async fn find_by_author(&self, author: UserId) -> Result<Vec<Article>, RepoError> {
        let mut articles = self
            .articles
            .find_all(|article| article.author() == author)
            .await;
        articles.sort_by_key(|article| article.publication_date());
        Ok(articles)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_article(&self, article: ArticleId) -> Result<Vec<Comment>, RepoError> {
        let mut comments = self.find_all(|comment| comment.article() == article).await;
        comments.sort_by_key(|comment| comment.publication_date());
        Ok(comments)
    }

    async fn find_by_registered_author(&self, author: UserId) -> Result<Vec<Comment>, RepoError> {
        let mut comments = self
            .find_all(|comment| comment.registered_author() == Some(author))
            .await;
        comments.sort_by_key(|comment| comment.publication_date());
        Ok(comments)
    }
}

/// Tags plus the article/tag join table.
#[derive(Default)]
pub struct InMemoryTagRepository {
    tags: InMemoryRepository<Tag>,
    links: TagLinks,
}

impl InMemoryTagRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for InMemoryTagRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        self.tags.find_by_id(id).await
    }

    async fn save(&self, entity: Tag) -> Result<Tag, RepoError> {
        self.tags.save(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.tags.delete(id).await?;
        let tag = TagId::from(id);
        self.links.write().await.retain(|(_, t)| *t != tag);
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        Ok(self.tags.find_first(|tag| tag.slug() == slug).await)
    }

    async fn find_by_article(&self, article: ArticleId) -> Result<Vec<Tag>, RepoError> {
        let linked: BTreeSet<TagId> = self
            .links
            .read()
            .await
            .iter()
            .filter(|(a, _)| *a == article)
            .map(|(_, t)| *t)
            .collect();

        let mut tags = self.tags.find_all(|tag| linked.contains(&tag.id())).await;
        tags.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(tags)
    }

    async fn attach(&self, article: ArticleId, tag: TagId) -> Result<(), RepoError> {
        if self.tags.find_by_id(tag.into()).await?.is_none() {
            return Err(RepoError::Constraint(format!("Unknown tag {}", tag)));
        }
        self.links.write().await.insert((article, tag));
        Ok(())
    }

    async fn detach(&self, article: ArticleId, tag: TagId) -> Result<(), RepoError> {
        if self.links.write().await.remove(&(article, tag)) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[tokio::test]
    async fn test_save_find_and_delete() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .save(User::new("jdoe", "john.doe@domain.com", "hash"))
            .await
            .unwrap();

        let found = repo.find_by_id(user.id().into()).await.unwrap();
        assert_eq!(found, Some(user.clone()));
        assert_eq!(
            repo.find_by_email("john.doe@domain.com").await.unwrap(),
            Some(user.clone())
        );
        assert_eq!(repo.find_by_username("jdoe").await.unwrap(), Some(user.clone()));

        repo.delete(user.id().into()).await.unwrap();
        assert!(matches!(
            repo.delete(user.id().into()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_save_updates_existing_record() {
        let repo = InMemoryArticleRepository::new();
        let mut article = Article::new(UserId::new(), "Draft", "draft", "Article content.");
        repo.save(article.clone()).await.unwrap();

        article.set_title("Final");
        repo.save(article.clone()).await.unwrap();

        let stored = repo.find_by_slug("draft").await.unwrap().unwrap();
        assert_eq!(stored.title(), "Final");
        assert_eq!(repo.find_by_author(article.author()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_comments_by_article_are_oldest_first() {
        let repo = InMemoryCommentRepository::new();
        let article = ArticleId::new();
        let author = UserId::new();

        let mut newer = Comment::new(article, Some(author));
        newer.set_publication_date(Utc::now());
        let mut older = Comment::guest(article, "John Doe", None, "First!");
        older.set_publication_date(Utc::now() - Duration::hours(1));
        repo.save(newer.clone()).await.unwrap();
        repo.save(older.clone()).await.unwrap();
        repo.save(Comment::new(ArticleId::new(), None)).await.unwrap();

        let comments = repo.find_by_article(article).await.unwrap();
        assert_eq!(comments, vec![older, newer.clone()]);
        assert_eq!(
            repo.find_by_registered_author(author).await.unwrap(),
            vec![newer]
        );
    }

    #[tokio::test]
    async fn test_tag_links() {
        let repo = InMemoryTagRepository::new();
        let rust = repo.save(Tag::new("Rust", "rust")).await.unwrap();
        let orm = repo.save(Tag::new("ORM", "orm")).await.unwrap();
        let article = ArticleId::new();

        repo.attach(article, rust.id()).await.unwrap();
        repo.attach(article, rust.id()).await.unwrap();
        repo.attach(article, orm.id()).await.unwrap();
        assert_eq!(
            repo.find_by_article(article).await.unwrap(),
            vec![orm.clone(), rust.clone()]
        );

        repo.detach(article, orm.id()).await.unwrap();
        assert!(matches!(
            repo.detach(article, orm.id()).await,
            Err(RepoError::NotFound)
        ));

        repo.delete(rust.id().into()).await.unwrap();
        assert!(repo.find_by_article(article).await.unwrap().is_empty());
        assert!(matches!(
            repo.attach(article, rust.id()).await,
            Err(RepoError::Constraint(_))
        ));
        assert_eq!(repo.find_by_slug("orm").await.unwrap(), Some(orm));
    }

    #[tokio::test]
    async fn test_username_and_email_are_unique() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo
            .save(User::new("jdoe", "john.doe@domain.com", "hash"))
            .await
            .unwrap();

        for clash in [
            User::new("jdoe", "other@domain.com", "hash"),
            User::new("other", "john.doe@domain.com", "hash"),
        ] {
            assert!(matches!(
                repo.save(clash).await,
                Err(RepoError::Constraint(_))
            ));
        }
        assert!(repo.find_by_username("other").await.unwrap().is_none());

        // Re-saving the same user keeps its own username and email.
        user.set_moderator(true);
        repo.save(user.clone()).await.unwrap();
        assert_eq!(repo.find_by_email("john.doe@domain.com").await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_deleting_article_drops_tag_links() {
        let tags = InMemoryTagRepository::new();
        let articles = InMemoryArticleRepository::sharing_links_with(&tags);
        let rust = tags.save(Tag::new("Rust", "rust")).await.unwrap();
        let kept = articles
            .save(Article::new(UserId::new(), "Kept", "kept", "Article content."))
            .await
            .unwrap();
        let doomed = articles
            .save(Article::new(UserId::new(), "Doomed", "doomed", "Article content."))
            .await
            .unwrap();
        tags.attach(kept.id(), rust.id()).await.unwrap();
        tags.attach(doomed.id(), rust.id()).await.unwrap();

        articles.delete(doomed.id().into()).await.unwrap();

        assert!(tags.find_by_article(doomed.id()).await.unwrap().is_empty());
        assert_eq!(tags.find_by_article(kept.id()).await.unwrap(), vec![rust]);
    }
}
