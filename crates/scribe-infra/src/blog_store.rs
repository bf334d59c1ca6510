//! Loading a [`Blog`] graph from the repositories and writing it back.
//!
//! The repositories store rows and join-table links; [`Blog`] holds the same
//! data as an in-memory relationship index. `BlogStore` moves one article and
//! everything hanging off it between the two.

use std::collections::BTreeSet;

use thiserror::Error;

use scribe_core::domain::{ArticleId, Blog, TagId, UserId};
use scribe_core::error::{DomainError, RepoError};

use crate::repositories::Repositories;

/// Errors raised while moving a blog graph in or out of storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

fn not_found(entity_type: &'static str, id: impl Into<uuid::Uuid>) -> StoreError {
    StoreError::Domain(DomainError::NotFound {
        entity_type,
        id: id.into(),
    })
}

/// Reads and writes article graphs through [`Repositories`].
#[derive(Clone)]
pub struct BlogStore {
    repos: Repositories,
}

impl BlogStore {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// Build a [`Blog`] holding `article`, its author, its comments (with
    /// their registered authors) and its tags, all links included.
    pub async fn load_article(&self, article: ArticleId) -> Result<Blog, StoreError> {
        let record = self
            .repos
            .articles
            .find_by_id(article.into())
            .await?
            .ok_or_else(|| not_found("Article", article))?;

        let mut blog = Blog::new();
        self.load_user(&mut blog, record.author()).await?;
        blog.add_article(record)?;

        for comment in self.repos.comments.find_by_article(article).await? {
            if let Some(author) = comment.registered_author() {
                self.load_user(&mut blog, author).await?;
            }
            blog.add_comment(comment)?;
        }

        for tag in self.repos.tags.find_by_article(article).await? {
            let tag = blog.add_tag(tag)?;
            blog.article_add_tag(article, tag)?;
        }

        tracing::debug!(
            %article,
            comments = blog.article_comments(article).len(),
            "Loaded article graph"
        );
        Ok(blog)
    }

    async fn load_user(&self, blog: &mut Blog, id: UserId) -> Result<(), StoreError> {
        if blog.user(id).is_some() {
            return Ok(());
        }
        let user = self
            .repos
            .users
            .find_by_id(id.into())
            .await?
            .ok_or_else(|| not_found("User", id))?;
        blog.register_user(user)?;
        Ok(())
    }

    /// Save `article`, its comments and its tags from `blog`, then bring the
    /// stored tag links in line with the article's tag set.
    pub async fn flush_article(&self, blog: &Blog, article: ArticleId) -> Result<(), StoreError> {
        let record = blog
            .article(article)
            .ok_or_else(|| not_found("Article", article))?;
        self.repos.articles.save(record.clone()).await?;

        for &comment in blog.article_comments(article) {
            let record = blog
                .comment(comment)
                .ok_or_else(|| not_found("Comment", comment))?;
            self.repos.comments.save(record.clone()).await?;
        }

        let stored: BTreeSet<TagId> = self
            .repos
            .tags
            .find_by_article(article)
            .await?
            .iter()
            .map(|tag| tag.id())
            .collect();
        let wanted: BTreeSet<TagId> = blog.article_tags(article).collect();

        for &tag in &wanted {
            let record = blog.tag(tag).ok_or_else(|| not_found("Tag", tag))?;
            self.repos.tags.save(record.clone()).await?;
            if !stored.contains(&tag) {
                self.repos.tags.attach(article, tag).await?;
            }
        }
        for &tag in stored.difference(&wanted) {
            self.repos.tags.detach(article, tag).await?;
        }

        tracing::debug!(%article, tags = wanted.len(), "Flushed article graph");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use scribe_core::domain::{Article, Comment, Post, Tag, User};

    use super::*;

    struct Seed {
        store: BlogStore,
        author: UserId,
        reader: UserId,
        article: ArticleId,
        rust: TagId,
    }

    async fn seed() -> Seed {
        let repos = Repositories::in_memory();
        let author = repos
            .users
            .save(User::new("author", "author@domain.com", "hash"))
            .await
            .unwrap()
            .id();
        let reader = repos
            .users
            .save(User::new("reader", "reader@domain.com", "hash"))
            .await
            .unwrap()
            .id();
        let article = repos
            .articles
            .save(Article::new(author, "Title", "title", "Article content."))
            .await
            .unwrap()
            .id();
        repos
            .comments
            .save(Comment::new(article, Some(reader)))
            .await
            .unwrap();
        repos
            .comments
            .save(Comment::guest(article, "John Doe", None, "Nice one"))
            .await
            .unwrap();
        let rust = repos.tags.save(Tag::new("Rust", "rust")).await.unwrap().id();
        repos.tags.attach(article, rust).await.unwrap();

        Seed {
            store: BlogStore::new(repos),
            author,
            reader,
            article,
            rust,
        }
    }

    #[tokio::test]
    async fn test_load_builds_linked_graph() {
        let s = seed().await;
        let blog = s.store.load_article(s.article).await.unwrap();

        assert_eq!(blog.article(s.article).unwrap().author(), s.author);
        assert_eq!(blog.user_articles(s.author), &[s.article]);
        assert_eq!(blog.article_comments(s.article).len(), 2);
        assert_eq!(blog.user_comments(s.reader).len(), 1);
        assert!(blog.article_has_tag(s.article, s.rust));
        assert!(blog.tag_has_article(s.rust, s.article));
    }

    #[tokio::test]
    async fn test_load_missing_article() {
        let s = seed().await;
        assert!(matches!(
            s.store.load_article(ArticleId::new()).await,
            Err(StoreError::Domain(DomainError::NotFound {
                entity_type: "Article",
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_flush_writes_edits_and_tag_changes() {
        let s = seed().await;
        let mut blog = s.store.load_article(s.article).await.unwrap();

        blog.article_mut(s.article).unwrap().set_content("Edited article content.");
        let orm = blog.add_tag(Tag::new("ORM", "orm")).unwrap();
        blog.article_add_tag(s.article, orm).unwrap();
        blog.article_remove_tag(s.article, s.rust).unwrap();

        s.store.flush_article(&blog, s.article).await.unwrap();

        let repos = s.store.repositories();
        let stored = repos.articles.find_by_id(s.article.into()).await.unwrap().unwrap();
        assert_eq!(stored.content(), "Edited article content.");
        let tags: Vec<TagId> = repos
            .tags
            .find_by_article(s.article)
            .await
            .unwrap()
            .iter()
            .map(|tag| tag.id())
            .collect();
        assert_eq!(tags, vec![orm]);
        assert!(repos.tags.find_by_id(s.rust.into()).await.unwrap().is_some());

        let reloaded = s.store.load_article(s.article).await.unwrap();
        assert!(reloaded.article_has_tag(s.article, orm));
        assert!(!reloaded.article_has_tag(s.article, s.rust));
    }
}
