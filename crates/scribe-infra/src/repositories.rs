//! Repository wiring - picks PostgreSQL or in-memory implementations.

use std::sync::Arc;

use scribe_core::ports::{ArticleRepository, CommentRepository, TagRepository, UserRepository};

use crate::database::{
    DatabaseConfig, InMemoryArticleRepository, InMemoryCommentRepository, InMemoryTagRepository,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use crate::database::DatabaseConnections;

/// The four blog repositories behind their ports.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
}

impl Repositories {
    /// Fresh in-memory repositories. Articles and tags share the link table.
    pub fn in_memory() -> Self {
        let tags = InMemoryTagRepository::new();
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            articles: Arc::new(InMemoryArticleRepository::sharing_links_with(&tags)),
            comments: Arc::new(InMemoryCommentRepository::new()),
            tags: Arc::new(tags),
        }
    }

    /// Build the repositories with appropriate implementations.
    ///
    /// Falls back to [`Repositories::in_memory`] when no database is configured
    /// or the connection fails.
    pub async fn init(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let repositories = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => Self::postgres(&connections),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repositories = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::in_memory()
        };

        tracing::info!("Repositories initialized");
        repositories
    }

    /// Repositories sharing the pool in `connections`.
    #[cfg(feature = "postgres")]
    pub fn postgres(connections: &DatabaseConnections) -> Self {
        Self {
            users: Arc::new(connections.users()),
            articles: Arc::new(connections.articles()),
            comments: Arc::new(connections.comments()),
            tags: Arc::new(connections.tags()),
        }
    }
}
