#[cfg(feature = "postgres")]
use std::sync::Arc;
#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

#[cfg(feature = "postgres")]
use super::postgres_repo::{
    PostgresArticleRepository, PostgresCommentRepository, PostgresTagRepository,
    PostgresUserRepository,
};

/// Configuration for the blog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 100;
    pub const DEFAULT_MIN_CONNECTIONS: u32 = 10;

    /// Read the configuration through `lookup`.
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let url = lookup("DATABASE_URL")?;
        Some(Self {
            url,
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Self::DEFAULT_MAX_CONNECTIONS),
            min_connections: lookup("DB_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Self::DEFAULT_MIN_CONNECTIONS),
        })
    }
}

/// Connection pool to the blog database.
#[cfg(feature = "postgres")]
#[derive(Clone)]
pub struct DatabaseConnections {
    pub main: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self {
            main: Arc::new(main),
        })
    }

    pub fn users(&self) -> PostgresUserRepository {
        PostgresUserRepository::new(Arc::clone(&self.main))
    }

    pub fn articles(&self) -> PostgresArticleRepository {
        PostgresArticleRepository::new(Arc::clone(&self.main))
    }

    pub fn comments(&self) -> PostgresCommentRepository {
        PostgresCommentRepository::new(Arc::clone(&self.main))
    }

    pub fn tags(&self) -> PostgresTagRepository {
        PostgresTagRepository::new(Arc::clone(&self.main))
    }
}
