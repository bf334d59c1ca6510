//! Database connection management and repositories.

mod connections;
pub mod memory_repo;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory_repo::{
    InMemoryArticleRepository, InMemoryCommentRepository, InMemoryRepository,
    InMemoryTagRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresArticleRepository, PostgresCommentRepository, PostgresTagRepository,
    PostgresUserRepository,
};

/// Mask an email address for logging to avoid PII in logs.
#[cfg_attr(not(feature = "postgres"), allow(dead_code))]
pub(crate) fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let mut chars = local.chars();
        let masked_local = match (chars.next(), chars.next()) {
            (Some(first), Some(_)) => format!("{}***", first),
            _ => "***".to_string(),
        };
        format!("{}{}", masked_local, domain)
    } else {
        "***".to_string()
    }
}


#[cfg(test)]
mod mask_tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("john.doe@domain.com"), "j***@domain.com");
        assert_eq!(mask_email("j@domain.com"), "***@domain.com");
        assert_eq!(mask_email("żaneta@domain.com"), "ż***@domain.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
