//! SeaORM mappings for the blog tables.

pub mod article;
pub mod article_tag;
pub mod comment;
pub mod tag;
pub mod user;
