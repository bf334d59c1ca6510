//! # Scribe Core
//!
//! The domain layer of the Scribe blog engine: articles, comments, tags and
//! users, the bookkeeping of their relationships, group-based validation and
//! the comment submission form.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
