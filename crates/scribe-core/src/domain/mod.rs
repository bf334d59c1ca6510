//! Domain entities - the core business objects.

mod article;
mod blog;
mod comment;
mod ids;
mod post;
mod tag;
mod user;

pub use article::Article;
pub use blog::Blog;
pub use comment::Comment;
pub use ids::{ArticleId, CommentId, TagId, UserId};
pub use post::{Post, PostFields};
pub use tag::Tag;
pub use user::{Role, UnknownRole, User};
