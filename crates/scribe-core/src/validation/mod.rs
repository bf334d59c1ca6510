//! Group-based validation of domain entities.
//!
//! Entities carry no validation attributes. The rules live here and are
//! selected by [`ValidationGroup`]: content bounds differ between articles
//! and comments, and the comment author rules are picked from the comment's
//! state by [`AuthorGroup::for_comment`].

mod groups;
mod violation;

use validator::{ValidateEmail, ValidateLength};

use crate::domain::{Article, Comment, Post, PostFields, Tag, User};

pub use groups::{AuthorGroup, ContentRules, ValidationGroup};
pub use violation::{Violation, Violations};

/// Field paths used in violations. They match the comment form field names.
pub mod fields {
    pub const CONTENT: &str = "content";
    pub const TITLE: &str = "title";
    pub const SLUG: &str = "slug";
    pub const NAME: &str = "name";
    pub const USERNAME: &str = "username";
    pub const EMAIL: &str = "email";
    pub const REGISTERED_AUTHOR: &str = "registeredAuthor";
    pub const UNREGISTERED_AUTHOR_NAME: &str = "unregisteredAuthorName";
    pub const UNREGISTERED_AUTHOR_EMAIL: &str = "unregisteredAuthorEmail";
}

/// Message identifiers, resolved against a message catalog by the caller.
pub mod messages {
    pub const POST_CONTENT_BLANK: &str = "post.content.blank";
    pub const POST_CONTENT_TOO_SHORT: &str = "post.content.too_short";
    pub const POST_CONTENT_TOO_LONG: &str = "post.content.too_long";
    pub const ARTICLE_TITLE_BLANK: &str = "article.title.blank";
    pub const ARTICLE_SLUG_BLANK: &str = "article.slug.blank";
    pub const TAG_NAME_BLANK: &str = "tag.name.blank";
    pub const TAG_SLUG_BLANK: &str = "tag.slug.blank";
    pub const USER_USERNAME_BLANK: &str = "user.username.blank";
    pub const USER_EMAIL_INVALID: &str = "user.email.invalid";
    pub const REGISTERED_AUTHOR_BLANK: &str = "comment.registered_author.blank";
    pub const REGISTERED_AUTHOR_NOT_BLANK: &str = "comment.registered_author.not_blank";
    pub const UNREGISTERED_AUTHOR_NAME_BLANK: &str = "comment.unregistered_author_name.blank";
    pub const UNREGISTERED_AUTHOR_NAME_NOT_BLANK: &str =
        "comment.unregistered_author_name.not_blank";
    pub const UNREGISTERED_AUTHOR_EMAIL_INVALID: &str =
        "comment.unregistered_author_email.invalid";
    pub const UNREGISTERED_AUTHOR_EMAIL_NOT_BLANK: &str =
        "comment.unregistered_author_email.not_blank";
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_blank_opt(value: Option<&str>) -> bool {
    value.is_none_or(is_blank)
}

/// Check post content against the bounds of `rules`.
///
/// Blank content reports only the blank violation; length counts characters.
pub fn check_content(post: &PostFields, rules: ContentRules, violations: &mut Violations) {
    if is_blank(&post.content) {
        violations.add(fields::CONTENT, messages::POST_CONTENT_BLANK);
        return;
    }
    if !post.content.validate_length(Some(rules.min), None, None) {
        violations.add(fields::CONTENT, messages::POST_CONTENT_TOO_SHORT);
    }
    if !post.content.validate_length(None, rules.max, None) {
        violations.add(fields::CONTENT, messages::POST_CONTENT_TOO_LONG);
    }
}

/// Validate post content under the bounds carried by `group`.
pub fn validate_content<P: Post>(post: &P, group: ValidationGroup) -> Result<(), Violations> {
    let mut violations = Violations::new();
    if let Some(rules) = ContentRules::for_group(group) {
        check_content(post.post(), rules, &mut violations);
    }
    violations.into_result()
}

/// Validate an article under the `Article` group.
pub fn validate_article(article: &Article) -> Result<(), Violations> {
    let mut violations = Violations::new();
    if is_blank(article.title()) {
        violations.add(fields::TITLE, messages::ARTICLE_TITLE_BLANK);
    }
    if is_blank(article.slug()) {
        violations.add(fields::SLUG, messages::ARTICLE_SLUG_BLANK);
    }
    check_content(article.post(), ContentRules::ARTICLE, &mut violations);
    violations.into_result()
}

/// Check only the author rules of `group`, regardless of the comment state.
pub fn check_comment_author(comment: &Comment, group: AuthorGroup, violations: &mut Violations) {
    let name = comment.unregistered_author_name();
    let email = comment.unregistered_author_email();

    match group {
        AuthorGroup::Registered => {
            if !comment.has_registered_author() {
                violations.add(fields::REGISTERED_AUTHOR, messages::REGISTERED_AUTHOR_BLANK);
            }
            if !is_blank_opt(name) {
                violations.add(
                    fields::UNREGISTERED_AUTHOR_NAME,
                    messages::UNREGISTERED_AUTHOR_NAME_NOT_BLANK,
                );
            }
            if !is_blank_opt(email) {
                violations.add(
                    fields::UNREGISTERED_AUTHOR_EMAIL,
                    messages::UNREGISTERED_AUTHOR_EMAIL_NOT_BLANK,
                );
            }
        }
        AuthorGroup::Unregistered => {
            if comment.has_registered_author() {
                violations.add(
                    fields::REGISTERED_AUTHOR,
                    messages::REGISTERED_AUTHOR_NOT_BLANK,
                );
            }
            if is_blank_opt(name) {
                violations.add(
                    fields::UNREGISTERED_AUTHOR_NAME,
                    messages::UNREGISTERED_AUTHOR_NAME_BLANK,
                );
            }
            if let Some(email) = email.filter(|e| !is_blank(e)) {
                if !email.validate_email() {
                    violations.add(
                        fields::UNREGISTERED_AUTHOR_EMAIL,
                        messages::UNREGISTERED_AUTHOR_EMAIL_INVALID,
                    );
                }
            }
        }
    }
}

/// Validate a comment under the `Comment` content bounds and an explicit
/// author group.
pub fn validate_comment_in_group(comment: &Comment, group: AuthorGroup) -> Result<(), Violations> {
    let mut violations = Violations::new();
    check_content(comment.post(), ContentRules::COMMENT, &mut violations);
    check_comment_author(comment, group, &mut violations);
    violations.into_result()
}

/// Validate a comment, picking the author group from its current state.
pub fn validate_comment(comment: &Comment) -> Result<(), Violations> {
    validate_comment_in_group(comment, AuthorGroup::for_comment(comment))
}

pub fn validate_tag(tag: &Tag) -> Result<(), Violations> {
    let mut violations = Violations::new();
    if is_blank(tag.name()) {
        violations.add(fields::NAME, messages::TAG_NAME_BLANK);
    }
    if is_blank(tag.slug()) {
        violations.add(fields::SLUG, messages::TAG_SLUG_BLANK);
    }
    violations.into_result()
}

pub fn validate_user(user: &User) -> Result<(), Violations> {
    let mut violations = Violations::new();
    if is_blank(&user.username) {
        violations.add(fields::USERNAME, messages::USER_USERNAME_BLANK);
    }
    if !user.email.validate_email() {
        violations.add(fields::EMAIL, messages::USER_EMAIL_INVALID);
    }
    violations.into_result()
}
