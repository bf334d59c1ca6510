use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Comment;

/// Named subset of validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationGroup {
    Article,
    Comment,
    RegisteredAuthor,
    UnregisteredAuthor,
}

impl ValidationGroup {
    pub fn name(&self) -> &'static str {
        match self {
            ValidationGroup::Article => "Article",
            ValidationGroup::Comment => "Comment",
            ValidationGroup::RegisteredAuthor => "RegisteredAuthor",
            ValidationGroup::UnregisteredAuthor => "UnregisteredAuthor",
        }
    }
}

impl fmt::Display for ValidationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which author rule set applies to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorGroup {
    Registered,
    Unregistered,
}

impl AuthorGroup {
    /// Pick the rule set from the comment's current state.
    pub fn for_comment(comment: &Comment) -> Self {
        if comment.has_registered_author() {
            AuthorGroup::Registered
        } else {
            AuthorGroup::Unregistered
        }
    }

    pub fn group(&self) -> ValidationGroup {
        match self {
            AuthorGroup::Registered => ValidationGroup::RegisteredAuthor,
            AuthorGroup::Unregistered => ValidationGroup::UnregisteredAuthor,
        }
    }
}

/// Character-length bounds for post content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRules {
    pub min: u64,
    pub max: Option<u64>,
}

impl ContentRules {
    pub const ARTICLE: ContentRules = ContentRules {
        min: 10,
        max: None,
    };

    pub const COMMENT: ContentRules = ContentRules {
        min: 5,
        max: Some(10_000),
    };

    /// Content bounds carried by `group`, if it constrains content at all.
    pub fn for_group(group: ValidationGroup) -> Option<ContentRules> {
        match group {
            ValidationGroup::Article => Some(Self::ARTICLE),
            ValidationGroup::Comment => Some(Self::COMMENT),
            ValidationGroup::RegisteredAuthor | ValidationGroup::UnregisteredAuthor => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleId, UserId};

    #[test]
    fn test_author_group_follows_registered_author() {
        let registered = Comment::new(ArticleId::new(), Some(UserId::new()));
        let guest = Comment::guest(ArticleId::new(), "John Doe", None, "Hello there");

        assert_eq!(AuthorGroup::for_comment(&registered), AuthorGroup::Registered);
        assert_eq!(AuthorGroup::for_comment(&guest), AuthorGroup::Unregistered);
        assert_eq!(AuthorGroup::Registered.group().to_string(), "RegisteredAuthor");
        assert_eq!(AuthorGroup::Unregistered.group().name(), "UnregisteredAuthor");
    }

    #[test]
    fn test_only_post_groups_carry_content_rules() {
        assert_eq!(ContentRules::for_group(ValidationGroup::Article), Some(ContentRules::ARTICLE));
        assert_eq!(ContentRules::for_group(ValidationGroup::Comment), Some(ContentRules::COMMENT));
        assert_eq!(ContentRules::for_group(ValidationGroup::RegisteredAuthor), None);
        assert_eq!(ContentRules::COMMENT.max, Some(10_000));
    }
}
