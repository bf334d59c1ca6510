//! Arena of blog entities and the index of their relationships.
//!
//! Entities reference each other by id only. Every collection side of a
//! relationship (article comments, article tags, tag articles, user comments,
//! user articles) is kept here, and the owning-side operations update both
//! directions in one call.

use std::collections::{BTreeSet, HashMap};

use super::ids::{ArticleId, CommentId, TagId, UserId};
use super::{Article, Comment, Tag, User};
use crate::error::DomainError;

/// Ordered collection without duplicates.
fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        false
    } else {
        items.push(item);
        true
    }
}

fn remove_item<T: PartialEq>(items: &mut Vec<T>, item: &T) -> bool {
    let before = items.len();
    items.retain(|i| i != item);
    items.len() != before
}

#[derive(Debug, Default)]
struct Relations {
    article_comments: HashMap<ArticleId, Vec<CommentId>>,
    article_tags: HashMap<ArticleId, BTreeSet<TagId>>,
    tag_articles: HashMap<TagId, BTreeSet<ArticleId>>,
    user_comments: HashMap<UserId, Vec<CommentId>>,
    user_articles: HashMap<UserId, Vec<ArticleId>>,
}

/// In-memory graph of users, articles, comments and tags.
#[derive(Debug, Default)]
pub struct Blog {
    users: HashMap<UserId, User>,
    articles: HashMap<ArticleId, Article>,
    comments: HashMap<CommentId, Comment>,
    tags: HashMap<TagId, Tag>,
    relations: Relations,
}

impl Blog {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_user(&self, id: UserId) -> Result<(), DomainError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::not_found("User", id))
        }
    }

    fn ensure_article(&self, id: ArticleId) -> Result<(), DomainError> {
        if self.articles.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::not_found("Article", id))
        }
    }

    fn ensure_comment(&self, id: CommentId) -> Result<(), DomainError> {
        if self.comments.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::not_found("Comment", id))
        }
    }

    fn ensure_tag(&self, id: TagId) -> Result<(), DomainError> {
        if self.tags.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::not_found("Tag", id))
        }
    }

    // -- registration -----------------------------------------------------

    pub fn register_user(&mut self, user: User) -> Result<UserId, DomainError> {
        let id = user.id();
        if self.users.contains_key(&id) {
            return Err(DomainError::duplicate("User", id));
        }
        self.users.insert(id, user);
        Ok(id)
    }

    /// Add an article and record it on its author.
    pub fn add_article(&mut self, article: Article) -> Result<ArticleId, DomainError> {
        let id = article.id();
        if self.articles.contains_key(&id) {
            return Err(DomainError::duplicate("Article", id));
        }
        let author = article.author();
        self.ensure_user(author)?;

        self.articles.insert(id, article);
        push_unique(self.relations.user_articles.entry(author).or_default(), id);
        Ok(id)
    }

    /// Add a comment and record it on its article and, if any, its
    /// registered author.
    pub fn add_comment(&mut self, comment: Comment) -> Result<CommentId, DomainError> {
        let id = comment.id();
        if self.comments.contains_key(&id) {
            return Err(DomainError::duplicate("Comment", id));
        }
        let article = comment.article();
        self.ensure_article(article)?;
        let author = comment.registered_author();
        if let Some(author) = author {
            self.ensure_user(author)?;
        }

        self.comments.insert(id, comment);
        push_unique(
            self.relations.article_comments.entry(article).or_default(),
            id,
        );
        if let Some(author) = author {
            push_unique(self.relations.user_comments.entry(author).or_default(), id);
        }
        Ok(id)
    }

    pub fn add_tag(&mut self, tag: Tag) -> Result<TagId, DomainError> {
        let id = tag.id();
        if self.tags.contains_key(&id) {
            return Err(DomainError::duplicate("Tag", id));
        }
        self.tags.insert(id, tag);
        Ok(id)
    }

    // -- lookup -----------------------------------------------------------

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    pub fn article(&self, id: ArticleId) -> Option<&Article> {
        self.articles.get(&id)
    }

    pub fn article_mut(&mut self, id: ArticleId) -> Option<&mut Article> {
        self.articles.get_mut(&id)
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.get(&id)
    }

    pub fn comment_mut(&mut self, id: CommentId) -> Option<&mut Comment> {
        self.comments.get_mut(&id)
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(&id)
    }

    pub fn tag_mut(&mut self, id: TagId) -> Option<&mut Tag> {
        self.tags.get_mut(&id)
    }

    // -- article <-> comment ----------------------------------------------

    /// Comments of an article, in insertion order.
    pub fn article_comments(&self, article: ArticleId) -> &[CommentId] {
        self.relations
            .article_comments
            .get(&article)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Record `comment` on the article side only.
    ///
    /// The comment's own article reference is left to
    /// [`set_comment_article`](Self::set_comment_article).
    pub fn article_add_comment(
        &mut self,
        article: ArticleId,
        comment: CommentId,
    ) -> Result<bool, DomainError> {
        self.ensure_article(article)?;
        self.ensure_comment(comment)?;
        Ok(push_unique(
            self.relations.article_comments.entry(article).or_default(),
            comment,
        ))
    }

    /// Drop `comment` from the article side only.
    pub fn article_remove_comment(
        &mut self,
        article: ArticleId,
        comment: CommentId,
    ) -> Result<bool, DomainError> {
        self.ensure_article(article)?;
        Ok(self
            .relations
            .article_comments
            .get_mut(&article)
            .is_some_and(|comments| remove_item(comments, &comment)))
    }

    /// Move a comment to another article.
    ///
    /// Both ids are checked before anything changes, so the comment is never
    /// observed in neither or both collections.
    pub fn set_comment_article(
        &mut self,
        comment: CommentId,
        article: ArticleId,
    ) -> Result<(), DomainError> {
        self.ensure_article(article)?;
        let previous = self
            .comments
            .get(&comment)
            .map(Comment::article)
            .ok_or_else(|| DomainError::not_found("Comment", comment))?;

        if previous != article {
            if let Some(comments) = self.relations.article_comments.get_mut(&previous) {
                remove_item(comments, &comment);
            }
        }
        push_unique(
            self.relations.article_comments.entry(article).or_default(),
            comment,
        );
        if let Some(c) = self.comments.get_mut(&comment) {
            c.relink(article);
        }
        Ok(())
    }

    // -- article <-> tag --------------------------------------------------

    pub fn article_tags(&self, article: ArticleId) -> impl Iterator<Item = TagId> + '_ {
        self.relations
            .article_tags
            .get(&article)
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn tag_articles(&self, tag: TagId) -> impl Iterator<Item = ArticleId> + '_ {
        self.relations
            .tag_articles
            .get(&tag)
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn article_has_tag(&self, article: ArticleId, tag: TagId) -> bool {
        self.relations
            .article_tags
            .get(&article)
            .is_some_and(|tags| tags.contains(&tag))
    }

    pub fn tag_has_article(&self, tag: TagId, article: ArticleId) -> bool {
        self.relations
            .tag_articles
            .get(&tag)
            .is_some_and(|articles| articles.contains(&article))
    }

    /// Tag an article. Updates both the article and the tag side.
    pub fn article_add_tag(&mut self, article: ArticleId, tag: TagId) -> Result<bool, DomainError> {
        self.ensure_article(article)?;
        self.ensure_tag(tag)?;
        let added = self
            .relations
            .article_tags
            .entry(article)
            .or_default()
            .insert(tag);
        self.relations
            .tag_articles
            .entry(tag)
            .or_default()
            .insert(article);
        Ok(added)
    }

    /// Untag an article. Updates both the article and the tag side.
    pub fn article_remove_tag(
        &mut self,
        article: ArticleId,
        tag: TagId,
    ) -> Result<bool, DomainError> {
        self.ensure_article(article)?;
        self.ensure_tag(tag)?;
        let removed = self
            .relations
            .article_tags
            .get_mut(&article)
            .is_some_and(|tags| tags.remove(&tag));
        if let Some(articles) = self.relations.tag_articles.get_mut(&tag) {
            articles.remove(&article);
        }
        Ok(removed)
    }

    pub fn tag_add_article(&mut self, tag: TagId, article: ArticleId) -> Result<bool, DomainError> {
        self.article_add_tag(article, tag)
    }

    pub fn tag_remove_article(
        &mut self,
        tag: TagId,
        article: ArticleId,
    ) -> Result<bool, DomainError> {
        self.article_remove_tag(article, tag)
    }

    // -- user <-> authored content ----------------------------------------

    pub fn user_comments(&self, user: UserId) -> &[CommentId] {
        self.relations
            .user_comments
            .get(&user)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn user_articles(&self, user: UserId) -> &[ArticleId] {
        self.relations
            .user_articles
            .get(&user)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Record `comment` on the user side only.
    pub fn user_add_comment(
        &mut self,
        user: UserId,
        comment: CommentId,
    ) -> Result<bool, DomainError> {
        self.ensure_user(user)?;
        self.ensure_comment(comment)?;
        Ok(push_unique(
            self.relations.user_comments.entry(user).or_default(),
            comment,
        ))
    }

    pub fn user_remove_comment(
        &mut self,
        user: UserId,
        comment: CommentId,
    ) -> Result<bool, DomainError> {
        self.ensure_user(user)?;
        Ok(self
            .relations
            .user_comments
            .get_mut(&user)
            .is_some_and(|comments| remove_item(comments, &comment)))
    }

    /// Record `article` on the user side only.
    pub fn user_add_article(
        &mut self,
        user: UserId,
        article: ArticleId,
    ) -> Result<bool, DomainError> {
        self.ensure_user(user)?;
        self.ensure_article(article)?;
        Ok(push_unique(
            self.relations.user_articles.entry(user).or_default(),
            article,
        ))
    }

    pub fn user_remove_article(
        &mut self,
        user: UserId,
        article: ArticleId,
    ) -> Result<bool, DomainError> {
        self.ensure_user(user)?;
        Ok(self
            .relations
            .user_articles
            .get_mut(&user)
            .is_some_and(|articles| remove_item(articles, &article)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Post;

    struct Fixture {
        blog: Blog,
        author: UserId,
        reader: UserId,
        first: ArticleId,
        second: ArticleId,
    }

    fn fixture() -> Fixture {
        let mut blog = Blog::new();
        let author = blog
            .register_user(User::new("author", "author@domain.com", "hash"))
            .unwrap();
        let reader = blog
            .register_user(User::new("reader", "reader@domain.com", "hash"))
            .unwrap();
        let first = blog
            .add_article(Article::new(author, "First", "first", "First article body."))
            .unwrap();
        let second = blog
            .add_article(Article::new(author, "Second", "second", "Second article body."))
            .unwrap();
        Fixture {
            blog,
            author,
            reader,
            first,
            second,
        }
    }

    #[test]
    fn test_add_article_records_author_side() {
        let f = fixture();
        assert_eq!(f.blog.user_articles(f.author), &[f.first, f.second]);
        assert_eq!(f.blog.article(f.first).unwrap().author(), f.author);
    }

    #[test]
    fn test_add_article_requires_known_author() {
        let mut blog = Blog::new();
        let err = blog
            .add_article(Article::new(UserId::new(), "T", "t", "Some content here"))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "User", .. }));
    }

    #[test]
    fn test_add_comment_links_article_and_author() {
        let mut f = fixture();
        let comment = f
            .blog
            .add_comment(Comment::new(f.first, Some(f.reader)))
            .unwrap();

        assert_eq!(f.blog.article_comments(f.first), &[comment]);
        assert_eq!(f.blog.user_comments(f.reader), &[comment]);
        assert_eq!(f.blog.comment(comment).unwrap().article(), f.first);
    }

    #[test]
    fn test_add_comment_requires_known_article() {
        let mut blog = Blog::new();
        let err = blog
            .add_comment(Comment::new(ArticleId::new(), None))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "Article", .. }));
    }

    #[test]
    fn test_guest_comment_has_no_user_side() {
        let mut f = fixture();
        let comment = f
            .blog
            .add_comment(Comment::guest(f.first, "John Doe", None, "Nice read."))
            .unwrap();
        assert_eq!(f.blog.article_comments(f.first), &[comment]);
        assert!(f.blog.user_comments(f.reader).is_empty());
    }

    #[test]
    fn test_set_comment_article_moves_comment() {
        let mut f = fixture();
        let comment = f
            .blog
            .add_comment(Comment::new(f.first, Some(f.reader)))
            .unwrap();

        f.blog.set_comment_article(comment, f.second).unwrap();

        assert!(!f.blog.article_comments(f.first).contains(&comment));
        assert_eq!(f.blog.article_comments(f.second), &[comment]);
        assert_eq!(f.blog.comment(comment).unwrap().article(), f.second);
    }

    #[test]
    fn test_set_comment_article_twice_keeps_single_entry() {
        let mut f = fixture();
        let comment = f.blog.add_comment(Comment::new(f.first, None)).unwrap();

        f.blog.set_comment_article(comment, f.second).unwrap();
        f.blog.set_comment_article(comment, f.second).unwrap();
        f.blog.set_comment_article(comment, f.first).unwrap();
        f.blog.set_comment_article(comment, f.first).unwrap();

        assert_eq!(f.blog.comment(comment).unwrap().article(), f.first);
        assert_eq!(f.blog.article_comments(f.first), &[comment]);
        assert!(f.blog.article_comments(f.second).is_empty());
    }

    #[test]
    fn test_set_comment_article_unknown_target_changes_nothing() {
        let mut f = fixture();
        let comment = f.blog.add_comment(Comment::new(f.first, None)).unwrap();

        let err = f
            .blog
            .set_comment_article(comment, ArticleId::new())
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(f.blog.article_comments(f.first), &[comment]);
        assert_eq!(f.blog.comment(comment).unwrap().article(), f.first);
    }

    #[test]
    fn test_article_comment_ops_touch_article_side_only() {
        let mut f = fixture();
        let comment = f.blog.add_comment(Comment::new(f.first, None)).unwrap();

        assert!(f.blog.article_remove_comment(f.first, comment).unwrap());
        assert!(f.blog.article_comments(f.first).is_empty());
        assert_eq!(f.blog.comment(comment).unwrap().article(), f.first);

        assert!(f.blog.article_add_comment(f.first, comment).unwrap());
        assert!(!f.blog.article_add_comment(f.first, comment).unwrap());
        assert_eq!(f.blog.article_comments(f.first), &[comment]);
    }

    #[test]
    fn test_tag_links_are_symmetric() {
        let mut f = fixture();
        let rust = f.blog.add_tag(Tag::new("Rust", "rust")).unwrap();
        let orm = f.blog.add_tag(Tag::new("ORM", "orm")).unwrap();

        f.blog.article_add_tag(f.first, rust).unwrap();
        f.blog.tag_add_article(orm, f.first).unwrap();
        f.blog.tag_add_article(rust, f.second).unwrap();
        f.blog.article_remove_tag(f.second, rust).unwrap();
        f.blog.tag_remove_article(orm, f.first).unwrap();
        f.blog.article_add_tag(f.second, orm).unwrap();

        for article in [f.first, f.second] {
            for tag in [rust, orm] {
                assert_eq!(
                    f.blog.article_has_tag(article, tag),
                    f.blog.tag_has_article(tag, article)
                );
            }
        }
        assert_eq!(f.blog.article_tags(f.first).collect::<Vec<_>>(), vec![rust]);
        assert_eq!(f.blog.tag_articles(orm).collect::<Vec<_>>(), vec![f.second]);
    }

    #[test]
    fn test_adding_tag_twice_is_idempotent() {
        let mut f = fixture();
        let rust = f.blog.add_tag(Tag::new("Rust", "rust")).unwrap();
        assert!(f.blog.article_add_tag(f.first, rust).unwrap());
        assert!(!f.blog.article_add_tag(f.first, rust).unwrap());
        assert_eq!(f.blog.tag_articles(rust).count(), 1);
    }

    #[test]
    fn test_user_collections_are_one_sided() {
        let mut f = fixture();
        let comment = f
            .blog
            .add_comment(Comment::new(f.first, Some(f.reader)))
            .unwrap();

        assert!(f.blog.user_remove_comment(f.reader, comment).unwrap());
        assert!(f.blog.user_comments(f.reader).is_empty());
        assert_eq!(
            f.blog.comment(comment).unwrap().registered_author(),
            Some(f.reader)
        );

        assert!(f.blog.user_remove_article(f.author, f.first).unwrap());
        assert_eq!(f.blog.user_articles(f.author), &[f.second]);
        assert!(f.blog.user_add_article(f.author, f.first).unwrap());
        assert!(f.blog.user_add_comment(f.reader, comment).unwrap());
    }

    #[test]
    fn test_mutable_access_keeps_links() {
        let mut f = fixture();
        let comment = f.blog.add_comment(Comment::new(f.first, None)).unwrap();
        f.blog
            .comment_mut(comment)
            .unwrap()
            .set_content("Edited content");
        assert_eq!(f.blog.comment(comment).unwrap().content(), "Edited content");
        assert_eq!(f.blog.article_comments(f.first), &[comment]);
    }

    #[test]
    fn test_profile_edits_keep_user_key() {
        let mut f = fixture();
        let user = f.blog.user_mut(f.author).unwrap();
        user.username = "renamed".to_string();
        user.set_moderator(true);

        let stored = f.blog.user(f.author).unwrap();
        assert_eq!(stored.id(), f.author);
        assert!(stored.is_moderator());

        let article = f
            .blog
            .add_article(Article::new(f.author, "Another", "another", "Article content."))
            .unwrap();
        assert!(f.blog.user_articles(f.author).contains(&article));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut f = fixture();
        let user = f.blog.user(f.author).unwrap().clone();
        assert!(matches!(
            f.blog.register_user(user),
            Err(DomainError::Duplicate { .. })
        ));
    }
}
