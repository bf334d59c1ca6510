//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use scribe_core::domain::{Article, ArticleId, Comment, Tag, TagId, User, UserId};
use scribe_core::error::RepoError;
use scribe_core::ports::{ArticleRepository, CommentRepository, TagRepository, UserRepository};

use super::entity::article::{self, Entity as ArticleEntity};
use super::entity::article_tag::{self, Entity as ArticleTagEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::mask_email;
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL article repository.
pub type PostgresArticleRepository = PostgresBaseRepository<ArticleEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository, also managing the `articles_tags` join table.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepoError> {
        tracing::debug!(%slug, "Finding article by slug");

        let result = ArticleEntity::find()
            .filter(article::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_author(&self, author: UserId) -> Result<Vec<Article>, RepoError> {
        let result = ArticleEntity::find()
            .filter(article::Column::AuthorId.eq(author.as_uuid()))
            .order_by_asc(article::Column::PublicationDate)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_article(&self, article: ArticleId) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::ArticleId.eq(article.as_uuid()))
            .order_by_asc(comment::Column::PublicationDate)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_registered_author(&self, author: UserId) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::RegisteredAuthorId.eq(author.as_uuid()))
            .order_by_asc(comment::Column::PublicationDate)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_article(&self, article: ArticleId) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .inner_join(ArticleEntity)
            .filter(article::Column::Id.eq(article.as_uuid()))
            .order_by_asc(tag::Column::Name)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn attach(&self, article: ArticleId, tag: TagId) -> Result<(), RepoError> {
        tracing::debug!(%article, %tag, "Attaching tag to article");

        let link = article_tag::ActiveModel {
            article_id: Set(article.into()),
            tag_id: Set(tag.into()),
        };
        ArticleTagEntity::insert(link)
            .on_conflict(
                OnConflict::columns([article_tag::Column::ArticleId, article_tag::Column::TagId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await
            .map_err(write_error)?;

        Ok(())
    }

    async fn detach(&self, article: ArticleId, tag: TagId) -> Result<(), RepoError> {
        tracing::debug!(%article, %tag, "Detaching tag from article");

        let result = ArticleTagEntity::delete_by_id((article.as_uuid(), tag.as_uuid()))
            .exec(&*self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
