//! Tag entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        super::article_tag::Relation::Article.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::article_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Tag.
impl From<Model> for scribe_core::domain::Tag {
    fn from(model: Model) -> Self {
        Self::with_id(model.id.into(), model.name, model.slug)
    }
}

/// Conversion from Domain Tag to SeaORM ActiveModel.
impl From<scribe_core::domain::Tag> for ActiveModel {
    fn from(tag: scribe_core::domain::Tag) -> Self {
        Self {
            id: Set(tag.id().into()),
            name: Set(tag.name().to_string()),
            slug: Set(tag.slug().to_string()),
        }
    }
}
