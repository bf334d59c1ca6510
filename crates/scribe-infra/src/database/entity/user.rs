//! User entity for SeaORM.

use std::collections::BTreeSet;

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::Role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// Role names, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub roles: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::article::Entity")]
    Article,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn roles_to_json(roles: &BTreeSet<Role>) -> Json {
    Json::from(roles.iter().map(Role::as_str).collect::<Vec<_>>())
}

fn roles_from_json(value: Json) -> BTreeSet<Role> {
    let names: Vec<String> = match serde_json::from_value(value) {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed roles column, treating as empty");
            return BTreeSet::new();
        }
    };

    names
        .iter()
        .filter_map(|name| match name.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unknown role");
                None
            }
        })
        .collect()
}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for scribe_core::domain::User {
    fn from(model: Model) -> Self {
        let mut user = Self::with_id(
            model.id.into(),
            model.username,
            model.email,
            model.password_hash,
        );
        user.roles = roles_from_json(model.roles);
        user.created_at = model.created_at.into();
        user.updated_at = model.updated_at.into();
        user
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<scribe_core::domain::User> for ActiveModel {
    fn from(user: scribe_core::domain::User) -> Self {
        Self {
            id: Set(user.id().into()),
            roles: Set(roles_to_json(&user.roles)),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_round_trip_through_json() {
        let roles: BTreeSet<Role> = [Role::Moderator, Role::Author].into_iter().collect();
        let json = roles_to_json(&roles);
        assert_eq!(json, serde_json::json!(["ROLE_AUTHOR", "ROLE_MODERATOR"]));
        assert_eq!(roles_from_json(json), roles);
    }

    #[test]
    fn test_unknown_roles_are_skipped() {
        let roles = roles_from_json(serde_json::json!(["ROLE_MODERATOR", "ROLE_SUPERHERO"]));
        assert_eq!(roles.into_iter().collect::<Vec<_>>(), vec![Role::Moderator]);
        assert!(roles_from_json(serde_json::json!({"not": "a list"})).is_empty());
    }
}
