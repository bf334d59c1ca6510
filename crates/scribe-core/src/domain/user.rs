use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Privilege granted to a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_CONTRIBUTOR")]
    Contributor,
    #[serde(rename = "ROLE_AUTHOR")]
    Author,
    #[serde(rename = "ROLE_EDITOR")]
    Editor,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_MODERATOR")]
    Moderator,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Contributor,
        Role::Author,
        Role::Editor,
        Role::Admin,
        Role::Moderator,
    ];

    /// Canonical name used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Contributor => "ROLE_CONTRIBUTOR",
            Role::Author => "ROLE_AUTHOR",
            Role::Editor => "ROLE_EDITOR",
            Role::Admin => "ROLE_ADMIN",
            Role::Moderator => "ROLE_MODERATOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// User entity - a registered account (admin, author, moderator or reader).
///
/// The id is read-only: it keys the user in [`Blog`](super::Blog) and in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub roles: BTreeSet<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self::with_id(UserId::new(), username, email, password_hash)
    }

    /// Rebuild a user around an existing id, with no roles and fresh timestamps.
    pub fn with_id(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            roles: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Grant a role. Returns `false` if the user already had it.
    pub fn add_role(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    /// Revoke a role. Returns `false` if the user did not have it.
    pub fn remove_role(&mut self, role: Role) -> bool {
        self.roles.remove(&role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_moderator(&self) -> bool {
        self.has_role(Role::Moderator)
    }

    pub fn set_moderator(&mut self, moderator: bool) {
        if moderator {
            self.add_role(Role::Moderator);
        } else {
            self.remove_role(Role::Moderator);
        }
    }
}
