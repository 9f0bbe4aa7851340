//! # Module: User Model
//!
//! ## Responsibility
//! The dashboard's only entity, [`User`], its store-assigned [`UserId`], the
//! id-less payload [`UserFields`], and the closed [`Role`] enumeration.
//!
//! ## Guarantees
//! - `Role` is closed: every value is one of Admin, Editor, Viewer
//! - `Role::ALL` is the canonical bucket order used by chart, legend and form
//!
//! ## NOT Responsible For
//! - Assigning ids (that belongs to `store`)
//! - Validating names and emails (that belongs to `form`)

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned user identifier. Strictly increasing within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Returns the raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User role. The enumeration is closed.
///
/// Deserializes through [`FromStr`], so config files may spell roles in any
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Can modify content.
    Editor,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// All roles in canonical order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Viewer];

    /// Returns the display label, e.g. `"Admin"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }

    /// Position of this role in [`Role::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Admin => 0,
            Self::Editor => 1,
            Self::Viewer => 2,
        }
    }

    /// The next role in canonical order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous role in canonical order, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected Admin, Editor or Viewer)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRole(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A user record without its id: the payload of add, update and form submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UserFields {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Assigned role.
    pub role: Role,
}

impl UserFields {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned id, immutable after creation.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Assigned role.
    pub role: Role,
}

impl User {
    /// Combines an id with a set of fields.
    pub fn from_fields(id: UserId, fields: UserFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            role: fields.role,
        }
    }

    /// Returns a copy of this user's fields, without the id.
    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    /// Case-insensitive substring match on name, email or role label.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.role.label().to_lowercase().contains(needle)
    }
}
