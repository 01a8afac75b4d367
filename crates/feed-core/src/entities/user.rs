//! User entity - an account that authors posts and reacts to them

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// User entity
///
/// Credentials live with the identity collaborator; this record only carries
/// what the feed shows next to a post or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Display name: "name surname", falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.name, self.surname);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Values required to register a user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub surname: String,
}
