//! Stored record types. Distinct from `supportly_types::models::User` so the
//! password hash stays inside the store and credential code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supportly_types::models::{User, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}
