use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supportly_types::api::FormData;
use supportly_types::models::{Ticket, TicketId, TicketStatus, UserId};

use crate::models::UserRecord;

/// Everything a single browser session owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub user_id: Option<UserId>,
    pub users: UserDirectory,
    pub tickets: TicketBook,
    pub flash: Flash,
}

impl SessionState {
    /// The authenticated user, if the referenced record still exists.
    pub fn current_user(&self) -> Option<&UserRecord> {
        self.user_id.and_then(|id| self.users.get(id))
    }
}

// -- Users --

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDirectory {
    users: BTreeMap<UserId, UserRecord>,
    last_id: UserId,
}

impl UserDirectory {
    pub fn insert(
        &mut self,
        name: String,
        email: String,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> &UserRecord {
        self.last_id += 1;
        let id = self.last_id;
        self.users.entry(id).or_insert(UserRecord {
            id,
            name,
            email,
            password_hash,
            created_at: now,
        })
    }

    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.users.get(&id)
    }

    /// Exact, case-sensitive match.
    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users.values().find(|user| user.email == email)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

// -- Tickets --

/// Tickets keyed by id. Ids only ever grow, so map order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketBook {
    tickets: BTreeMap<TicketId, Ticket>,
    last_id: TicketId,
}

impl TicketBook {
    pub fn insert(
        &mut self,
        owner_user_id: UserId,
        title: String,
        description: String,
        status: TicketStatus,
        now: DateTime<Utc>,
    ) -> &Ticket {
        self.last_id += 1;
        let id = self.last_id;
        self.tickets.entry(id).or_insert(Ticket {
            id,
            owner_user_id,
            title,
            description,
            status,
            created_at: now,
            updated_at: None,
        })
    }

    pub fn owned_by(&self, owner: UserId) -> impl Iterator<Item = &Ticket> {
        self.tickets
            .values()
            .filter(move |ticket| ticket.owner_user_id == owner)
    }

    /// `None` both when the ticket does not exist and when `owner` does not own it.
    pub fn get_owned(&self, id: TicketId, owner: UserId) -> Option<&Ticket> {
        self.tickets
            .get(&id)
            .filter(|ticket| ticket.owner_user_id == owner)
    }

    pub fn get_owned_mut(&mut self, id: TicketId, owner: UserId) -> Option<&mut Ticket> {
        self.tickets
            .get_mut(&id)
            .filter(|ticket| ticket.owner_user_id == owner)
    }

    pub fn remove_owned(&mut self, id: TicketId, owner: UserId) -> Option<Ticket> {
        self.get_owned(id, owner)?;
        self.tickets.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

// -- Flash --

/// One-shot messages for the next render. Setting a kind replaces whatever
/// was pending for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flash {
    pub error: Vec<String>,
    pub success: Option<String>,
    pub form: Option<FormData>,
}

impl Flash {
    pub fn set_error(&mut self, messages: Vec<String>) {
        self.error = messages;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    pub fn set_form(&mut self, form: FormData) {
        self.form = Some(form);
    }

    /// Drains every pending message at once.
    pub fn take(&mut self) -> Flash {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_empty() && self.success.is_none() && self.form.is_none()
    }
}
