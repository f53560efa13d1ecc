use serde::{Deserialize, Serialize};

use crate::models::TicketId;

// -- Query --

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub edit: Option<String>,
}

impl PageQuery {
    pub fn page_name(&self) -> &str {
        self.page.as_deref().unwrap_or("landing")
    }

    /// Ticket id requested for editing, if it parses.
    pub fn edit_id(&self) -> Option<TicketId> {
        self.edit.as_deref().and_then(parse_ticket_id)
    }
}

// -- Form body --

/// Raw POST body. Every page posts to the same endpoint, so all fields are
/// optional here and narrowed by [`ActionForm::into_action`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActionForm {
    pub action: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub ticket_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Register(RegisterForm),
    Login(LoginForm),
    Logout,
    CreateTicket(TicketForm),
    /// `ticket_id` is `None` when the submitted id does not parse; such an id
    /// matches no ticket.
    UpdateTicket {
        ticket_id: Option<TicketId>,
        form: TicketForm,
    },
    DeleteTicket {
        ticket_id: Option<TicketId>,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::CreateTicket(_) => "create_ticket",
            Self::UpdateTicket { .. } => "update_ticket",
            Self::DeleteTicket { .. } => "delete_ticket",
        }
    }
}

impl ActionForm {
    /// Returns `None` for a missing or unknown action.
    pub fn into_action(self) -> Option<Action> {
        let action = match self.action.as_deref()? {
            "register" => Action::Register(RegisterForm {
                name: self.name.unwrap_or_default(),
                email: self.email.unwrap_or_default(),
                password: self.password.unwrap_or_default(),
                confirm_password: self.confirm_password.unwrap_or_default(),
            }),
            "login" => Action::Login(LoginForm {
                email: self.email.unwrap_or_default(),
                password: self.password.unwrap_or_default(),
            }),
            "logout" => Action::Logout,
            "create_ticket" => Action::CreateTicket(TicketForm {
                title: self.title.unwrap_or_default(),
                description: self.description.unwrap_or_default(),
                status: self.status.unwrap_or_else(|| "Open".to_string()),
            }),
            "update_ticket" => Action::UpdateTicket {
                ticket_id: self.ticket_id.as_deref().and_then(parse_ticket_id),
                form: TicketForm {
                    title: self.title.unwrap_or_default(),
                    description: self.description.unwrap_or_default(),
                    status: self.status.unwrap_or_else(|| "Open".to_string()),
                },
            },
            "delete_ticket" => Action::DeleteTicket {
                ticket_id: self.ticket_id.as_deref().and_then(parse_ticket_id),
            },
            _ => return None,
        };
        Some(action)
    }
}

fn parse_ticket_id(raw: &str) -> Option<TicketId> {
    raw.trim().parse().ok()
}

// -- Flash form data --

/// Values echoed back into the login/register forms after a failed submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub name: Option<String>,
    pub email: Option<String>,
}
