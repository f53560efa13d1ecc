use std::str::FromStr;

use serde::Serialize;

use crate::api::FormData;
use crate::models::{Ticket, TicketStats, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Login,
    Register,
    Dashboard,
    Tickets,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Login => "login",
            Self::Register => "register",
            Self::Dashboard => "dashboard",
            Self::Tickets => "tickets",
        }
    }

    /// Pages that require an authenticated session.
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard | Self::Tickets)
    }

    /// Pages a logged-in user is bounced away from.
    pub fn is_auth_form(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landing" => Ok(Self::Landing),
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            "dashboard" => Ok(Self::Dashboard),
            "tickets" => Ok(Self::Tickets),
            other => Err(UnknownPage(other.to_string())),
        }
    }
}

// -- View-models handed to the renderer --

#[derive(Debug, Clone, Default, Serialize)]
pub struct LandingView {
    pub success: Option<String>,
}

/// Shared by the login and register pages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthFormView {
    pub error: Vec<String>,
    pub success: Option<String>,
    pub form: FormData,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user: User,
    pub stats: TicketStats,
    pub success: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketsView {
    pub user: User,
    pub tickets: Vec<Ticket>,
    pub edit_ticket: Option<Ticket>,
    pub error: Vec<String>,
    pub success: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", content = "data", rename_all = "snake_case")]
pub enum View {
    Landing(LandingView),
    Login(AuthFormView),
    Register(AuthFormView),
    Dashboard(DashboardView),
    Tickets(TicketsView),
}
