//! Typed payload of one browser session. The whole [`SessionState`] is kept
//! under a single key of the `tower_sessions` session record.

pub mod models;
pub mod state;

pub use state::{Flash, SessionState, TicketBook, UserDirectory};
