pub mod app;
pub mod auth;
pub mod error;
pub mod render;
pub mod routes;
pub mod session;
pub mod tickets;

pub use app::{AppState, AppStateInner, SessionSettings, router, session_layer};
pub use error::ApiError;
