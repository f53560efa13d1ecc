use std::sync::Arc;

use axum::{Router, routing::get};
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, cookie::SameSite};

use crate::render::ViewRenderer;
use crate::routes;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub renderer: Box<dyn ViewRenderer>,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub secure: bool,
    pub idle_timeout: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "supportly_session".into(),
            secure: false,
            idle_timeout: Duration::minutes(120),
        }
    }
}

/// Cookie transport and idle expiry for any `tower_sessions` store. Every
/// request refreshes the expiry, even when the state is unchanged.
pub fn session_layer<Store>(store: Store, settings: &SessionSettings) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(settings.cookie_name.clone())
        .with_secure(settings.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(settings.idle_timeout))
        .with_always_save(true)
}

/// Every page is served from `/`; `page` in the query picks the view and the
/// POST body's `action` picks the mutation.
pub fn router<Store>(state: AppState, sessions: SessionManagerLayer<Store>) -> Router
where
    Store: SessionStore + Clone,
{
    Router::new()
        .route("/", get(routes::show_page).post(routes::submit_action))
        .route("/health", get(routes::health))
        .layer(sessions)
        .with_state(state)
}
