use tower_sessions::Session;

use supportly_store::SessionState;

use crate::error::ApiError;

const STATE_KEY: &str = "supportly.state";

/// Per-request session context: the `tower_sessions` handle plus an owned
/// copy of the typed state. Handlers mutate `state` and call
/// [`SessionContext::save`].
#[derive(Debug)]
pub struct SessionContext {
    session: Session,
    pub state: SessionState,
}

impl SessionContext {
    /// A missing, malformed, expired or unknown cookie yields empty state
    /// under a fresh id.
    pub async fn load(session: Session) -> Result<Self, ApiError> {
        let state = session
            .get::<SessionState>(STATE_KEY)
            .await?
            .unwrap_or_default();
        Ok(Self { session, state })
    }

    pub async fn save(&self) -> Result<(), ApiError> {
        self.session.insert(STATE_KEY, &self.state).await?;
        Ok(())
    }

    /// Deletes the stored record and continues under a new id with empty state.
    pub async fn reset(&mut self) -> Result<(), ApiError> {
        self.session.cycle_id().await?;
        self.state = SessionState::default();
        Ok(())
    }
}
