use crate::db::sessions;
use crate::errors::AppResult;
use crate::workflow::state::WorkflowSession;
use rusqlite::Connection;

/// A workflow session bound to its id, handed to every front-end handler.
///
/// Opening a context purges idle sessions first, so an expired session
/// comes back fresh. A context is only written back after a transition
/// succeeded.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: String,
    pub session: WorkflowSession,
    pub is_new: bool,
}

impl SessionContext {
    pub fn open(conn: &Connection, id: &str, ttl_minutes: i64) -> AppResult<Self> {
        sessions::purge_expired(conn, ttl_minutes)?;
        let (session, is_new) = match sessions::load(conn, id)? {
            Some(s) => (s, false),
            None => {
                tracing::debug!(session = id, "starting new workflow session");
                (WorkflowSession::new(), true)
            }
        };
        Ok(Self {
            id: id.to_string(),
            session,
            is_new,
        })
    }

    /// Replace the session with `next` and persist it.
    pub fn store(&mut self, conn: &Connection, next: WorkflowSession) -> AppResult<()> {
        sessions::save(conn, &self.id, &next)?;
        self.session = next;
        self.is_new = false;
        Ok(())
    }

    /// Forget the session entirely.
    pub fn discard(self, conn: &Connection) -> AppResult<bool> {
        sessions::delete(conn, &self.id)
    }
}
