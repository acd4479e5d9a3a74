//! Explicit current-session holder

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use uuid::Uuid;

use medai_common::{Error, Result};

use crate::types::Session;

/// Work to run once when a session ends
type EndHook = Box<dyn FnOnce() + Send + Sync>;

#[derive(Default)]
struct Slot {
    session: Option<Session>,
    on_end: Vec<EndHook>,
}

/// Cloneable handle to the current session.
///
/// Clones share the same slot, so logging out through one handle is seen by
/// every flow holding another. A session ends when it is cleared or replaced
/// by another login; hooks registered for it run at that point, after the
/// slot lock is released.
#[derive(Clone, Default)]
pub struct SessionStore {
    current: Arc<RwLock<Slot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session, if any
    pub fn get(&self) -> Option<Session> {
        match self.current.read() {
            Ok(slot) => slot.session.clone(),
            Err(_) => {
                tracing::error!("Session lock poisoned");
                None
            }
        }
    }

    /// Start a session, ending any previous one
    pub fn set(&self, session: Session) -> Result<()> {
        let ended = {
            let mut slot = self.write()?;
            tracing::info!(session_id = %session.id, username = %session.user.username, "Session started");
            let ended = end_current(&mut slot);
            slot.session = Some(session);
            ended
        };
        run_hooks(ended);
        Ok(())
    }

    /// Drop the current session; returns the one that was present
    pub fn clear(&self) -> Result<Option<Session>> {
        let (previous, ended) = {
            let mut slot = self.write()?;
            let ended = end_current(&mut slot);
            (slot.session.take(), ended)
        };
        run_hooks(ended);
        Ok(previous)
    }

    /// Drop the session only if it is still `session_id`
    pub fn end(&self, session_id: Uuid) -> Result<Option<Session>> {
        let (previous, ended) = {
            let mut slot = self.write()?;
            if slot.session.as_ref().map(|s| s.id) != Some(session_id) {
                return Ok(None);
            }
            let ended = end_current(&mut slot);
            (slot.session.take(), ended)
        };
        run_hooks(ended);
        Ok(previous)
    }

    /// Run `hook` once when session `session_id` ends.
    ///
    /// Runs immediately if that session is no longer the current one.
    pub fn on_end<F>(&self, session_id: Uuid, hook: F) -> Result<()>
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        {
            let mut slot = self.write()?;
            if slot.session.as_ref().map(|s| s.id) == Some(session_id) {
                slot.on_end.push(Box::new(hook));
                return Ok(());
            }
        }
        hook();
        Ok(())
    }

    /// Current session, or `SessionAbsent` for a redirect to login
    pub fn require(&self) -> Result<Session> {
        self.get().ok_or(Error::SessionAbsent)
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Slot>> {
        self.current
            .write()
            .map_err(|_| Error::Internal("Session lock poisoned".to_string()))
    }
}

impl std::fmt::Debug for SessionStore {
    #[mutants::skip] // Diagnostic output only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.get().map(|s| s.id))
            .finish()
    }
}

fn end_current(slot: &mut Slot) -> Vec<EndHook> {
    if let Some(session) = &slot.session {
        tracing::info!(session_id = %session.id, "Session ended");
    }
    std::mem::take(&mut slot.on_end)
}

fn run_hooks(hooks: Vec<EndHook>) {
    for hook in hooks {
        hook();
    }
}
