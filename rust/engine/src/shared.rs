//! Serialized access to a session shared between an input handler and a
//! renderer.
//!
//! Only one logic-mutating action may run at a time. A request that arrives
//! while another is still in flight is refused with [`GameError::Busy`]
//! instead of waiting, and the session is left untouched.

use std::sync::{Arc, Mutex, TryLockError};

use crate::errors::GameError;
use crate::session::{DealOutcome, GameSession, MoveOutcome, SessionView, UndoOutcome};

#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<GameSession>>,
}

impl SharedSession {
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Runs `f` with exclusive access, or fails with `Busy` if another
    /// action holds the session.
    pub fn try_act<T, F>(&self, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut GameSession) -> Result<T, GameError>,
    {
        let mut guard = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                tracing::debug!("action refused, session busy");
                return Err(GameError::Busy);
            }
            Err(TryLockError::Poisoned(_)) => return Err(GameError::SessionPoisoned),
        };
        f(&mut *guard)
    }

    /// Reads the session, waiting for any in-flight action to finish.
    pub fn read<T, F>(&self, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&GameSession) -> T,
    {
        let guard = self.inner.lock().map_err(|_| GameError::SessionPoisoned)?;
        Ok(f(&*guard))
    }

    pub fn deal_from_stock(&self) -> Result<DealOutcome, GameError> {
        self.try_act(GameSession::deal_from_stock)
    }

    pub fn apply_move(
        &self,
        from: usize,
        start: usize,
        to: usize,
    ) -> Result<MoveOutcome, GameError> {
        self.try_act(|s| s.apply_move(from, start, to))
    }

    pub fn undo(&self) -> Result<UndoOutcome, GameError> {
        self.try_act(GameSession::undo)
    }

    pub fn view(&self) -> Result<SessionView, GameError> {
        self.read(GameSession::view)
    }
}
