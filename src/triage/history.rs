//! Bounded per-session history of past assessment summaries.
//!
//! In-memory only, keyed by session id, backed by RwLock (single writer,
//! concurrent readers). Holds severity summaries, never message text, so
//! memory stays bounded and no sensitive content outlives its assessment.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use crate::config::SESSION_HISTORY_CAP;

use super::types::{SessionHistoryEntry, TriageError};

/// In-memory session history store.
pub struct SessionHistoryStore {
    sessions: RwLock<HashMap<String, VecDeque<SessionHistoryEntry>>>,
}

impl SessionHistoryStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Append an entry to a session's ring, creating the session on first
    /// write and evicting the oldest entry past the cap.
    pub fn record(&self, session_id: &str, entry: SessionHistoryEntry) -> Result<(), TriageError> {
        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockFailed)?;

        let ring = sessions.entry(session_id.to_string()).or_default();
        ring.push_back(entry);
        while ring.len() > SESSION_HISTORY_CAP {
            ring.pop_front();
        }

        Ok(())
    }

    /// Snapshot of a session's history, most-recent-last.
    /// Unknown session ids read as empty history.
    pub fn history_for(&self, session_id: &str) -> Result<Vec<SessionHistoryEntry>, TriageError> {
        let sessions = self.sessions.read().map_err(|_| TriageError::LockFailed)?;

        Ok(sessions
            .get(session_id)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Number of sessions with at least one recorded assessment.
    pub fn session_count(&self) -> Result<usize, TriageError> {
        let sessions = self.sessions.read().map_err(|_| TriageError::LockFailed)?;
        Ok(sessions.len())
    }
}

impl Default for SessionHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
