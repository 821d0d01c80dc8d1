// Session store
// Thread-safe map from session id to session, with idle expiry

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::listing::{SessionValues, SESSION_ID_KEY};

/// A single client session
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    values: HashMap<String, String>,
    last_active: Instant,
}

impl Session {
    /// Create a session whose `"id"` value is its own id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let mut values = HashMap::new();
        values.insert(SESSION_ID_KEY.to_string(), id.clone());
        Self {
            id,
            values,
            last_active: Instant::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_active) >= timeout
    }
}

impl SessionValues for Session {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Result of resolving the session for a request
#[derive(Debug, Clone)]
pub struct SessionLookup {
    /// Snapshot of the session for this request
    pub session: Session,
    /// Whether the session was created by this lookup (cookie must be set)
    pub created: bool,
}

/// In-memory session store
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    timeout: Duration,
}

impl SessionStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    /// Return the live session for `id`, or create a new one.
    ///
    /// The returned session is a snapshot; the stored copy has its activity
    /// timestamp refreshed.
    pub fn get_or_create(&self, id: Option<&str>) -> SessionLookup {
        self.get_or_create_at(id, Instant::now())
    }

    fn get_or_create_at(&self, id: Option<&str>, now: Instant) -> SessionLookup {
        let mut sessions = self.lock();

        if let Some(id) = id {
            let expired = match sessions.get_mut(id) {
                Some(session) if !session.is_expired(now, self.timeout) => {
                    session.last_active = now;
                    return SessionLookup {
                        session: session.clone(),
                        created: false,
                    };
                }
                Some(_) => true,
                None => false,
            };
            if expired {
                sessions.remove(id);
                crate::logger::log_debug(&format!("Deleted outdated session: {id}"));
            }
        }

        let mut session = Session::new(uuid::Uuid::new_v4().simple().to_string());
        session.last_active = now;
        sessions.insert(session.id.clone(), session.clone());
        SessionLookup {
            session,
            created: true,
        }
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.timeout));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
