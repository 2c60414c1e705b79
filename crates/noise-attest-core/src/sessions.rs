//! Session store binding live challenges to an expiry.
//!
//! Each issued challenge gets a single-use session. A session leaves the
//! store exactly once: either `consume` removes it during verification,
//! or it expires and the next lookup (or a `purge_expired` sweep) drops
//! it. Expiry is an explicit timestamp checked at lookup time, so tests
//! can drive it through an injected [`Clock`] without sleeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Canonical string identifier for a session, derived from its challenge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the canonical session id from a challenge.
///
/// Hex encoding is injective, so byte-equal challenges always map to the
/// same id and distinct challenges never collide.
pub fn session_id(challenge: &[u8]) -> SessionId {
    SessionId(hex::encode(challenge))
}

/// A live session: the challenge it was issued for, responder-side
/// metadata, and the moment it stops being valid.
#[derive(Debug, Clone)]
pub struct Session {
    pub challenge: Vec<u8>,
    pub metadata: Vec<u8>,
    expires_at: i64,
}

impl Session {
    /// When this session expires, in epoch milliseconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

/// Millisecond wall-clock source.
///
/// Injected into the [`SessionStore`] so expiry can be simulated in tests.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// System time via chrono.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Store of live sessions keyed by [`SessionId`].
///
/// All operations take `&self`; the map is guarded by a single mutex,
/// which also makes consumption and expiry mutually exclusive per key.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
    timeout_ms: i64,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Create a store whose sessions live for `timeout_ms` milliseconds.
    pub fn new(timeout_ms: i64) -> Self {
        Self::with_clock(timeout_ms, Arc::new(SystemClock))
    }

    /// Create a store with an explicit clock.
    pub fn with_clock(timeout_ms: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            timeout_ms,
            clock,
        }
    }

    /// Register a session for `challenge`, replacing any previous session
    /// for the same challenge. Returns the session's id.
    pub fn add(&self, challenge: &[u8], metadata: Option<&[u8]>) -> SessionId {
        let id = session_id(challenge);
        let expires_at = self.clock.now_millis() + self.timeout_ms;

        let session = Session {
            challenge: challenge.to_vec(),
            metadata: metadata.unwrap_or_default().to_vec(),
            expires_at,
        };

        debug!(session = %id, expires_at, "session registered");
        self.sessions.lock().unwrap().insert(id.clone(), session);
        id
    }

    /// Atomically look up and remove the session for `id`.
    ///
    /// Returns `None` when no session exists or the session has expired;
    /// an expired entry is dropped on the way out. A session can be
    /// consumed at most once.
    pub fn consume(&self, id: &SessionId) -> Option<Session> {
        let session = self.sessions.lock().unwrap().remove(id)?;

        if session.expires_at <= self.clock.now_millis() {
            debug!(session = %id, "session expired at lookup");
            return None;
        }

        debug!(session = %id, "session consumed");
        Some(session)
    }

    /// Drop every expired session. Safe to call at any time; removing an
    /// already-consumed session is not an error.
    pub fn purge_expired(&self) {
        let now = self.clock.now_millis();
        self.sessions
            .lock()
            .unwrap()
            .retain(|_, session| session.expires_at > now);
    }

    /// Number of stored sessions, including any not yet purged.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Test clock advanced by hand.
    struct ManualClock {
        now: AtomicI64,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: AtomicI64::new(0),
            })
        }

        fn advance(&self, millis: i64) {
            self.now.fetch_add(millis, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.now.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_session_id_deterministic() {
        let challenge = vec![0xde, 0xad, 0xbe, 0xef];
        assert_eq!(session_id(&challenge), session_id(&challenge.clone()));
        assert_eq!(session_id(&challenge).to_string(), "deadbeef");
    }

    #[test]
    fn test_session_id_distinct_challenges() {
        assert_ne!(session_id(&[1, 2, 3]), session_id(&[1, 2, 4]));
    }

    #[test]
    fn test_add_and_consume() {
        let store = SessionStore::new(5000);
        let id = store.add(&[7u8; 32], Some(b"meta"));

        let session = store.consume(&id).unwrap();
        assert_eq!(session.challenge, vec![7u8; 32]);
        assert_eq!(session.metadata, b"meta");
    }

    #[test]
    fn test_metadata_defaults_to_empty() {
        let store = SessionStore::new(5000);
        let id = store.add(&[7u8; 32], None);
        assert!(store.consume(&id).unwrap().metadata.is_empty());
    }

    #[test]
    fn test_single_use() {
        let store = SessionStore::new(5000);
        let id = store.add(&[7u8; 32], None);

        assert!(store.consume(&id).is_some());
        assert!(store.consume(&id).is_none());
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new(5000);
        assert!(store.consume(&session_id(&[1, 2, 3])).is_none());
    }

    #[test]
    fn test_expiry_at_lookup() {
        let clock = ManualClock::new();
        let store = SessionStore::with_clock(5000, clock.clone());
        let id = store.add(&[7u8; 32], None);

        clock.advance(5001);
        assert!(store.consume(&id).is_none());
        // The expired entry is gone, not just hidden.
        assert!(store.is_empty());
    }

    #[test]
    fn test_not_expired_just_before_timeout() {
        let clock = ManualClock::new();
        let store = SessionStore::with_clock(5000, clock.clone());
        let id = store.add(&[7u8; 32], None);

        clock.advance(4999);
        assert!(store.consume(&id).is_some());
    }

    #[test]
    fn test_readd_replaces_session() {
        let clock = ManualClock::new();
        let store = SessionStore::with_clock(5000, clock.clone());
        let challenge = [7u8; 32];

        store.add(&challenge, None);
        clock.advance(4000);
        let id = store.add(&challenge, None);
        clock.advance(4000);

        // The second registration reset the expiry.
        assert!(store.consume(&id).is_some());
    }

    #[test]
    fn test_purge_expired() {
        let clock = ManualClock::new();
        let store = SessionStore::with_clock(5000, clock.clone());
        store.add(&[1u8; 32], None);
        clock.advance(2000);
        store.add(&[2u8; 32], None);
        clock.advance(3001);

        store.purge_expired();
        assert_eq!(store.len(), 1);

        // Purging again removes nothing and does not error.
        store.purge_expired();
        assert_eq!(store.len(), 1);
    }
}
