//! The two shared caches: live sessions and resolved authorization.

use atrium_cache::TokenCache;
use atrium_entity::authorization::ResolvedAuthorization;
use atrium_entity::session::SessionEntry;

/// Bundles the session cache and the permission cache.
///
/// The split matters: a role or resource edit invalidates only the
/// permission cache (cheap, no forced re-login) while sessions persist.
/// These two maps are the only mutable shared state in the engine; they
/// exclusively own their entries.
#[derive(Debug, Default)]
pub struct SecurityCaches {
    /// token → live session.
    pub sessions: TokenCache<SessionEntry>,
    /// token → lazily resolved roles and permission codes.
    pub permissions: TokenCache<ResolvedAuthorization>,
}

impl SecurityCaches {
    /// Create both caches empty.
    pub fn new() -> Self {
        Self {
            sessions: TokenCache::new(),
            permissions: TokenCache::new(),
        }
    }

    /// Tokens of every live session belonging to a subject.
    ///
    /// Snapshot scan, O(n) over live sessions; sessions created after the
    /// scan starts are not included.
    pub fn session_tokens_for(&self, user_key: &str) -> Vec<String> {
        self.sessions
            .tokens_where(|entry| entry.principal.user_key() == user_key)
    }

    /// Look up the live session for a token, if any.
    pub fn session_for(&self, token: &str) -> Option<SessionEntry> {
        self.sessions.get(token)
    }

    /// Drop every session and every cached authorization.
    pub fn clear_all(&self) {
        self.sessions.clear();
        self.permissions.clear();
    }
}
