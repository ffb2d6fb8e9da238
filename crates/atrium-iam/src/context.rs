//! Request-scoped current-subject binding.

use std::sync::Arc;

use tracing::{debug, warn};

use atrium_core::NO_TENANT_ID;
use atrium_entity::principal::Principal;

use crate::caches::SecurityCaches;

/// The current subject bound to one logical request.
///
/// Each concurrent request constructs its own context and threads it
/// through the call chain; there is deliberately no process-wide mutable
/// current-subject variable, so concurrent requests can never observe each
/// other's principal.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    /// Shared caches used to resolve tokens.
    caches: Arc<SecurityCaches>,
    /// The bound token and principal, if any.
    binding: Option<Binding>,
}

#[derive(Debug, Clone)]
struct Binding {
    token: String,
    principal: Principal,
}

impl SecurityContext {
    /// Create an unbound context over the shared caches.
    pub fn new(caches: Arc<SecurityCaches>) -> Self {
        Self {
            caches,
            binding: None,
        }
    }

    /// Resolve a token and bind its principal for the rest of the call.
    ///
    /// An unknown token leaves the context unbound (any previous binding
    /// is dropped); callers treat an unbound context as anonymous.
    pub fn attach(&mut self, token: &str) -> Option<&Principal> {
        match self.caches.session_for(token) {
            Some(entry) => {
                self.binding = Some(Binding {
                    token: token.to_string(),
                    principal: entry.principal,
                });
            }
            None => {
                warn!(token, "no session for token");
                self.binding = None;
            }
        }
        self.current()
    }

    /// The bound principal, absent when anonymous. Never fails.
    pub fn current(&self) -> Option<&Principal> {
        self.binding.as_ref().map(|binding| &binding.principal)
    }

    /// The bound session token, if any.
    pub fn token(&self) -> Option<&str> {
        self.binding.as_ref().map(|binding| binding.token.as_str())
    }

    /// The bound subject's user id, absent when anonymous.
    pub fn current_user_id(&self) -> Option<&str> {
        self.current().map(|principal| principal.user_id.as_str())
    }

    /// The bound subject's cross-cutting `"{user_type}:{user_id}"` key.
    pub fn current_user_key(&self) -> Option<String> {
        self.current().map(Principal::user_key)
    }

    /// The bound subject's tenant id, or the no-tenant sentinel.
    ///
    /// Many code paths ask for the tenant opportunistically outside of a
    /// request, so this never fails: unbound contexts and tenant-less
    /// subjects both yield [`NO_TENANT_ID`].
    pub fn current_tenant_id(&self) -> &str {
        match self.current().and_then(|p| p.tenant_id.as_deref()) {
            Some(tenant_id) => tenant_id,
            None => {
                debug!("no tenant bound to the calling context");
                NO_TENANT_ID
            }
        }
    }

    /// Drop the binding.
    pub fn detach(&mut self) {
        self.binding = None;
    }

    /// Drop the binding only if it points at the given token.
    ///
    /// Returns whether a binding was dropped. Used by logout so closing
    /// one token never detaches a context bound to another session.
    pub fn detach_if(&mut self, token: &str) -> bool {
        if self.token() == Some(token) {
            self.binding = None;
            true
        } else {
            false
        }
    }
}
