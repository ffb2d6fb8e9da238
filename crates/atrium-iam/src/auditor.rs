//! Best-effort login/logout trace recording.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use atrium_entity::principal::Principal;
use atrium_entity::trace::LoginTrace;

use crate::directory::LoginTraceStore;

/// Records login/logout timestamps per principal.
///
/// Audit writes never block the security path: a failed write is logged
/// at `warn` and swallowed.
#[derive(Clone)]
pub struct LoginAuditor {
    /// Trace persistence collaborator.
    store: Arc<dyn LoginTraceStore>,
}

impl std::fmt::Debug for LoginAuditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginAuditor").finish()
    }
}

impl LoginAuditor {
    /// Create an auditor over a trace store.
    pub fn new(store: Arc<dyn LoginTraceStore>) -> Self {
        Self { store }
    }

    /// Open a login trace for a subject, best effort.
    pub async fn record_login(&self, principal: &Principal) {
        let trace = LoginTrace::open(principal.user_type.clone(), principal.user_id.clone());
        if let Err(e) = self.store.open_trace(trace).await {
            warn!(
                user = %principal.user_key(),
                error = %e,
                "failed to record login trace"
            );
        }
    }

    /// Close the open trace for a subject, best effort.
    pub async fn record_logout(&self, principal: &Principal) {
        if let Err(e) = self
            .store
            .close_trace(&principal.user_type, &principal.user_id, Utc::now())
            .await
        {
            warn!(
                user = %principal.user_key(),
                error = %e,
                "failed to record logout trace"
            );
        }
    }
}
