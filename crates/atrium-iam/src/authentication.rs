//! Credential validation, session issue, and logout flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use atrium_core::AppError;
use atrium_core::result::AppResult;
use atrium_entity::account::{Account, AccountStatus, AuthType};
use atrium_entity::principal::Principal;
use atrium_entity::session::SessionEntry;

use crate::auditor::LoginAuditor;
use crate::caches::SecurityCaches;
use crate::directory::{AccountDirectory, TokenAliasRegistry};
use crate::password::SaltedPasswordHasher;

/// Result of a successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    /// Opaque token identifying the new session.
    pub token: String,
    /// The authenticated subject.
    pub principal: Principal,
}

/// Validates credentials against stored accounts and manages sessions.
///
/// Stateless apart from the shared caches; safe to clone and share across
/// concurrent requests.
#[derive(Clone)]
pub struct AuthenticationEngine {
    /// Account and principal lookups.
    accounts: Arc<dyn AccountDirectory>,
    /// Shared session and permission caches.
    caches: Arc<SecurityCaches>,
    /// Configured credential hasher.
    hasher: SaltedPasswordHasher,
    /// Best-effort login/logout trace recording.
    auditor: LoginAuditor,
    /// Externally tracked access-token aliases.
    aliases: Arc<dyn TokenAliasRegistry>,
}

impl std::fmt::Debug for AuthenticationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationEngine")
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl AuthenticationEngine {
    /// Create an engine over its collaborators.
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        caches: Arc<SecurityCaches>,
        hasher: SaltedPasswordHasher,
        auditor: LoginAuditor,
        aliases: Arc<dyn TokenAliasRegistry>,
    ) -> Self {
        Self {
            accounts,
            caches,
            hasher,
            auditor,
            aliases,
        }
    }

    /// Authenticate a credential and open a session.
    ///
    /// On success a fresh opaque token is issued, the session entry is
    /// cached, and a login trace is opened best-effort. The permission
    /// cache is NOT pre-populated; resolution happens lazily on the first
    /// authorization check so sessions that never hit a guarded operation
    /// pay nothing.
    ///
    /// Credential failures are reported as a generic invalid-credentials
    /// error that does not say which field was wrong.
    pub async fn authenticate(
        &self,
        auth_type: AuthType,
        auth_account: &str,
        raw_secret: &str,
    ) -> AppResult<AuthenticatedSession> {
        let account = self
            .accounts
            .find_by_credential(auth_type, auth_account)
            .await?
            .ok_or_else(|| AppError::invalid_credentials("invalid account or credentials"))?;

        match account.status {
            AccountStatus::Inactive => {
                return Err(AppError::account_inactive("account is deactivated"));
            }
            AccountStatus::Locked => {
                return Err(AppError::account_locked("account is locked"));
            }
            AccountStatus::Active => {}
        }

        if !self.verify_secret(&account, raw_secret)? {
            warn!(auth_account, "credential verification failed");
            return Err(AppError::invalid_credentials("invalid account or credentials"));
        }

        let principal = self.accounts.principal_for(&account).await?;
        let token = Uuid::new_v4().simple().to_string();
        self.caches
            .sessions
            .put(&token, SessionEntry::new(principal.clone(), &account));
        self.auditor.record_login(&principal).await;

        info!(user = %principal.user_key(), "login succeeded");
        Ok(AuthenticatedSession { token, principal })
    }

    /// Close one session by token. Idempotent: an absent token is a no-op.
    ///
    /// The logout trace and the alias revocation are best-effort; the
    /// cache removals always happen. Callers holding a bound
    /// [`SecurityContext`](crate::context::SecurityContext) detach it
    /// explicitly via `detach_if`.
    pub async fn logout(&self, token: &str) {
        if let Some(entry) = self.caches.sessions.get(token) {
            self.auditor.record_logout(&entry.principal).await;
        }
        self.caches.sessions.remove(token);
        self.caches.permissions.remove(token);
        if let Err(e) = self.aliases.revoke(token).await {
            warn!(error = %e, "failed to revoke token aliases");
        }
        debug!(token, "session closed");
    }

    /// Force-close every session of a subject. Returns how many were closed.
    ///
    /// Scans a snapshot of the session cache: a session created while the
    /// scan runs postdates the force-logout request and survives it.
    pub async fn force_logout(&self, user_key: &str) -> u32 {
        let tokens = self.caches.session_tokens_for(user_key);
        let mut closed = 0u32;
        for token in &tokens {
            let entry = self.caches.sessions.remove(token);
            self.caches.permissions.remove(token);
            if let Err(e) = self.aliases.revoke(token).await {
                warn!(user = user_key, error = %e, "failed to revoke token aliases");
            }
            if let Some(entry) = entry {
                self.auditor.record_logout(&entry.principal).await;
                closed += 1;
            }
        }
        if closed > 0 {
            info!(user = user_key, sessions = closed, "forced logout");
        }
        closed
    }

    /// Verify a raw secret against a stored account.
    fn verify_secret(&self, account: &Account, raw_secret: &str) -> AppResult<bool> {
        match account.auth_type {
            AuthType::Password => {
                let salt = account.secret_salt.as_deref().ok_or_else(|| {
                    AppError::configuration("password account has no secret salt")
                })?;
                Ok(self.hasher.hash(raw_secret, salt)? == account.auth_secret)
            }
            // Non-password secrets are opaque tokens validated by the
            // external provider; here they compare as-is.
            _ => Ok(account.auth_secret == raw_secret),
        }
    }
}
