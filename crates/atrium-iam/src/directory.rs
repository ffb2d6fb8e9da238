//! Collaborator seams to the external entity stores.
//!
//! The engine owns no persistence. Account/role/org lookups and audit
//! writes go through these traits; the surrounding system supplies the
//! implementations (database-backed in production, in-memory in tests).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use atrium_core::result::AppResult;
use atrium_entity::account::{Account, AuthType};
use atrium_entity::principal::Principal;
use atrium_entity::role::Role;
use atrium_entity::trace::LoginTrace;

/// Looks up stored credentials and the subjects that own them.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find the account registered for a credential, if any.
    async fn find_by_credential(
        &self,
        auth_type: AuthType,
        auth_account: &str,
    ) -> AppResult<Option<Account>>;

    /// Build the principal for the subject owning an account.
    async fn principal_for(&self, account: &Account) -> AppResult<Principal>;
}

/// Read-only role and permission-code lookups.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Every role granted to the subject.
    async fn roles_for(&self, principal: &Principal) -> AppResult<Vec<Role>>;

    /// Permission codes granted by a role, via its resource nodes.
    ///
    /// Entries may be comma-joined multi-values; the caller splits them.
    async fn permission_codes_for(&self, role_code: &str) -> AppResult<Vec<String>>;
}

/// Organization hierarchy queries for data-scope expansion.
#[async_trait]
pub trait OrgHierarchy: Send + Sync {
    /// User ids of every subordinate under an org.
    async fn subordinate_user_ids(&self, org_id: &str) -> AppResult<Vec<String>>;

    /// Org ids of every descendant of an org, the org itself excluded.
    async fn descendant_org_ids(&self, org_id: &str) -> AppResult<Vec<String>>;
}

/// Persistence for login/logout audit traces.
#[async_trait]
pub trait LoginTraceStore: Send + Sync {
    /// Persist a newly opened trace.
    async fn open_trace(&self, trace: LoginTrace) -> AppResult<()>;

    /// Close the open trace for a subject with the given logout time.
    async fn close_trace(
        &self,
        user_type: &str,
        user_id: &str,
        logout_at: DateTime<Utc>,
    ) -> AppResult<()>;
}

/// Registry of externally tracked access-token aliases.
///
/// A principal may have outstanding token aliases held by other systems;
/// they are revoked during logout and force-logout.
#[async_trait]
pub trait TokenAliasRegistry: Send + Sync {
    /// Revoke every alias of a token. Revoking an unknown token is a no-op.
    async fn revoke(&self, token: &str) -> AppResult<()>;
}

/// Alias registry for deployments that track no token aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAliasRegistry;

#[async_trait]
impl TokenAliasRegistry for NoopAliasRegistry {
    async fn revoke(&self, _token: &str) -> AppResult<()> {
        Ok(())
    }
}
