//! Principal entity model.

use serde::{Deserialize, Serialize};

use super::scope::DataScope;

/// The authenticated identity bound to a session token.
///
/// A principal is immutable once issued: a role or org change does not
/// mutate a live principal, the resolved-permission cache is invalidated
/// instead so the next check recomputes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Discriminator for the concrete user kind (e.g. `"IamUser"`).
    pub user_type: String,
    /// Identifier of the subject within its user kind.
    pub user_id: String,
    /// Owning tenant, absent for non-tenant-scoped subjects.
    pub tenant_id: Option<String>,
    /// Organization the subject belongs to, if any.
    pub org_id: Option<String>,
    /// Human-readable display name.
    pub display_name: String,
    /// Row-level visibility policy attached to this subject.
    pub data_scope: DataScope,
}

impl Principal {
    /// Derived cross-cutting lookup key: `"{user_type}:{user_id}"`.
    ///
    /// Used for force-logout and cache invalidation by user.
    pub fn user_key(&self) -> String {
        format!("{}:{}", self.user_type, self.user_id)
    }

    /// Whether this subject belongs to a tenant.
    pub fn is_tenant_scoped(&self) -> bool {
        self.tenant_id.is_some()
    }
}
