//! Session entry model keyed by opaque token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, AuthType};
use super::principal::Principal;

/// Snapshot of the credential a session was opened with.
///
/// The secret itself is never retained, only the auth type and the login
/// identifier, enough to audit which credential produced the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRef {
    /// Authentication mechanism used at login.
    pub auth_type: AuthType,
    /// Login identifier used at login.
    pub auth_account: String,
}

/// One live session: the value stored in the session cache under its token.
///
/// Created on successful authentication, removed on logout, never mutated
/// in place. A refresh replaces the entry wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    /// The authenticated subject.
    pub principal: Principal,
    /// Which credential opened this session.
    pub credentials: CredentialRef,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl SessionEntry {
    /// Build a session entry for a principal authenticated via `account`.
    pub fn new(principal: Principal, account: &Account) -> Self {
        Self {
            principal,
            credentials: CredentialRef {
                auth_type: account.auth_type,
                auth_account: account.auth_account.clone(),
            },
            created_at: Utc::now(),
        }
    }
}
