//! Resolved authorization state cached per session token.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The role codes and permission codes resolved for one session.
///
/// This is the value stored in the permission cache. Its lifetime is
/// strictly weaker than the session entry it belongs to: it may be evicted
/// independently (on a role edit) while the session remains valid, and the
/// next authorization check recomputes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAuthorization {
    /// Codes of every role granted to the subject.
    pub role_codes: HashSet<String>,
    /// Union of permission codes across all granted roles.
    pub permission_codes: HashSet<String>,
}

impl ResolvedAuthorization {
    /// Record a granted role.
    pub fn add_role(&mut self, code: impl Into<String>) {
        self.role_codes.insert(code.into());
    }

    /// Record granted permission codes.
    ///
    /// Resource nodes may carry several alternative codes joined by commas;
    /// each is recorded individually.
    pub fn add_permission_codes(&mut self, raw: &str) {
        for code in Self::split_codes(raw) {
            self.permission_codes.insert(code.to_string());
        }
    }

    /// Whether the subject holds the given role.
    pub fn has_role(&self, code: &str) -> bool {
        self.role_codes.contains(code)
    }

    /// ANY-of permission match.
    ///
    /// `required` may be a comma-joined list; holding any one of the listed
    /// codes suffices.
    pub fn grants_any(&self, required: &str) -> bool {
        Self::split_codes(required).any(|code| self.permission_codes.contains(code))
    }

    /// Split a possibly comma-joined code list into individual codes.
    pub fn split_codes(raw: &str) -> impl Iterator<Item = &str> {
        raw.split(',').map(str::trim).filter(|code| !code.is_empty())
    }
}
