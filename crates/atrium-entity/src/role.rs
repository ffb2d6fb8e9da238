//! Read-only view of the external role entity.

use serde::{Deserialize, Serialize};

/// A role granted to a subject.
///
/// Roles and their resource/permission mappings are owned by the external
/// directory; this engine only reads the code to key permission lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable role code (e.g. `"ORG_ADMIN"`).
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Role {
    /// Build a role view from its code and name.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
