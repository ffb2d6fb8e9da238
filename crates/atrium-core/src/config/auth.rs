//! Authentication and authorization configuration.

use serde::{Deserialize, Serialize};

/// Credential hashing and permission-check configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Digest algorithm used for stored password secrets.
    #[serde(default = "default_hash_algorithm")]
    pub hash_algorithm: String,
    /// Number of digest iterations applied to the salted secret.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Whether operation-level permission checks are enforced.
    ///
    /// Disabling this makes every authorize call succeed. It is a
    /// configuration escape hatch for development setups, not a security
    /// boundary.
    #[serde(default = "default_true")]
    pub enable_permission_check: bool,
    /// Role code whose holders bypass all permission checks.
    #[serde(default = "default_superadmin_role")]
    pub superadmin_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: default_hash_algorithm(),
            hash_iterations: default_hash_iterations(),
            enable_permission_check: default_true(),
            superadmin_role: default_superadmin_role(),
        }
    }
}

fn default_hash_algorithm() -> String {
    "sha256".to_string()
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

fn default_superadmin_role() -> String {
    "SUPER_ADMIN".to_string()
}
