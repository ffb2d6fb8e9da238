//! Credential account entity model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authentication types a subject may hold credentials for.
///
/// One principal may have several accounts, at most one per auth type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    /// Local username/password credential.
    Password,
    /// Credential registered by a single-sign-on provider.
    SingleSignOn,
    /// Credential registered by an external IM provider.
    ExternalIm,
    /// Any other externally validated credential.
    Other,
}

impl AuthType {
    /// Return the auth type as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "PASSWORD",
            Self::SingleSignOn => "SINGLE_SIGN_ON",
            Self::ExternalIm => "EXTERNAL_IM",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = atrium_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PASSWORD" => Ok(Self::Password),
            "SINGLE_SIGN_ON" => Ok(Self::SingleSignOn),
            "EXTERNAL_IM" => Ok(Self::ExternalIm),
            "OTHER" => Ok(Self::Other),
            _ => Err(atrium_core::AppError::validation(format!(
                "Invalid auth type: '{s}'. Expected one of: PASSWORD, SINGLE_SIGN_ON, EXTERNAL_IM, OTHER"
            ))),
        }
    }
}

/// Account status gate checked before credentials are verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account is active and can log in.
    Active,
    /// Account is deactivated by an admin.
    Inactive,
    /// Account is locked.
    Locked,
}

impl AccountStatus {
    /// Check if the account can log in with this status.
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Locked => "locked",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored credential for one subject and one auth type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Discriminator of the owning user kind.
    pub user_type: String,
    /// Identifier of the owning subject.
    pub user_id: String,
    /// Which authentication mechanism this credential belongs to.
    pub auth_type: AuthType,
    /// Login identifier (username, SSO subject, IM open id).
    pub auth_account: String,
    /// Hashed secret for password accounts, opaque token for the rest.
    ///
    /// Invariant: for `auth_type == Password` this is always the hashed
    /// form at rest, never plaintext.
    #[serde(skip_serializing)]
    pub auth_secret: String,
    /// Salt for password accounts. Generated once, never regenerated.
    pub secret_salt: Option<String>,
    /// Status gate.
    pub status: AccountStatus,
}
