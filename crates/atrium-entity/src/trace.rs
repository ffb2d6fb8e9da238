//! Login trace audit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One login/logout audit record for a subject.
///
/// One open trace (`logout_at` absent) exists per active session; it is
/// closed on logout. Persistence is the audit collaborator's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginTrace {
    /// Discriminator of the user kind.
    pub user_type: String,
    /// Identifier of the subject.
    pub user_id: String,
    /// When the session was opened.
    pub login_at: DateTime<Utc>,
    /// When the session was closed, absent while the session is live.
    pub logout_at: Option<DateTime<Utc>>,
}

impl LoginTrace {
    /// Open a new trace for a subject logging in now.
    pub fn open(user_type: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            user_type: user_type.into(),
            user_id: user_id.into(),
            login_at: Utc::now(),
            logout_at: None,
        }
    }
}
