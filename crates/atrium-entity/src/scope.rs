//! Data scope policy and the row-filter descriptor it resolves to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row-level visibility policy attached to a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataScope {
    /// Only rows owned by the subject itself.
    #[serde(rename = "SELF")]
    SelfOnly,
    /// Rows owned by the subject or its subordinates.
    #[serde(rename = "SELF_AND_SUB")]
    SelfAndSub,
    /// Rows belonging to the subject's own organization.
    #[serde(rename = "DEPT")]
    Dept,
    /// Rows belonging to the subject's organization or any descendant org.
    #[serde(rename = "DEPT_AND_SUB")]
    DeptAndSub,
    /// No row filtering.
    #[serde(rename = "ALL")]
    All,
}

impl DataScope {
    /// Return the scope as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfOnly => "SELF",
            Self::SelfAndSub => "SELF_AND_SUB",
            Self::Dept => "DEPT",
            Self::DeptAndSub => "DEPT_AND_SUB",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for DataScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataScope {
    type Err = atrium_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SELF" => Ok(Self::SelfOnly),
            "SELF_AND_SUB" => Ok(Self::SelfAndSub),
            "DEPT" => Ok(Self::Dept),
            "DEPT_AND_SUB" => Ok(Self::DeptAndSub),
            "ALL" => Ok(Self::All),
            _ => Err(atrium_core::AppError::validation(format!(
                "Invalid data scope: '{s}'. Expected one of: SELF, SELF_AND_SUB, DEPT, DEPT_AND_SUB, ALL"
            ))),
        }
    }
}

/// Row-filter descriptor handed to the data-access collaborator.
///
/// The engine only describes the filter; translating it into SQL or any
/// other query form is the data layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScopeFilter {
    /// No filtering, every row is visible.
    Unrestricted,
    /// Rows whose owner column matches one of these user ids.
    OwnerIn {
        /// Allowed owner user ids. Empty matches nothing.
        user_ids: Vec<String>,
    },
    /// Rows whose org column matches one of these org ids.
    OrgIn {
        /// Allowed org ids. Empty matches nothing.
        org_ids: Vec<String>,
    },
}

impl ScopeFilter {
    /// Whether this filter passes every row through.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}
