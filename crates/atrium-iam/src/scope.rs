//! Row-level data-scope filter resolution.

use std::sync::Arc;

use atrium_core::result::AppResult;
use atrium_entity::principal::Principal;
use atrium_entity::scope::{DataScope, ScopeFilter};

use crate::directory::OrgHierarchy;

/// Derives the row-filter descriptor for a principal's data scope.
///
/// Stateless and uncached: scope resolution is cheap next to permission
/// resolution, and org membership changes must be reflected immediately
/// rather than through a cache. The descendant-org and subordinate
/// traversals are delegated to the external org hierarchy.
#[derive(Clone)]
pub struct DataScopeResolver {
    /// Org hierarchy queries.
    orgs: Arc<dyn OrgHierarchy>,
}

impl std::fmt::Debug for DataScopeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataScopeResolver").finish()
    }
}

impl DataScopeResolver {
    /// Create a resolver over the org hierarchy.
    pub fn new(orgs: Arc<dyn OrgHierarchy>) -> Self {
        Self { orgs }
    }

    /// Resolve the filter for a principal's configured scope.
    ///
    /// A principal without an org resolves the org-based scopes to an
    /// empty id list, which matches no rows.
    pub async fn resolve(&self, principal: &Principal) -> AppResult<ScopeFilter> {
        match principal.data_scope {
            DataScope::All => Ok(ScopeFilter::Unrestricted),
            DataScope::SelfOnly => Ok(ScopeFilter::OwnerIn {
                user_ids: vec![principal.user_id.clone()],
            }),
            DataScope::SelfAndSub => {
                let mut user_ids = vec![principal.user_id.clone()];
                if let Some(org_id) = &principal.org_id {
                    user_ids.extend(self.orgs.subordinate_user_ids(org_id).await?);
                }
                Ok(ScopeFilter::OwnerIn { user_ids })
            }
            DataScope::Dept => Ok(ScopeFilter::OrgIn {
                org_ids: principal.org_id.iter().cloned().collect(),
            }),
            DataScope::DeptAndSub => match &principal.org_id {
                Some(org_id) => {
                    let mut org_ids = vec![org_id.clone()];
                    org_ids.extend(self.orgs.descendant_org_ids(org_id).await?);
                    Ok(ScopeFilter::OrgIn { org_ids })
                }
                None => Ok(ScopeFilter::OrgIn {
                    org_ids: Vec::new(),
                }),
            },
        }
    }
}
