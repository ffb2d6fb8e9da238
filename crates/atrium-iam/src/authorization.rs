//! Operation-level permission checks with lazy resolution caching.

use std::sync::Arc;

use tracing::{debug, info, warn};

use atrium_core::AppError;
use atrium_core::config::auth::AuthConfig;
use atrium_core::result::AppResult;
use atrium_entity::authorization::ResolvedAuthorization;
use atrium_entity::principal::Principal;

use crate::caches::SecurityCaches;
use crate::context::SecurityContext;
use crate::directory::RoleDirectory;

/// Decides whether a subject may invoke an operation gated by a
/// permission code.
///
/// Resolution unions permission codes across every role of the subject via
/// the external role directory; the result is cached per token and evicted
/// independently of the session, so a role edit takes effect without
/// forcing re-login.
#[derive(Clone)]
pub struct AuthorizationEngine {
    /// Role and permission-code lookups.
    roles: Arc<dyn RoleDirectory>,
    /// Shared session and permission caches.
    caches: Arc<SecurityCaches>,
    /// Permission-check flag and super-admin role code.
    config: AuthConfig,
}

impl std::fmt::Debug for AuthorizationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationEngine")
            .field("config", &self.config)
            .finish()
    }
}

impl AuthorizationEngine {
    /// Create an engine over its collaborators.
    pub fn new(
        roles: Arc<dyn RoleDirectory>,
        caches: Arc<SecurityCaches>,
        config: AuthConfig,
    ) -> Self {
        Self {
            roles,
            caches,
            config,
        }
    }

    /// Check that the bound subject holds a required permission code.
    ///
    /// `required_codes` may be a comma-joined list meaning "any of these
    /// suffices". Super-admins pass unconditionally. When the
    /// permission-check flag is disabled every call passes — that is a
    /// configuration escape hatch, not a security boundary.
    ///
    /// A denial carries the missing code(s) and is never swallowed here;
    /// the calling layer decides how to surface it.
    pub async fn authorize(&self, ctx: &SecurityContext, required_codes: &str) -> AppResult<()> {
        if !self.config.enable_permission_check {
            debug!("permission check disabled by configuration");
            return Ok(());
        }

        let missing = || -> Vec<String> {
            ResolvedAuthorization::split_codes(required_codes)
                .map(str::to_string)
                .collect()
        };

        let (Some(token), Some(principal)) = (ctx.token(), ctx.current()) else {
            warn!(required_codes, "permission check with no bound subject");
            return Err(AppError::permission_denied(&missing()));
        };

        let resolved = self.resolved_for(token, principal).await?;
        if resolved.has_role(&self.config.superadmin_role) {
            return Ok(());
        }
        if resolved.grants_any(required_codes) {
            return Ok(());
        }

        warn!(
            user = %principal.user_key(),
            required_codes,
            "permission denied"
        );
        Err(AppError::permission_denied(&missing()))
    }

    /// Direct role-membership test against the directory, uncached.
    pub async fn check_role(&self, principal: &Principal, role_code: &str) -> AppResult<bool> {
        let roles = self.roles.roles_for(principal).await?;
        Ok(roles.iter().any(|role| role.code == role_code))
    }

    /// Whether the bound subject holds the super-admin role.
    pub async fn is_superadmin(&self, ctx: &SecurityContext) -> AppResult<bool> {
        match ctx.current() {
            Some(principal) => self.check_role(principal, &self.config.superadmin_role).await,
            None => Ok(false),
        }
    }

    /// Evict the cached authorization of every session of one subject.
    ///
    /// Sessions stay valid; the next check per session recomputes. Used
    /// after a single-user role change.
    pub fn clear_authorization_cache(&self, user_key: &str) {
        let tokens = self.caches.session_tokens_for(user_key);
        for token in &tokens {
            self.caches.permissions.remove(token);
        }
        info!(
            user = user_key,
            sessions = tokens.len(),
            "cleared cached authorization"
        );
    }

    /// Evict every cached authorization. Used after a role-permission edit.
    pub fn clear_all_authorization_cache(&self) {
        self.caches.permissions.clear();
        debug!("cleared all cached authorization");
    }

    /// Cached resolution for a token, computing and caching on miss.
    async fn resolved_for(
        &self,
        token: &str,
        principal: &Principal,
    ) -> AppResult<ResolvedAuthorization> {
        if let Some(resolved) = self.caches.permissions.get(token) {
            return Ok(resolved);
        }
        let resolved = self.resolve(principal).await?;
        self.caches.permissions.put(token, resolved.clone());
        Ok(resolved)
    }

    /// Union role and permission codes across every role of the subject.
    async fn resolve(&self, principal: &Principal) -> AppResult<ResolvedAuthorization> {
        let mut resolved = ResolvedAuthorization::default();
        for role in self.roles.roles_for(principal).await? {
            for raw in self.roles.permission_codes_for(&role.code).await? {
                resolved.add_permission_codes(&raw);
            }
            resolved.add_role(role.code);
        }
        debug!(
            user = %principal.user_key(),
            roles = resolved.role_codes.len(),
            codes = resolved.permission_codes.len(),
            "resolved authorization"
        );
        Ok(resolved)
    }
}
