#![allow(dead_code)]
//! Shared in-memory collaborator fakes for the integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use atrium_core::AppError;
use atrium_core::config::auth::AuthConfig;
use atrium_core::result::AppResult;
use atrium_entity::account::{Account, AccountStatus, AuthType};
use atrium_entity::principal::Principal;
use atrium_entity::role::Role;
use atrium_entity::scope::DataScope;
use atrium_entity::trace::LoginTrace;
use atrium_iam::directory::{
    AccountDirectory, LoginTraceStore, RoleDirectory, TokenAliasRegistry,
};
use atrium_iam::{
    AuthenticatedSession, AuthenticationEngine, AuthorizationEngine, LoginAuditor,
    SaltedPasswordHasher, SecurityCaches, SecurityContext,
};

/// Account and principal store backed by plain maps.
#[derive(Default)]
pub struct InMemoryDirectory {
    accounts: Mutex<Vec<Account>>,
    principals: Mutex<HashMap<String, Principal>>,
}

impl InMemoryDirectory {
    pub fn insert(&self, account: Account, principal: Principal) {
        self.principals
            .lock()
            .unwrap()
            .insert(principal.user_key(), principal);
        self.accounts.lock().unwrap().push(account);
    }
}

#[async_trait]
impl AccountDirectory for InMemoryDirectory {
    async fn find_by_credential(
        &self,
        auth_type: AuthType,
        auth_account: &str,
    ) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.auth_type == auth_type && a.auth_account == auth_account)
            .cloned())
    }

    async fn principal_for(&self, account: &Account) -> AppResult<Principal> {
        let key = format!("{}:{}", account.user_type, account.user_id);
        self.principals
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("no user for account {key}")))
    }
}

/// Role assignments and role→permission-code grants, editable mid-test.
#[derive(Default)]
pub struct InMemoryRoles {
    by_user: Mutex<HashMap<String, Vec<Role>>>,
    codes: Mutex<HashMap<String, Vec<String>>>,
    /// How many times `roles_for` has been called.
    pub role_lookups: AtomicUsize,
}

impl InMemoryRoles {
    pub fn assign_role(&self, principal: &Principal, role_code: &str) {
        self.by_user
            .lock()
            .unwrap()
            .entry(principal.user_key())
            .or_default()
            .push(Role::new(role_code, role_code));
    }

    pub fn set_role_codes(&self, role_code: &str, raw_codes: &[&str]) {
        self.codes.lock().unwrap().insert(
            role_code.to_string(),
            raw_codes.iter().map(|c| c.to_string()).collect(),
        );
    }

    pub fn lookups(&self) -> usize {
        self.role_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleDirectory for InMemoryRoles {
    async fn roles_for(&self, principal: &Principal) -> AppResult<Vec<Role>> {
        self.role_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .by_user
            .lock()
            .unwrap()
            .get(&principal.user_key())
            .cloned()
            .unwrap_or_default())
    }

    async fn permission_codes_for(&self, role_code: &str) -> AppResult<Vec<String>> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .get(role_code)
            .cloned()
            .unwrap_or_default())
    }
}

/// Trace store that records calls and can be told to fail.
#[derive(Default)]
pub struct RecordingTraceStore {
    pub opened: Mutex<Vec<LoginTrace>>,
    pub closed: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl RecordingTraceStore {
    fn check_failure(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(AppError::audit("trace store offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LoginTraceStore for RecordingTraceStore {
    async fn open_trace(&self, trace: LoginTrace) -> AppResult<()> {
        self.check_failure()?;
        self.opened.lock().unwrap().push(trace);
        Ok(())
    }

    async fn close_trace(
        &self,
        user_type: &str,
        user_id: &str,
        _logout_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.check_failure()?;
        self.closed
            .lock()
            .unwrap()
            .push((user_type.to_string(), user_id.to_string()));
        Ok(())
    }
}

/// Alias registry that records revocations and can be told to fail.
#[derive(Default)]
pub struct RecordingAliasRegistry {
    pub revoked: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl TokenAliasRegistry for RecordingAliasRegistry {
    async fn revoke(&self, token: &str) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::external_service("alias registry offline"));
        }
        self.revoked.lock().unwrap().push(token.to_string());
        Ok(())
    }
}

/// Fully wired engine pair over in-memory collaborators.
pub struct TestHarness {
    pub caches: Arc<SecurityCaches>,
    pub directory: Arc<InMemoryDirectory>,
    pub roles: Arc<InMemoryRoles>,
    pub traces: Arc<RecordingTraceStore>,
    pub aliases: Arc<RecordingAliasRegistry>,
    pub hasher: SaltedPasswordHasher,
    pub auth: AuthenticationEngine,
    pub authz: AuthorizationEngine,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(AuthConfig::default())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        let caches = Arc::new(SecurityCaches::new());
        let directory = Arc::new(InMemoryDirectory::default());
        let roles = Arc::new(InMemoryRoles::default());
        let traces = Arc::new(RecordingTraceStore::default());
        let aliases = Arc::new(RecordingAliasRegistry::default());
        let hasher = SaltedPasswordHasher::new(&config).unwrap();

        let auth = AuthenticationEngine::new(
            Arc::clone(&directory) as Arc<dyn AccountDirectory>,
            Arc::clone(&caches),
            hasher.clone(),
            LoginAuditor::new(Arc::clone(&traces) as Arc<dyn LoginTraceStore>),
            Arc::clone(&aliases) as Arc<dyn TokenAliasRegistry>,
        );
        let authz = AuthorizationEngine::new(
            Arc::clone(&roles) as Arc<dyn RoleDirectory>,
            Arc::clone(&caches),
            config,
        );

        Self {
            caches,
            directory,
            roles,
            traces,
            aliases,
            hasher,
            auth,
            authz,
        }
    }

    /// Register a password user whose secret is stored hashed.
    pub fn add_password_user(
        &self,
        user_id: &str,
        auth_account: &str,
        password: &str,
    ) -> Principal {
        self.add_user_with_status(user_id, auth_account, password, AccountStatus::Active)
    }

    pub fn add_user_with_status(
        &self,
        user_id: &str,
        auth_account: &str,
        password: &str,
        status: AccountStatus,
    ) -> Principal {
        let principal = Principal {
            user_type: "IamUser".to_string(),
            user_id: user_id.to_string(),
            tenant_id: None,
            org_id: None,
            display_name: auth_account.to_string(),
            data_scope: DataScope::SelfOnly,
        };
        let mut account = Account {
            user_type: "IamUser".to_string(),
            user_id: user_id.to_string(),
            auth_type: AuthType::Password,
            auth_account: auth_account.to_string(),
            auth_secret: password.to_string(),
            secret_salt: None,
            status,
        };
        self.hasher.encrypt_account(&mut account).unwrap();
        self.directory.insert(account, principal.clone());
        principal
    }

    /// Register a single-sign-on user whose secret is an opaque token.
    pub fn add_sso_user(&self, user_id: &str, auth_account: &str, secret: &str) -> Principal {
        let principal = Principal {
            user_type: "IamUser".to_string(),
            user_id: user_id.to_string(),
            tenant_id: None,
            org_id: None,
            display_name: auth_account.to_string(),
            data_scope: DataScope::SelfOnly,
        };
        let account = Account {
            user_type: "IamUser".to_string(),
            user_id: user_id.to_string(),
            auth_type: AuthType::SingleSignOn,
            auth_account: auth_account.to_string(),
            auth_secret: secret.to_string(),
            secret_salt: None,
            status: AccountStatus::Active,
        };
        self.directory.insert(account, principal.clone());
        principal
    }

    /// Grant a role with its permission codes in one step.
    pub fn grant_role(&self, principal: &Principal, role_code: &str, raw_codes: &[&str]) {
        self.roles.assign_role(principal, role_code);
        self.roles.set_role_codes(role_code, raw_codes);
    }

    pub async fn login(&self, auth_account: &str, password: &str) -> AuthenticatedSession {
        self.auth
            .authenticate(AuthType::Password, auth_account, password)
            .await
            .unwrap()
    }

    /// Fresh context bound to a token.
    pub fn attached_context(&self, token: &str) -> SecurityContext {
        let mut ctx = SecurityContext::new(Arc::clone(&self.caches));
        ctx.attach(token);
        ctx
    }
}
