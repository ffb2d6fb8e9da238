//! # atrium-iam
//!
//! In-process authentication and authorization engine for the Atrium
//! back-office platform.
//!
//! ## Modules
//!
//! - `password` — deterministic salted credential hashing
//! - `caches` — session and resolved-permission caches keyed by token
//! - `auditor` — best-effort login/logout trace recording
//! - `authentication` — credential validation, session issue, logout
//! - `authorization` — permission-code checks with lazy resolution caching
//! - `scope` — row-level data-scope filter resolution
//! - `context` — request-scoped current-subject binding
//! - `directory` — collaborator seams to the external entity stores

pub mod auditor;
pub mod authentication;
pub mod authorization;
pub mod caches;
pub mod context;
pub mod directory;
pub mod password;
pub mod scope;

pub use auditor::LoginAuditor;
pub use authentication::{AuthenticatedSession, AuthenticationEngine};
pub use authorization::AuthorizationEngine;
pub use caches::SecurityCaches;
pub use context::SecurityContext;
pub use directory::{
    AccountDirectory, LoginTraceStore, NoopAliasRegistry, OrgHierarchy, RoleDirectory,
    TokenAliasRegistry,
};
pub use password::SaltedPasswordHasher;
pub use scope::DataScopeResolver;
