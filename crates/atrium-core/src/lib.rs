//! # atrium-core
//!
//! Core crate for Atrium IAM. Contains configuration schemas and the
//! unified error system shared by every other crate in the workspace.
//!
//! This crate has **no** internal dependencies on other Atrium crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;

/// Sentinel tenant id returned when no tenant is bound to the calling
/// context. Many code paths query the tenant id opportunistically outside
/// of a request, so the accessor must always yield a usable value.
pub const NO_TENANT_ID: &str = "0";
