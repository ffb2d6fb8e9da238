//! # atrium-entity
//!
//! Domain entity models for Atrium IAM. Every struct in this crate
//! represents an identity, credential, or authorization value object.
//! Entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`;
//! persistence is the data-access collaborator's concern, not theirs.

pub mod account;
pub mod authorization;
pub mod principal;
pub mod role;
pub mod scope;
pub mod session;
pub mod trace;
