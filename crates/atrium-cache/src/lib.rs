//! # atrium-cache
//!
//! Concurrent, unbounded token-keyed maps backing the session and
//! permission caches. Entries live until explicitly removed; session
//! timeout policy, if any, belongs to an external collaborator.

pub mod token_cache;

pub use token_cache::TokenCache;
