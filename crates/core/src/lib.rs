//! `adminboard-core`: shared building blocks for the admin dashboard.
//!
//! This crate contains **pure** primitives (no storage, no transport).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::AccountId;
