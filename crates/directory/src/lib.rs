//! `adminboard-directory`: the account directory consulted at login.
//!
//! The directory is owned elsewhere; the dashboard only reads it. Lookups are
//! asynchronous because the real directory sits behind a network boundary.

pub mod account;
pub mod directory;
pub mod query;
pub mod seed;

pub use account::{Account, AccountRole, AccountStatus};
pub use directory::{AccountDirectory, DirectoryError, InMemoryAccountDirectory};
pub use query::AccountQuery;
