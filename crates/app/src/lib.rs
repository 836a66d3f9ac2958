//! `adminboard-app`: wires the directory, session, and navigation layers into
//! one application context.

pub mod config;
pub mod context;
pub mod login;

pub use config::AppConfig;
pub use context::AppContext;
pub use login::{LoginController, LoginError, LoginOutcome, LoginTicket};
