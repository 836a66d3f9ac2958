//! `adminboard-navigation`: route entry decisions and the navigation menu.
//!
//! Both consult the capability predicates from `adminboard-auth`; neither
//! keeps its own copy of the rules. Decisions are pure values; performing the
//! redirect is the caller's job.

pub mod guard;
pub mod menu;
pub mod routes;

pub use guard::{Decision, GuardState, guard};
pub use menu::{NavItem, is_active, visible_items};
pub use routes::{
    Access, LOGIN_PATH, Route, RouteMatch, RouteTable, RoutingError, UNAUTHORIZED_PATH,
};
