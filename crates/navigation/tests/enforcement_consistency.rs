//! The route guard, the menu filter and the capability predicates must give
//! the same answer for every (role, route) pair.

use chrono::NaiveDate;

use adminboard_auth::{CurrentUser, Identity, Role, Session, can_view_reports, can_view_users};
use adminboard_core::AccountId;
use adminboard_navigation::{Decision, NavItem, RouteTable, visible_items};

fn session_with(role: Role) -> Session {
    let identity = Identity {
        id: AccountId::new(1),
        name: "Kunal Bana".to_string(),
        email: "admin@company.com".to_string(),
        created: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
    };
    Session::authenticated(CurrentUser::new(identity, role), false)
}

/// The required-roles table as published for the dashboard.
fn published_table() -> Vec<(&'static str, Option<Vec<Role>>)> {
    let all = Some(Role::ALL.to_vec());
    let staff = Some(vec![Role::Admin, Role::Manager]);
    vec![
        ("/", all.clone()),
        ("/users", staff.clone()),
        ("/users/:id", staff.clone()),
        ("/reports", staff),
        ("/settings", all.clone()),
        ("/profile", all),
        ("/login", None),
    ]
}

#[test]
fn derived_required_roles_match_published_table() {
    let table = RouteTable::dashboard();
    for (pattern, expected) in published_table() {
        let route = table.by_pattern(pattern).unwrap();
        assert_eq!(route.access.required_roles(), expected, "route: {pattern}");
    }
}

#[test]
fn menu_visibility_matches_guard_for_every_role() {
    let table = RouteTable::dashboard();
    let menu = NavItem::dashboard_menu(&table).unwrap();

    for role in Role::ALL {
        let session = session_with(role);
        let visible: Vec<&str> = visible_items(&menu, Some(role)).iter().map(|i| i.path).collect();

        for item in &menu {
            let allowed = table.navigate(&session, item.path).unwrap() == Decision::Allow;
            assert_eq!(
                visible.contains(&item.path),
                allowed,
                "role {role} / item {}",
                item.path
            );
        }
    }
}

#[test]
fn guard_matches_predicates_for_every_protected_route() {
    let table = RouteTable::dashboard();

    for role in Role::ALL {
        let session = session_with(role);
        for route in table.routes.iter().filter(|r| r.nested) {
            let path = route.pattern.replace(":id", "7");
            let allowed = table.navigate(&session, &path).unwrap() == Decision::Allow;
            let predicate = route.access.capability().is_none_or(|c| c.permits(Some(role)));
            assert_eq!(allowed, predicate, "role {role} / route {}", route.pattern);
        }
    }
}

#[test]
fn named_predicates_agree_with_route_decisions() {
    let table = RouteTable::dashboard();
    for role in Role::ALL {
        let session = session_with(role);
        assert_eq!(
            table.navigate(&session, "/users").unwrap() == Decision::Allow,
            can_view_users(Some(role))
        );
        assert_eq!(
            table.navigate(&session, "/reports").unwrap() == Decision::Allow,
            can_view_reports(Some(role))
        );
    }
}
