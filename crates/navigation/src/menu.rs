//! Sidebar navigation menu.

use serde::Serialize;

use adminboard_auth::{Capability, Role};

use crate::routes::{RouteTable, RoutingError};

/// One entry of the sidebar menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    /// Capability required to see the item; `None` means always visible.
    pub capability: Option<Capability>,
}

const MENU: [(&str, &str); 4] = [
    ("/", "Dashboard"),
    ("/users", "Users"),
    ("/reports", "Reports"),
    ("/settings", "Settings"),
];

impl NavItem {
    /// Item for the route declared at `path`, gated by that route's capability.
    pub fn for_route(
        table: &RouteTable,
        path: &'static str,
        label: &'static str,
    ) -> Result<Self, RoutingError> {
        let route = table
            .by_pattern(path)
            .ok_or_else(|| RoutingError::NoRoute(path.to_string()))?;

        Ok(Self {
            path,
            label,
            capability: route.access.capability(),
        })
    }

    /// The dashboard menu, in display order.
    pub fn dashboard_menu(table: &RouteTable) -> Result<Vec<Self>, RoutingError> {
        MENU.iter()
            .map(|&(path, label)| Self::for_route(table, path, label))
            .collect()
    }

    pub fn visible_to(&self, role: Option<Role>) -> bool {
        self.capability.is_none_or(|c| c.permits(role))
    }
}

/// Items `role` may see, in input order.
pub fn visible_items(items: &[NavItem], role: Option<Role>) -> Vec<&NavItem> {
    items.iter().filter(|item| item.visible_to(role)).collect()
}

/// Whether the item at `item_path` is highlighted while at `current_path`.
///
/// The root item is active only on the root; others match on whole leading
/// path segments.
pub fn is_active(item_path: &str, current_path: &str) -> bool {
    if item_path == "/" {
        return current_path == "/";
    }
    let current = current_path.to_ascii_lowercase();
    let item = item_path.trim_end_matches('/').to_ascii_lowercase();
    match current.strip_prefix(&item) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&NavItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.label).collect()
    }

    #[test]
    fn menu_is_gated_by_route_capabilities() {
        let menu = NavItem::dashboard_menu(&RouteTable::dashboard()).unwrap();

        assert_eq!(menu.len(), 4);
        assert_eq!(menu[0].capability, None);
        assert_eq!(menu[1].capability, Some(Capability::ViewUsers));
        assert_eq!(menu[2].capability, Some(Capability::ViewReports));
        assert_eq!(menu[3].capability, Some(Capability::ViewSettings));
    }

    #[test]
    fn user_role_sees_dashboard_and_settings_only() {
        let menu = NavItem::dashboard_menu(&RouteTable::dashboard()).unwrap();
        assert_eq!(
            labels(&visible_items(&menu, Some(Role::User))),
            vec!["Dashboard", "Settings"]
        );
    }

    #[test]
    fn managers_and_admins_see_everything_in_order() {
        let menu = NavItem::dashboard_menu(&RouteTable::dashboard()).unwrap();
        for role in [Role::Admin, Role::Manager] {
            assert_eq!(
                labels(&visible_items(&menu, Some(role))),
                vec!["Dashboard", "Users", "Reports", "Settings"]
            );
        }
    }

    #[test]
    fn ungated_items_are_always_visible() {
        let items = vec![
            NavItem { path: "/", label: "Home", capability: None },
            NavItem { path: "/purge", label: "Purge", capability: Some(Capability::DeleteUsers) },
        ];

        assert_eq!(labels(&visible_items(&items, None)), vec!["Home"]);
        assert_eq!(labels(&visible_items(&items, Some(Role::Manager))), vec!["Home"]);
        assert_eq!(labels(&visible_items(&items, Some(Role::Admin))), vec!["Home", "Purge"]);
    }

    #[test]
    fn unknown_menu_route_is_an_error() {
        let err = NavItem::for_route(&RouteTable::dashboard(), "/billing", "Billing").unwrap_err();
        assert_eq!(err, RoutingError::NoRoute("/billing".to_string()));
    }

    #[test]
    fn active_item_detection() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/users"));
        assert!(is_active("/users", "/users"));
        assert!(is_active("/users", "/users/12"));
        assert!(!is_active("/reports", "/users"));
    }

    #[test]
    fn active_prefix_stops_at_segment_boundary() {
        assert!(!is_active("/users", "/usersettings"));
        assert!(!is_active("/settings", "/settings-archive"));
        assert!(is_active("/users", "/users/"));
        assert!(is_active("/Users", "/users/3"));
    }
}
