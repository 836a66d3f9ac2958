//! Capability predicates.
//!
//! Every authorization answer in the dashboard (route entry, menu visibility,
//! in-view affordances) is computed from the table in [`Capability::permits`].
//! There is no other copy of the rule.

use serde::{Deserialize, Serialize};

use crate::Role;

/// A named permission derived purely from a role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewRevenue,
    ViewUsers,
    ViewReports,
    DeleteUsers,
    ViewSettings,
    ViewProfile,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::ViewRevenue,
        Capability::ViewUsers,
        Capability::ViewReports,
        Capability::DeleteUsers,
        Capability::ViewSettings,
        Capability::ViewProfile,
    ];

    /// Whether `role` holds this capability. An absent role holds nothing.
    pub fn permits(self, role: Option<Role>) -> bool {
        let Some(role) = role else {
            return false;
        };

        match self {
            Capability::ViewRevenue | Capability::ViewUsers | Capability::ViewReports => {
                matches!(role, Role::Admin | Role::Manager)
            }
            Capability::DeleteUsers => role == Role::Admin,
            Capability::ViewSettings | Capability::ViewProfile => true,
        }
    }

    /// Roles that hold this capability, in [`Role::ALL`] order.
    pub fn roles(self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|r| self.permits(Some(*r)))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewRevenue => "view_revenue",
            Capability::ViewUsers => "view_users",
            Capability::ViewReports => "view_reports",
            Capability::DeleteUsers => "delete_users",
            Capability::ViewSettings => "view_settings",
            Capability::ViewProfile => "view_profile",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All capabilities granted to `role`.
pub fn granted(role: Option<Role>) -> Vec<Capability> {
    Capability::ALL
        .into_iter()
        .filter(|c| c.permits(role))
        .collect()
}

pub fn can_view_revenue(role: Option<Role>) -> bool {
    Capability::ViewRevenue.permits(role)
}

pub fn can_view_users(role: Option<Role>) -> bool {
    Capability::ViewUsers.permits(role)
}

pub fn can_view_reports(role: Option<Role>) -> bool {
    Capability::ViewReports.permits(role)
}

pub fn can_delete_users(role: Option<Role>) -> bool {
    Capability::DeleteUsers.permits(role)
}

pub fn can_view_settings(role: Option<Role>) -> bool {
    Capability::ViewSettings.permits(role)
}

pub fn can_view_profile(role: Option<Role>) -> bool {
    Capability::ViewProfile.permits(role)
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature gates
// ─────────────────────────────────────────────────────────────────────────────

/// A gated affordance inside a view (a card, chart, or grid action).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Revenue KPI cards on the dashboard.
    RevenueKpis,
    /// Revenue line and pie charts on the dashboard.
    RevenueCharts,
    /// Delete action column in the users grid.
    DeleteUserAction,
}

impl Feature {
    pub const ALL: [Feature; 3] = [
        Feature::RevenueKpis,
        Feature::RevenueCharts,
        Feature::DeleteUserAction,
    ];

    pub fn capability(self) -> Capability {
        match self {
            Feature::RevenueKpis | Feature::RevenueCharts => Capability::ViewRevenue,
            Feature::DeleteUserAction => Capability::DeleteUsers,
        }
    }

    pub fn enabled_for(self, role: Option<Role>) -> bool {
        self.capability().permits(role)
    }
}

/// Features a view should render for `role`, in [`Feature::ALL`] order.
pub fn enabled_features(role: Option<Role>) -> Vec<Feature> {
    Feature::ALL
        .into_iter()
        .filter(|f| f.enabled_for(role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_capabilities_are_admin_or_manager() {
        for check in [can_view_revenue, can_view_users, can_view_reports] {
            assert!(check(Some(Role::Admin)));
            assert!(check(Some(Role::Manager)));
            assert!(!check(Some(Role::User)));
            assert!(!check(None));
        }
    }

    #[test]
    fn delete_users_is_admin_only() {
        assert!(can_delete_users(Some(Role::Admin)));
        assert!(!can_delete_users(Some(Role::Manager)));
        assert!(!can_delete_users(Some(Role::User)));
        assert!(!can_delete_users(None));
    }

    #[test]
    fn settings_and_profile_need_any_role() {
        for role in Role::ALL {
            assert!(can_view_settings(Some(role)));
            assert!(can_view_profile(Some(role)));
        }
        assert!(!can_view_settings(None));
        assert!(!can_view_profile(None));
    }

    #[test]
    fn absent_role_has_no_capabilities() {
        assert!(granted(None).is_empty());
        assert!(enabled_features(None).is_empty());
    }

    #[test]
    fn capability_roles_follow_predicates() {
        assert_eq!(Capability::DeleteUsers.roles(), vec![Role::Admin]);
        assert_eq!(Capability::ViewReports.roles(), vec![Role::Admin, Role::Manager]);
        assert_eq!(Capability::ViewProfile.roles(), Role::ALL.to_vec());
    }

    #[test]
    fn user_role_sees_no_gated_features() {
        assert!(enabled_features(Some(Role::User)).is_empty());
        assert_eq!(
            enabled_features(Some(Role::Manager)),
            vec![Feature::RevenueKpis, Feature::RevenueCharts]
        );
        assert_eq!(enabled_features(Some(Role::Admin)), Feature::ALL.to_vec());
    }
}
