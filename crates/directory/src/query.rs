//! Client-side account filtering.
//!
//! The directory returns a full listing; narrowing it down happens here.

use serde::{Deserialize, Serialize};

use crate::{Account, AccountRole, AccountStatus};

/// Filter over a directory listing.
///
/// Empty fields match everything. `search` is a case-insensitive substring
/// match against name or email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountQuery {
    pub search: Option<String>,
    pub role: Option<AccountRole>,
    pub status: Option<AccountStatus>,
}

impl AccountQuery {
    /// A query that matches every account.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.search = if needle.trim().is_empty() { None } else { Some(needle) };
        self
    }

    pub fn role(mut self, role: AccountRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn status(mut self, status: AccountStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, account: &Account) -> bool {
        let matches_search = match &self.search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                account.name.to_lowercase().contains(&needle)
                    || account.email.to_lowercase().contains(&needle)
            }
            None => true,
        };

        let matches_role = self.role.is_none_or(|r| account.role == r);
        let matches_status = self.status.is_none_or(|s| account.status == s);

        matches_search && matches_role && matches_status
    }

    /// Filter a listing, preserving its order.
    pub fn apply<'a, I>(&self, accounts: I) -> Vec<Account>
    where
        I: IntoIterator<Item = &'a Account>,
    {
        accounts
            .into_iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::mock_accounts;

    #[test]
    fn empty_query_matches_everything() {
        let accounts = mock_accounts();
        assert_eq!(AccountQuery::all().apply(&accounts).len(), accounts.len());
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(AccountQuery::all().search("   ").search, None);
    }

    #[test]
    fn search_covers_name_and_email_case_insensitively() {
        let accounts = mock_accounts();

        let by_name = AccountQuery::all().search("kunal").apply(&accounts);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].email, "admin@company.com");

        let by_email = AccountQuery::all().search("NEHA.MANAGER").apply(&accounts);
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Neha Verma");
    }

    #[test]
    fn role_and_status_filters_combine() {
        let accounts = mock_accounts();

        let inactive_admins = AccountQuery::all()
            .role(AccountRole::Admin)
            .status(AccountStatus::Inactive)
            .apply(&accounts);

        assert_eq!(inactive_admins.len(), 1);
        assert_eq!(inactive_admins[0].email, "rohit.admin@company.com");
    }

    #[test]
    fn order_is_preserved() {
        let accounts = mock_accounts();
        let managers = AccountQuery::all().role(AccountRole::Manager).apply(&accounts);
        let ids: Vec<u64> = managers.iter().map(|a| a.id.get()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
