//! Mock directory contents used by the development shell and tests.

use chrono::NaiveDate;

use adminboard_core::AccountId;

use crate::{Account, AccountRole, AccountStatus};

const NAMED: &[(u64, &str, &str, AccountRole, AccountStatus, (i32, u32, u32))] = &[
    (1, "Kunal Bana", "admin@company.com", AccountRole::Admin, AccountStatus::Active, (2024, 1, 12)),
    (2, "Rahul Sharma", "manager@company.com", AccountRole::Manager, AccountStatus::Active, (2024, 2, 3)),
    (3, "Neha Verma", "neha.manager@company.com", AccountRole::Manager, AccountStatus::Inactive, (2024, 3, 18)),
    (4, "Vishal Kumar", "vishal.manager@company.com", AccountRole::Manager, AccountStatus::Active, (2024, 4, 20)),
    (5, "Prakhar Pandey", "prakhar.manager@company.com", AccountRole::Manager, AccountStatus::Active, (2024, 5, 25)),
    (6, "Amit Malhotra", "amit.admin@company.com", AccountRole::Admin, AccountStatus::Active, (2024, 6, 2)),
    (7, "Sneha Kapoor", "sneha.admin@company.com", AccountRole::Admin, AccountStatus::Active, (2024, 6, 10)),
    (8, "Rohit Mehta", "rohit.admin@company.com", AccountRole::Admin, AccountStatus::Inactive, (2024, 6, 18)),
    (9, "Anjali Singh", "anjali.admin@company.com", AccountRole::Admin, AccountStatus::Active, (2024, 6, 25)),
    (10, "Deepak Yadav", "deepak.manager@company.com", AccountRole::Manager, AccountStatus::Active, (2024, 7, 1)),
    (11, "Pooja Mishra", "pooja.manager@company.com", AccountRole::Manager, AccountStatus::Active, (2024, 7, 8)),
    (12, "Saurabh Jain", "saurabh.manager@company.com", AccountRole::Manager, AccountStatus::Inactive, (2024, 7, 15)),
    (13, "Nitin Aggarwal", "nitin.manager@company.com", AccountRole::Manager, AccountStatus::Active, (2024, 7, 22)),
];

/// Number of generated `userN@company.com` employee accounts.
pub const GENERATED_EMPLOYEES: u64 = 101;

/// The full mock listing: named admins/managers followed by generated
/// employees. Every seventh generated employee is inactive.
pub fn mock_accounts() -> Vec<Account> {
    let mut accounts: Vec<Account> = NAMED
        .iter()
        .filter_map(|&(id, name, email, role, status, (y, m, d))| {
            Some(Account {
                id: AccountId::new(id),
                name: name.to_string(),
                email: email.to_string(),
                role,
                status,
                created: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect();

    let first_generated = NAMED.len() as u64 + 1;
    accounts.extend((0..GENERATED_EMPLOYEES).filter_map(|i| {
        let n = i + 1;
        let status = if i % 7 == 0 {
            AccountStatus::Inactive
        } else {
            AccountStatus::Active
        };
        let created = NaiveDate::from_ymd_opt(2024, (i % 12) as u32 + 1, (i % 28) as u32 + 1)?;

        Some(Account {
            id: AccountId::new(first_generated + i),
            name: format!("User {n}"),
            email: format!("user{n}@company.com"),
            role: AccountRole::Employee,
            status,
            created,
        })
    }));

    accounts
}
