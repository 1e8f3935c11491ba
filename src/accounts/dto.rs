use serde::{Deserialize, Serialize};

use crate::accounts::repo_types::Account;

/// Request body for account registration.
#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub identifier: i64, // employee payroll identifier
    pub role: String,
    pub password: String,
}

/// Public part of the account returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub identifier: i64,
    pub role: String,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            identifier: a.employee_id,
            role: a.role,
        }
    }
}
