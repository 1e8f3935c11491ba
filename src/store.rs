use async_trait::async_trait;

use crate::{
    accounts::repo_types::{Account, NewAccount},
    employees::repo_types::Employee,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Duplicate,
    #[error("referenced employee does not exist")]
    MissingEmployee,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistent store for employees and their accounts.
///
/// Implementations must reject a second employee with the same identifier and
/// a second account for the same employee with [`StoreError::Duplicate`], even
/// when two inserts race.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn insert_employee(&self, employee: &Employee) -> Result<Employee, StoreError>;
    async fn find_employee(&self, identifier: i64) -> Result<Option<Employee>, StoreError>;
    async fn insert_account(&self, account: &NewAccount) -> Result<Account, StoreError>;
    async fn find_account(&self, id: i64) -> Result<Option<Account>, StoreError>;
    async fn find_account_by_employee(
        &self,
        employee_id: i64,
    ) -> Result<Option<Account>, StoreError>;
}

#[cfg(test)]
pub use memory::{MemoryDirectory, StaleReads};
