use tracing::warn;

use crate::{
    accounts::{
        dto::CreateAccountRequest,
        repo_types::{Account, NewAccount},
    },
    auth::password::hash_password_blocking,
    error::ApiError,
    store::{Directory, StoreError},
};

const EMPLOYEE_MISSING: ApiError = ApiError::NotFound("employee not found");
const DUPLICATE: ApiError =
    ApiError::DuplicateRecord("an account already exists for this employee");

/// Create the single account of an existing employee, storing only the
/// password digest.
pub async fn register_account(
    store: &dyn Directory,
    req: CreateAccountRequest,
) -> Result<Account, ApiError> {
    if store.find_employee(req.identifier).await?.is_none() {
        warn!(identifier = req.identifier, "account for unknown employee");
        return Err(EMPLOYEE_MISSING);
    }

    if store.find_account_by_employee(req.identifier).await?.is_some() {
        warn!(identifier = req.identifier, "employee already has an account");
        return Err(DUPLICATE);
    }

    let password_hash = hash_password_blocking(req.password).await?;

    let new = NewAccount {
        employee_id: req.identifier,
        role: req.role,
        password_hash,
    };
    match store.insert_account(&new).await {
        Ok(account) => Ok(account),
        Err(StoreError::Duplicate) => Err(DUPLICATE),
        Err(StoreError::MissingEmployee) => Err(EMPLOYEE_MISSING),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_account(store: &dyn Directory, id: i64) -> Result<Account, ApiError> {
    store
        .find_account(id)
        .await?
        .ok_or(ApiError::NotFound("account not found"))
}
