use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{debug, info};

use crate::{
    accounts::repo_types::{Account, NewAccount},
    config::AppConfig,
    employees::repo_types::Employee,
    store::{Directory, StoreError},
};

/// Open the connection pool and bring the schema up to date.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("run migrations")?;
    info!(max_connections = config.max_connections, "database ready");
    Ok(db)
}

/// Translate constraint violations into store errors; everything else is a
/// database fault.
fn classify(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            debug!(constraint = ?db_err.constraint(), "unique violation");
            return StoreError::Duplicate;
        }
        if db_err.is_foreign_key_violation() {
            debug!(constraint = ?db_err.constraint(), "foreign key violation");
            return StoreError::MissingEmployee;
        }
    }
    StoreError::Database(e)
}

/// [`Directory`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgDirectory {
    db: PgPool,
}

impl PgDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn insert_employee(&self, employee: &Employee) -> Result<Employee, StoreError> {
        Employee::insert(&self.db, employee).await.map_err(classify)
    }

    async fn find_employee(&self, identifier: i64) -> Result<Option<Employee>, StoreError> {
        Ok(Employee::find(&self.db, identifier).await?)
    }

    async fn insert_account(&self, account: &NewAccount) -> Result<Account, StoreError> {
        let mut tx = self.db.begin().await?;
        if !Account::lock_employee_tx(&mut tx, account.employee_id).await? {
            // dropping the transaction rolls it back
            return Err(StoreError::MissingEmployee);
        }
        let row = Account::insert_tx(&mut tx, account)
            .await
            .map_err(classify)?;
        tx.commit().await?;
        Ok(row)
    }

    async fn find_account(&self, id: i64) -> Result<Option<Account>, StoreError> {
        Ok(Account::find(&self.db, id).await?)
    }

    async fn find_account_by_employee(
        &self,
        employee_id: i64,
    ) -> Result<Option<Account>, StoreError> {
        Ok(Account::find_by_employee(&self.db, employee_id).await?)
    }
}
