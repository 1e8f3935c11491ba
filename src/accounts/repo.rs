use sqlx::{PgPool, Postgres, Transaction};

use crate::accounts::repo_types::{Account, NewAccount};

impl Account {
    pub async fn find(db: &PgPool, id: i64) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, employee_id, role, password_hash
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_employee(
        db: &PgPool,
        employee_id: i64,
    ) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, employee_id, role, password_hash
            FROM accounts
            WHERE employee_id = $1
            "#,
        )
        .bind(employee_id)
        .fetch_optional(db)
        .await
    }

    /// Lock the owning employee row for the rest of the transaction.
    /// Returns false when the employee does not exist.
    pub async fn lock_employee_tx(
        tx: &mut Transaction<'_, Postgres>,
        employee_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT identifier
              FROM employees
             WHERE identifier = $1
               FOR SHARE
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row.is_some())
    }

    /// Insert an account within a transaction. A second account for the
    /// same employee fails on `accounts_employee_id_key`.
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        account: &NewAccount,
    ) -> Result<Account, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (employee_id, role, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, employee_id, role, password_hash
            "#,
        )
        .bind(account.employee_id)
        .bind(&account.role)
        .bind(&account.password_hash)
        .fetch_one(&mut **tx)
        .await
    }
}
