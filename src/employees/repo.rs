use sqlx::PgPool;

use crate::employees::repo_types::Employee;

impl Employee {
    /// Find an employee by payroll identifier.
    pub async fn find(db: &PgPool, identifier: i64) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT identifier, name, email, supervisor, department, ingestion_date, active
            FROM employees
            WHERE identifier = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(db)
        .await
    }

    /// Insert a new employee. A taken identifier fails on the primary key.
    pub async fn insert(db: &PgPool, employee: &Employee) -> Result<Employee, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees
                (identifier, name, email, supervisor, department, ingestion_date, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING identifier, name, email, supervisor, department, ingestion_date, active
            "#,
        )
        .bind(employee.identifier)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.supervisor)
        .bind(&employee.department)
        .bind(employee.ingestion_date)
        .bind(employee.active)
        .fetch_one(db)
        .await
    }
}
