use sqlx::FromRow;
use time::Date;

/// Employee record in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Employee {
    pub identifier: i64,       // payroll number, assigned outside this service
    pub name: String,
    pub email: String,
    pub supervisor: String,    // free text, not a reference
    pub department: String,
    pub ingestion_date: Date,
    pub active: bool,
}
