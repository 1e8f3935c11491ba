use sqlx::FromRow;

/// Account record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,                   // BIGSERIAL
    pub employee_id: i64,          // references employees.identifier
    pub role: String,
    pub password_hash: String,     // Argon2 PHC string, never the plaintext
}

/// Row to insert; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub employee_id: i64,
    pub role: String,
    pub password_hash: String,
}
