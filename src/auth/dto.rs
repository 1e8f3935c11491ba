use serde::{Deserialize, Serialize};

/// Request body for login.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub identifier: i64,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
}
