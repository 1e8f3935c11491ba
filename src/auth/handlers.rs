use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        services::authenticate,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let identifier = payload.identifier;
    authenticate(state.store.as_ref(), identifier, payload.password).await?;

    info!(identifier, "user logged in");
    Ok(Json(LoginResponse {
        message: "login successful".into(),
    }))
}
