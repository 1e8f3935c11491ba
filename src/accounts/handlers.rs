use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    accounts::{
        dto::{AccountResponse, CreateAccountRequest},
        services,
    },
    error::ApiError,
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/:id", get(get_account))
}

#[instrument(skip(state, payload))]
pub async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = services::register_account(state.store.as_ref(), payload).await?;

    info!(
        account_id = account.id,
        identifier = account.employee_id,
        role = %account.role,
        "account registered"
    );
    Ok(Json(account.into()))
}

#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = services::find_account(state.store.as_ref(), id).await?;
    Ok(Json(account.into()))
}
