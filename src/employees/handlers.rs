use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    employees::{dto::EmployeeBody, services},
    error::ApiError,
    state::AppState,
};

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", post(create_employee))
        .route("/employees/:identifier", get(get_employee))
}

#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<EmployeeBody>,
) -> Result<Json<EmployeeBody>, ApiError> {
    let today = OffsetDateTime::now_utc().date();
    let employee = services::register_employee(state.store.as_ref(), payload, today).await?;

    info!(identifier = employee.identifier, "employee registered");
    Ok(Json(employee.into()))
}

#[instrument(skip(state))]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(identifier): Path<i64>,
) -> Result<Json<EmployeeBody>, ApiError> {
    let employee = services::find_employee(state.store.as_ref(), identifier).await?;
    Ok(Json(employee.into()))
}
