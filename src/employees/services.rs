use time::{macros::format_description, Date};
use tracing::{debug, warn};

use crate::{
    employees::{dto::EmployeeBody, repo_types::Employee},
    error::ApiError,
    store::{Directory, StoreError},
};

/// Parse a `YYYY-MM-DD` ingestion date and require it to be strictly before
/// `today`. Anything that would not read back byte for byte is rejected, so
/// the stored date always echoes as the client sent it.
pub fn parse_ingestion_date(raw: &str, today: Date) -> Result<Date, ApiError> {
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|e| {
        debug!(error = %e, raw, "unparseable ingestion date");
        ApiError::InvalidDate
    })?;
    // `[year]` accepts a sign; Date's Display is canonical YYYY-MM-DD
    if !raw.starts_with(|c: char| c.is_ascii_digit()) || date.to_string() != raw {
        debug!(raw, "ingestion date not in canonical form");
        return Err(ApiError::InvalidDate);
    }
    if date >= today {
        debug!(%date, %today, "ingestion date not in the past");
        return Err(ApiError::InvalidDate);
    }
    Ok(date)
}

pub async fn register_employee(
    store: &dyn Directory,
    body: EmployeeBody,
    today: Date,
) -> Result<Employee, ApiError> {
    const DUPLICATE: ApiError = ApiError::DuplicateRecord("employee already exists");

    if store.find_employee(body.identifier).await?.is_some() {
        warn!(identifier = body.identifier, "employee already exists");
        return Err(DUPLICATE);
    }

    let ingestion_date = parse_ingestion_date(&body.ingestion_date, today)?;

    let employee = Employee {
        identifier: body.identifier,
        name: body.name,
        email: body.email,
        supervisor: body.supervisor,
        department: body.department,
        ingestion_date,
        active: body.active,
    };

    match store.insert_employee(&employee).await {
        Ok(e) => Ok(e),
        // lost a race with a concurrent registration
        Err(StoreError::Duplicate) => Err(DUPLICATE),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_employee(store: &dyn Directory, identifier: i64) -> Result<Employee, ApiError> {
    store
        .find_employee(identifier)
        .await?
        .ok_or(ApiError::NotFound("employee not found"))
}
