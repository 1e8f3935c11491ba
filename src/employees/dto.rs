use serde::{Deserialize, Serialize};

use crate::employees::repo_types::Employee;

/// Employee as sent by clients and echoed back on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeBody {
    pub identifier: i64,
    pub name: String,
    pub email: String,
    pub supervisor: String,
    pub department: String,
    pub ingestion_date: String, // YYYY-MM-DD
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<Employee> for EmployeeBody {
    fn from(e: Employee) -> Self {
        Self {
            identifier: e.identifier,
            name: e.name,
            email: e.email,
            supervisor: e.supervisor,
            department: e.department,
            // Date's Display is already YYYY-MM-DD
            ingestion_date: e.ingestion_date.to_string(),
            active: e.active,
        }
    }
}
