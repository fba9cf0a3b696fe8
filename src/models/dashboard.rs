use serde::{Deserialize, Serialize};

use super::user::UserRecord;

/// Body of `GET /api/dashboard`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub user: UserRecord,
    pub dashboard_data: DashboardData,
}

/// Account statistics shown on the dashboard, rendered verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DashboardData {
    pub last_login: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl DashboardData {
    pub fn permissions_display(&self) -> String {
        self.permissions.join(", ")
    }
}
