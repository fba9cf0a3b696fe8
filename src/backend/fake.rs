//! Scripted backend for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use http::StatusCode;
use tokio::sync::Notify;

use super::base::{Backend, BackendError};
use crate::models::{DashboardData, DashboardSnapshot, LogoutResponse, UserRecord};

/// Canned answer for one endpoint.
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    Unauthorized,
    Status(u16),
}

impl<T: Clone> Reply<T> {
    fn into_result(self) -> Result<T, BackendError> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Unauthorized => Err(BackendError::Unauthorized),
            Reply::Status(code) => Err(BackendError::UnexpectedStatus(
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            )),
        }
    }
}

pub struct FakeBackend {
    pub user: Mutex<Reply<UserRecord>>,
    pub logout: Mutex<Reply<LogoutResponse>>,
    pub dashboard: Mutex<Reply<DashboardSnapshot>>,
    /// When set, `dashboard` waits for a notification before answering.
    pub dashboard_gate: Option<Notify>,
    pub dashboard_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new(user: Reply<UserRecord>) -> Self {
        Self {
            user: Mutex::new(user),
            logout: Mutex::new(Reply::Ok(LogoutResponse::default())),
            dashboard: Mutex::new(Reply::Ok(snapshot())),
            dashboard_gate: None,
            dashboard_calls: AtomicUsize::new(0),
        }
    }

    pub fn signed_in() -> Self {
        Self::new(Reply::Ok(ada()))
    }

    pub fn signed_out() -> Self {
        Self::new(Reply::Unauthorized)
    }

    pub fn with_logout(self, reply: Reply<LogoutResponse>) -> Self {
        *self.logout.lock().unwrap() = reply;
        self
    }

    pub fn with_dashboard(self, reply: Reply<DashboardSnapshot>) -> Self {
        *self.dashboard.lock().unwrap() = reply;
        self
    }

    pub fn gated(mut self) -> Self {
        self.dashboard_gate = Some(Notify::new());
        self
    }

    pub fn open_gate(&self) {
        if let Some(gate) = &self.dashboard_gate {
            gate.notify_one();
        }
    }

    pub fn dashboard_calls(&self) -> usize {
        self.dashboard_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    fn login_url(&self) -> String {
        "http://localhost:5000/api/login".to_string()
    }

    async fn current_user(&self) -> Result<UserRecord, BackendError> {
        self.user.lock().unwrap().clone().into_result()
    }

    async fn logout(&self) -> Result<LogoutResponse, BackendError> {
        self.logout.lock().unwrap().clone().into_result()
    }

    async fn dashboard(&self) -> Result<DashboardSnapshot, BackendError> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.dashboard_gate {
            gate.notified().await;
        }
        self.dashboard.lock().unwrap().clone().into_result()
    }
}

pub fn ada() -> UserRecord {
    UserRecord {
        id: "user_01".to_string(),
        email: "ada@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        organization_id: "org_01".to_string(),
    }
}

pub fn snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        user: ada(),
        dashboard_data: DashboardData {
            last_login: "2024-03-01T10:00:00Z".to_string(),
            role: "admin".to_string(),
            permissions: vec!["read".to_string(), "write".to_string()],
        },
    }
}
