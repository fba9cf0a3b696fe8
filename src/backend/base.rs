use http::StatusCode;

use crate::models::{DashboardSnapshot, LogoutResponse, UserRecord};

/// Why a backend call did not produce its success body.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// 401 from the backend: the visitor has no valid session. Expected, not a failure.
    #[error("not authenticated")]
    Unauthorized,
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("error sending request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("error parsing JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The authentication backend as seen by the client. Every call rides on
/// the ambient session cookie; implementations own the cookie store.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Absolute URL the browser is sent to for sign-in. Never fetched.
    fn login_url(&self) -> String;
    /// `GET /api/user`
    async fn current_user(&self) -> Result<UserRecord, BackendError>;
    /// `GET /api/logout`
    async fn logout(&self) -> Result<LogoutResponse, BackendError>;
    /// `GET /api/dashboard`
    async fn dashboard(&self) -> Result<DashboardSnapshot, BackendError>;
}
