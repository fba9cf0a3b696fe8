//! The dashboard component: fetched fresh on every mount, never cached.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::{Backend, BackendError};
use crate::models::DashboardSnapshot;
use crate::navigation::Navigator;
use crate::router::HOME_PATH;
use crate::utils::cancel::CancelToken;

pub const DASHBOARD_FAILED_MESSAGE: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum DashboardState {
    Loading,
    Loaded(DashboardSnapshot),
    /// Fetch failed; the error state renders instead of data.
    Failed,
    /// The backend rejected the session and the page navigated home.
    Redirected,
}

/// One mounted dashboard. Dropping the mount from view must go through
/// [`DashboardMount::unmount`] so a late response is discarded.
#[derive(Debug)]
pub struct DashboardMount {
    pub state: DashboardState,
    token: CancelToken,
}

impl DashboardMount {
    pub fn new() -> Self {
        Self {
            state: DashboardState::Loading,
            token: CancelToken::new(),
        }
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }
}

impl Default for DashboardMount {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch `/api/dashboard` for a mount.
///
/// Returns `None` when the mount was cancelled before the answer arrived;
/// in that case nothing is navigated and the caller must apply nothing.
pub async fn load(
    backend: &dyn Backend,
    navigator: &dyn Navigator,
    cancel: &CancelToken,
) -> Option<DashboardState> {
    let result = tokio::select! {
        result = backend.dashboard() => result,
        _ = cancel.cancelled() => {
            debug!("dashboard unmounted while fetching");
            return None;
        }
    };
    if cancel.is_cancelled() {
        debug!("discarding dashboard response for an unmounted view");
        return None;
    }

    let state = match result {
        Ok(snapshot) => {
            info!(
                event_name = "dashboard.fetch.loaded",
                event_domain = "dashboard",
                user_id = snapshot.user.id.as_str(),
                permissions = snapshot.dashboard_data.permissions.len(),
                "dashboard data loaded"
            );
            DashboardState::Loaded(snapshot)
        }
        Err(BackendError::Unauthorized) => {
            info!(
                event_name = "dashboard.fetch.unauthorized",
                event_domain = "dashboard",
                "session rejected, returning home"
            );
            navigator.assign(HOME_PATH);
            DashboardState::Redirected
        }
        Err(e) => {
            warn!(
                event_name = "dashboard.fetch.failed",
                event_domain = "dashboard",
                error = %e,
                "dashboard data fetch failed"
            );
            DashboardState::Failed
        }
    };
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{snapshot, FakeBackend, Reply};
    use crate::navigation::MemoryNavigator;
    use std::time::Duration;
    use url::Url;

    fn navigator() -> MemoryNavigator {
        MemoryNavigator::new(Url::parse("http://localhost:5173/dashboard").unwrap())
    }

    #[tokio::test]
    async fn test_load_success() {
        let nav = navigator();
        let backend = FakeBackend::signed_in();
        let state = load(&backend, &nav, &CancelToken::new()).await;
        assert_eq!(state, Some(DashboardState::Loaded(snapshot())));
        assert!(nav.events().is_empty());
    }

    #[tokio::test]
    async fn test_load_unauthorized_navigates_home() {
        let nav = navigator();
        let backend = FakeBackend::signed_in().with_dashboard(Reply::Unauthorized);
        let state = load(&backend, &nav, &CancelToken::new()).await;
        assert_eq!(state, Some(DashboardState::Redirected));
        assert_eq!(
            nav.last_assigned().unwrap().as_str(),
            "http://localhost:5173/"
        );
    }

    #[tokio::test]
    async fn test_load_failure_is_error_state() {
        let nav = navigator();
        let backend = FakeBackend::signed_in().with_dashboard(Reply::Status(503));
        let state = load(&backend, &nav, &CancelToken::new()).await;
        assert_eq!(state, Some(DashboardState::Failed));
        assert!(nav.last_assigned().is_none());
    }

    /// Unmounting mid-fetch drops the answer, even a 401 that would navigate.
    #[tokio::test]
    async fn test_unmount_discards_late_response() {
        let nav = navigator();
        let backend = FakeBackend::signed_in()
            .with_dashboard(Reply::Unauthorized)
            .gated();
        let mount = DashboardMount::new();
        let token = mount.token();

        let (state, _) = tokio::join!(load(&backend, &nav, &token), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            mount.unmount();
            backend.open_gate();
        });

        assert_eq!(state, None);
        assert!(token.is_cancelled());
        assert!(nav.last_assigned().is_none());
    }

    #[tokio::test]
    async fn test_already_unmounted_fetch_applies_nothing() {
        let nav = navigator();
        let backend = FakeBackend::signed_in();
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(load(&backend, &nav, &token).await, None);
    }
}
