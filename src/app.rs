//! The top-level component.
//!
//! `App` owns the [`ViewState`] for one page load and passes it down to the
//! router and renderer. User actions (sign in, sign out, following a link)
//! enter here.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::dashboard::{self, DashboardMount, DashboardState, DASHBOARD_FAILED_MESSAGE};
use crate::navigation::Navigator;
use crate::render::{self, RenderOptions};
use crate::router::{self, View};
use crate::session::{self, LOGOUT_FAILED_MESSAGE};
use crate::state::ViewState;

pub struct App {
    backend: Arc<dyn Backend>,
    navigator: Arc<dyn Navigator>,
    state: ViewState,
    dashboard: Option<DashboardMount>,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            backend,
            navigator,
            state: ViewState::default(),
            dashboard: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dashboard_state(&self) -> Option<&DashboardState> {
        self.dashboard.as_ref().map(|mount| &mount.state)
    }

    /// Page load: resolve the session once, then mount the current route.
    pub async fn load(&mut self) {
        self.state = session::resolve(self.backend.as_ref(), self.navigator.as_ref()).await;
        self.sync_route().await;
    }

    /// The view the router picks for the current location.
    pub fn view(&self) -> View {
        router::route(&self.state, self.navigator.location().path())
    }

    /// Follow an in-app link (client-side navigation, no reload).
    pub async fn navigate(&mut self, path: &str) {
        debug!("navigating to {}", path);
        self.unmount_dashboard();
        self.navigator.push(path);
        self.sync_route().await;
    }

    /// Hand the browser to the backend's login route. The backend owns the
    /// identity-provider handoff; nothing changes locally.
    pub fn sign_in(&self) {
        let url = self.backend.login_url();
        info!(
            event_name = "app.sign_in",
            event_domain = "app",
            "redirecting to backend login"
        );
        self.navigator.assign(&url);
    }

    /// Ask the backend to end the session and follow its redirect, if any.
    pub async fn sign_out(&mut self) {
        match self.backend.logout().await {
            Ok(response) => match response.url {
                Some(url) => {
                    info!(
                        event_name = "app.sign_out.redirect",
                        event_domain = "app",
                        target = url.as_str(),
                        "logout confirmed, following redirect"
                    );
                    self.unmount_dashboard();
                    self.navigator.assign(&url);
                }
                // A 200 without `url` is not a logout (a session refresh
                // answers this way), so the page stays as it is.
                None => {
                    info!(
                        event_name = "app.sign_out.no_redirect",
                        event_domain = "app",
                        message = response.message.as_deref().unwrap_or_default(),
                        "logout answered without a redirect, keeping session"
                    );
                }
            },
            Err(e) => {
                warn!(
                    event_name = "app.sign_out.failed",
                    event_domain = "app",
                    error = %e,
                    "Logout failed"
                );
                self.state.error = Some(LOGOUT_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn render(&self, options: RenderOptions) -> Vec<String> {
        render::render(&self.state, &self.view(), self.dashboard_state(), options)
    }

    /// Bring mounted components in line with the current route.
    async fn sync_route(&mut self) {
        match self.view() {
            View::Redirect { to } => {
                debug!("route guarded, redirecting to {}", to);
                self.unmount_dashboard();
                self.navigator.replace(to);
            }
            View::Dashboard => {
                if self.dashboard.is_none() {
                    self.mount_dashboard().await;
                }
            }
            _ => self.unmount_dashboard(),
        }
    }

    async fn mount_dashboard(&mut self) {
        let mount = DashboardMount::new();
        let token = mount.token();
        self.dashboard = Some(mount);

        let outcome =
            dashboard::load(self.backend.as_ref(), self.navigator.as_ref(), &token).await;
        let Some(outcome) = outcome else {
            return;
        };
        match &outcome {
            DashboardState::Loaded(_) => self.state.error = None,
            DashboardState::Failed => {
                self.state.error = Some(DASHBOARD_FAILED_MESSAGE.to_string());
            }
            DashboardState::Loading | DashboardState::Redirected => {}
        }
        if let Some(mount) = self.dashboard.as_mut() {
            mount.state = outcome;
        }
    }

    fn unmount_dashboard(&mut self) {
        if let Some(mount) = self.dashboard.take() {
            mount.unmount();
        }
    }
}
