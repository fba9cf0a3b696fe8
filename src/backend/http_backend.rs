use std::sync::Arc;
use std::time::Duration;

use http::header::{CONTENT_TYPE, LOCATION};
use http::StatusCode;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::base::{Backend, BackendError};
use crate::config::{BackendConfig, SessionConfig};
use crate::models::{DashboardSnapshot, LogoutResponse, UserEnvelope, UserRecord};
use crate::startup::StartupError;

const LOGIN_PATH: &str = "/api/login";
const USER_PATH: &str = "/api/user";
const LOGOUT_PATH: &str = "/api/logout";
const DASHBOARD_PATH: &str = "/api/dashboard";

/// Talks to the backend over HTTP with a cookie jar playing the browser's
/// credential store.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig, session: &SessionConfig) -> Result<Self, StartupError> {
        let base = Url::parse(&config.base_url).map_err(|source| StartupError::InvalidUrl {
            field: "backend.base_url",
            source,
        })?;

        let jar = Arc::new(Jar::default());
        if let Some(value) = &session.cookie_value {
            info!(
                event_name = "backend.cookie.seeded",
                event_domain = "backend",
                cookie_name = session.cookie_name.as_str(),
                "seeding session cookie from configuration"
            );
            jar.add_cookie_str(&format!("{}={}", session.cookie_name, value), &base);
        }

        // Redirects are inspected, not followed: a protected endpoint that
        // bounces to the login route means the session is gone.
        let client = reqwest::Client::builder()
            .cookie_provider(jar)
            .redirect(Policy::none())
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()
            .map_err(StartupError::Client)?;

        info!(
            "Creating HTTP backend for '{}' with timeout {}ms",
            base, config.timeout_in_ms
        );
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, BackendError> {
        let url = self.endpoint(path);
        debug!("Sending GET request to: {}", url);
        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            Ok(response)
        } else if status == StatusCode::UNAUTHORIZED || redirects_to_login(&response) {
            debug!("{} answered {}: no valid session", path, status);
            Err(BackendError::Unauthorized)
        } else {
            Err(BackendError::UnexpectedStatus(status))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let body = self.get(path).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn redirects_to_login(response: &reqwest::Response) -> bool {
    if !response.status().is_redirection() {
        return false;
    }
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(|location| {
            let path = location.split(['?', '#']).next().unwrap_or_default();
            path.ends_with(LOGIN_PATH)
        })
        .unwrap_or(false)
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    fn login_url(&self) -> String {
        self.endpoint(LOGIN_PATH)
    }

    async fn current_user(&self) -> Result<UserRecord, BackendError> {
        let envelope: UserEnvelope = self.get_json(USER_PATH).await?;
        envelope.user.ok_or_else(|| {
            debug!("{} answered without a user: no valid session", USER_PATH);
            BackendError::Unauthorized
        })
    }

    async fn logout(&self) -> Result<LogoutResponse, BackendError> {
        self.get_json(LOGOUT_PATH).await
    }

    async fn dashboard(&self) -> Result<DashboardSnapshot, BackendError> {
        self.get_json(DASHBOARD_PATH).await
    }
}
