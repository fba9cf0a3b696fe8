//! Application startup and page driving.
//!
//! Builds the backend from configuration, then plays the role of the
//! browser: loads a page, performs the requested action, and reloads the
//! app whenever a full navigation stays on the frontend origin.

use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::app::App;
use crate::backend::{Backend, HttpBackend};
use crate::config::ConfigV1;
use crate::navigation::{same_origin, MemoryNavigator, Navigator};
use crate::render::RenderOptions;
use crate::state::ViewState;

/// Full navigations followed before giving up on a redirect loop.
pub const MAX_PAGE_LOADS: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Error loading configuration: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("{0}")]
    Logging(String),
    #[error("invalid URL in {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("location '{0}' is not on the frontend origin")]
    ForeignLocation(String),
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

/// What the visitor does once the first page has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
    SignIn,
    SignOut,
}

/// The final page after all same-origin reloads.
#[derive(Debug, Clone)]
pub struct Report {
    pub location: Url,
    pub state: ViewState,
    pub lines: Vec<String>,
    /// Set when the page handed the browser to another origin.
    pub external: Option<Url>,
    pub page_loads: usize,
}

pub fn frontend_origin(config: &ConfigV1) -> Result<Url, StartupError> {
    Url::parse(&config.frontend.origin).map_err(|source| StartupError::InvalidUrl {
        field: "frontend.origin",
        source,
    })
}

/// Resolve a path (`/dashboard?error=auth_failed`) or absolute URL against
/// the frontend origin.
pub fn resolve_location(origin: &Url, location: &str) -> Result<Url, StartupError> {
    let url = origin
        .join(location)
        .map_err(|source| StartupError::InvalidUrl {
            field: "location",
            source,
        })?;
    if !same_origin(&url, origin) {
        return Err(StartupError::ForeignLocation(location.to_string()));
    }
    Ok(url)
}

/// Build the HTTP backend and drive one visit.
pub async fn run(
    config: &ConfigV1,
    location: &str,
    action: Action,
    options: RenderOptions,
) -> Result<Report, StartupError> {
    let origin = frontend_origin(config)?;
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.backend, &config.session)?);
    visit(backend, &origin, location, action, options).await
}

/// Drive one visit against any backend.
pub async fn visit(
    backend: Arc<dyn Backend>,
    origin: &Url,
    location: &str,
    action: Action,
    options: RenderOptions,
) -> Result<Report, StartupError> {
    let mut target = resolve_location(origin, location)?;
    let mut page_loads = 0;

    loop {
        page_loads += 1;
        info!(
            event_name = "startup.page_load",
            event_domain = "startup",
            location = target.as_str(),
            page_loads,
            "loading page"
        );
        let navigator = Arc::new(MemoryNavigator::new(target.clone()));
        let mut app = App::new(backend.clone(), navigator.clone());
        app.load().await;

        if page_loads == 1 {
            match action {
                Action::Open => {}
                Action::SignIn => app.sign_in(),
                Action::SignOut => app.sign_out().await,
            }
        }

        let report = |external: Option<Url>| Report {
            location: navigator.location(),
            state: app.state().clone(),
            lines: app.render(options),
            external,
            page_loads,
        };

        match navigator.last_assigned() {
            Some(next) if same_origin(&next, origin) => {
                if page_loads >= MAX_PAGE_LOADS {
                    warn!(
                        event_name = "startup.redirect_loop",
                        event_domain = "startup",
                        location = next.as_str(),
                        "too many full navigations, stopping"
                    );
                    return Ok(report(None));
                }
                target = next;
            }
            Some(next) => return Ok(report(Some(next))),
            None => return Ok(report(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("http://localhost:5173").unwrap()
    }

    #[test]
    fn test_resolve_location_relative_and_absolute() {
        let url = resolve_location(&origin(), "/dashboard?error=auth_failed").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/dashboard?error=auth_failed");

        let url = resolve_location(&origin(), "http://localhost:5173/").unwrap();
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_resolve_location_rejects_other_origins() {
        assert!(matches!(
            resolve_location(&origin(), "https://evil.example/"),
            Err(StartupError::ForeignLocation(_))
        ));
    }

    #[test]
    fn test_frontend_origin_must_parse() {
        let mut config = ConfigV1::default();
        config.frontend.origin = "::".to_string();
        assert!(matches!(
            frontend_origin(&config),
            Err(StartupError::InvalidUrl { field: "frontend.origin", .. })
        ));
    }
}
