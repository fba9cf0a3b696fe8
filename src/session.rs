//! Session resolution: runs once per page load and turns the URL plus the
//! backend's `/api/user` answer into a [`ViewState`].

use tracing::{debug, info, warn};

use crate::backend::{Backend, BackendError};
use crate::navigation::Navigator;
use crate::state::{Session, ViewState};

pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please try again.";
pub const LOGIN_FAILED_MESSAGE: &str = "Sign in could not be started. Please try again.";
pub const AUTH_CHECK_FAILED_MESSAGE: &str = "Unable to verify your session. Please try again.";
pub const LOGOUT_FAILED_MESSAGE: &str = "Logout failed. Please try again.";

const ERROR_PARAM: &str = "error";

/// Message for an `?error=` code the backend sends visitors back with.
pub fn error_message_for(code: &str) -> Option<&'static str> {
    match code {
        "auth_failed" => Some(AUTH_FAILED_MESSAGE),
        "login_failed" => Some(LOGIN_FAILED_MESSAGE),
        _ => None,
    }
}

/// Read the `error` query parameter and strip it from the visible URL.
///
/// Other parameters and the fragment survive. Unknown codes are stripped
/// too but produce no message.
pub fn take_url_error(navigator: &dyn Navigator) -> Option<&'static str> {
    let mut location = navigator.location();
    let code = location
        .query_pairs()
        .find(|(key, _)| key == ERROR_PARAM)
        .map(|(_, value)| value.into_owned())?;

    let kept: Vec<(String, String)> = location
        .query_pairs()
        .filter(|(key, _)| key != ERROR_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        location.set_query(None);
    } else {
        location.query_pairs_mut().clear().extend_pairs(kept);
    }
    navigator.replace_state(location);

    let message = error_message_for(&code);
    match message {
        Some(_) => info!(
            event_name = "session.url_error",
            event_domain = "session",
            code = code.as_str(),
            "error parameter found on landing"
        ),
        None => debug!("ignoring unknown error code '{}'", code),
    }
    message
}

/// Resolve the session for a fresh page load.
///
/// The returned state always has `loading == false`.
pub async fn resolve(backend: &dyn Backend, navigator: &dyn Navigator) -> ViewState {
    let mut error = take_url_error(navigator).map(str::to_string);

    debug!("Checking auth...");
    let session = match backend.current_user().await {
        Ok(user) => {
            info!(
                event_name = "session.resolve.authenticated",
                event_domain = "session",
                user_id = user.id.as_str(),
                "session resolved"
            );
            Session::Authenticated { user }
        }
        Err(BackendError::Unauthorized) => {
            debug!("no active session");
            Session::Unauthenticated
        }
        Err(e) => {
            warn!(
                event_name = "session.resolve.failed",
                event_domain = "session",
                error = %e,
                "auth check failed"
            );
            error.get_or_insert_with(|| AUTH_CHECK_FAILED_MESSAGE.to_string());
            Session::Unauthenticated
        }
    };

    ViewState {
        session,
        loading: false,
        error,
    }
}
