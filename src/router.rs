//! Client-side routing. Picks the view for a path from the current
//! [`ViewState`]; no side effects happen here.

use crate::models::UserRecord;
use crate::state::ViewState;

pub const HOME_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
    Unmatched,
}

impl Route {
    /// Match a location path. One trailing slash is ignored.
    pub fn from_path(path: &str) -> Route {
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        match trimmed {
            "" | HOME_PATH => Route::Home,
            DASHBOARD_PATH => Route::Dashboard,
            _ => Route::Unmatched,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Session resolution still in flight.
    Loading,
    SignIn,
    Welcome { user: UserRecord },
    /// Mount the dashboard component.
    Dashboard,
    /// Replace-navigate to `to` instead of rendering anything.
    Redirect { to: &'static str },
    /// No route matched: the page shell renders with no content.
    Unmatched,
}

pub fn route(state: &ViewState, path: &str) -> View {
    if state.loading {
        return View::Loading;
    }
    match (Route::from_path(path), state.session.user()) {
        (Route::Home, Some(user)) => View::Welcome { user: user.clone() },
        (Route::Home, None) => View::SignIn,
        (Route::Dashboard, Some(_)) => View::Dashboard,
        (Route::Dashboard, None) => View::Redirect { to: HOME_PATH },
        (Route::Unmatched, _) => View::Unmatched,
    }
}
