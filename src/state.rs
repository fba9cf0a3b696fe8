//! View state owned by the top-level app.
//!
//! A single serializable value describes what the page currently believes:
//! who the visitor is, whether that is still being worked out, and the last
//! failure to show.

use serde::{Deserialize, Serialize};

use crate::models::UserRecord;

/// The client's belief about the visitor. Replaced, never edited.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated { user: UserRecord },
}

impl Session {
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Session::Authenticated { user } => Some(user),
            Session::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// Everything the router and renderer need to draw the page shell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub session: Session,
    /// True until the session resolver has finished, on every path.
    pub loading: bool,
    /// TransientError: display-only text for the last failed operation.
    pub error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            session: Session::Unauthenticated,
            loading: true,
            error: None,
        }
    }
}
