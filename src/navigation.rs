//! Browser location and history access.
//!
//! The session resolver, router, and dashboard never touch a global
//! location. They go through [`Navigator`], so tests and the terminal
//! client can supply their own.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use url::Url;

/// What happened to the location, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEvent {
    /// History entry rewritten in place, no reload (`history.replaceState`).
    ReplaceState(Url),
    /// Client-side route change adding a history entry.
    Push(Url),
    /// Client-side route change replacing the current entry.
    Replace(Url),
    /// Full page navigation (`location.href = ...`). Reloads the app when
    /// the target is on the same origin.
    Assign(Url),
}

pub trait Navigator: Send + Sync {
    /// The current location, including query and fragment.
    fn location(&self) -> Url;
    /// Rewrite the visible URL without reloading.
    fn replace_state(&self, url: Url);
    /// Client-side navigation to `target`, adding a history entry.
    fn push(&self, target: &str);
    /// Client-side navigation to `target` replacing the current entry.
    fn replace(&self, target: &str);
    /// Full navigation to `target`, absolute or relative to the location.
    fn assign(&self, target: &str);
}

/// In-memory navigator that records every navigation.
#[derive(Debug)]
pub struct MemoryNavigator {
    inner: Mutex<MemoryState>,
}

#[derive(Debug)]
struct MemoryState {
    location: Url,
    events: Vec<NavigationEvent>,
}

impl MemoryNavigator {
    pub fn new(location: Url) -> Self {
        Self {
            inner: Mutex::new(MemoryState {
                location,
                events: Vec::new(),
            }),
        }
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.lock().events.clone()
    }

    /// The most recent full navigation, if any.
    pub fn last_assigned(&self) -> Option<Url> {
        self.lock().events.iter().rev().find_map(|event| match event {
            NavigationEvent::Assign(url) => Some(url.clone()),
            _ => None,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a panic elsewhere; the state is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn resolve(location: &Url, target: &str) -> Url {
        location.join(target).unwrap_or_else(|_| location.clone())
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> Url {
        self.lock().location.clone()
    }

    fn replace_state(&self, url: Url) {
        let mut state = self.lock();
        state.location = url.clone();
        state.events.push(NavigationEvent::ReplaceState(url));
    }

    fn push(&self, target: &str) {
        let mut state = self.lock();
        let url = Self::resolve(&state.location, target);
        state.location = url.clone();
        state.events.push(NavigationEvent::Push(url));
    }

    fn replace(&self, target: &str) {
        let mut state = self.lock();
        let url = Self::resolve(&state.location, target);
        state.location = url.clone();
        state.events.push(NavigationEvent::Replace(url));
    }

    fn assign(&self, target: &str) {
        let mut state = self.lock();
        let url = Self::resolve(&state.location, target);
        state.location = url.clone();
        state.events.push(NavigationEvent::Assign(url));
    }
}

/// Whether `url` is served by the same origin as `base`.
pub fn same_origin(url: &Url, base: &Url) -> bool {
    url.origin() == base.origin()
}
