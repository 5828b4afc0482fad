use crate::domain_port::Navigator;
use crate::logger::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Tracks the console location in process and remembers every `replace`.
#[derive(Debug)]
pub struct InMemoryNavigator {
    state: Mutex<NavState>,
}

#[derive(Debug)]
struct NavState {
    current: String,
    history: Vec<String>,
}

impl InMemoryNavigator {
    pub fn new(initial_route: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(NavState {
                current: initial_route.into(),
                history: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Routes passed to `replace`, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }
}

impl Default for InMemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for InMemoryNavigator {
    fn current_route(&self) -> String {
        self.lock().current.clone()
    }

    fn replace(&self, route: &str) {
        info!(route, "navigating");
        let mut state = self.lock();
        state.current = route.to_string();
        state.history.push(route.to_string());
    }
}
