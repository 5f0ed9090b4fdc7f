//! Router collaborator and the two redirect mechanisms.
//!
//! DESIGN
//! ======
//! The host router exposes two ways to navigate:
//! - a short-circuit redirect that halts the navigation being resolved, used
//!   while the app is booting and nothing is committed yet;
//! - a queued push that enqueues a new navigation behind any in-flight one,
//!   used once the app is running.
//!
//! The decider only sees [`Navigator::go_to`]. The caller picks
//! [`ShortCircuitNavigator`] or [`QueuedNavigator`] from the lifecycle phase.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use serde::{Deserialize, Serialize};

/// Where the router is and where it is heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    /// Committed path.
    pub current_path: String,
    /// In-flight path, empty when no navigation is pending.
    pub pending_path: String,
}

impl NavigationTarget {
    #[must_use]
    pub fn new(current_path: impl Into<String>, pending_path: impl Into<String>) -> Self {
        Self { current_path: current_path.into(), pending_path: pending_path.into() }
    }

    #[must_use]
    pub fn from_router<R: Router + ?Sized>(router: &R) -> Self {
        Self { current_path: router.current_path(), pending_path: router.pending_path() }
    }

    /// Whether the router is already on, or already heading to, `path`.
    #[must_use]
    pub fn is_at_or_heading_to(&self, path: &str) -> bool {
        path == self.current_path || path == self.pending_path
    }
}

/// Capability the guard needs from the host router.
pub trait Router {
    /// Committed path, or empty if nothing has been committed yet.
    fn current_path(&self) -> String;

    /// In-flight path, or empty.
    fn pending_path(&self) -> String;

    /// Short-circuit the navigation being resolved and go to `path` instead.
    fn redirect(&mut self, path: &str);

    /// Enqueue a navigation to `path`.
    fn push(&mut self, path: &str);
}

/// Single-operation navigation capability used by the decider.
pub trait Navigator {
    fn go_to(&mut self, path: &str);
}

/// Navigator backed by [`Router::redirect`].
pub struct ShortCircuitNavigator<'a, R: Router + ?Sized>(pub &'a mut R);

impl<R: Router + ?Sized> Navigator for ShortCircuitNavigator<'_, R> {
    fn go_to(&mut self, path: &str) {
        self.0.redirect(path);
    }
}

/// Navigator backed by [`Router::push`].
pub struct QueuedNavigator<'a, R: Router + ?Sized>(pub &'a mut R);

impl<R: Router + ?Sized> Navigator for QueuedNavigator<'_, R> {
    fn go_to(&mut self, path: &str) {
        self.0.push(path);
    }
}

/// How a navigation was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    Redirect,
    Push,
}

/// In-memory router that records every dispatched navigation.
///
/// A redirect replaces the pending path; a push sets it if nothing is
/// pending. Neither commits: [`Self::settle`] does that.
#[derive(Debug, Clone, Default)]
pub struct RecordingRouter {
    pub current: String,
    pub pending: String,
    pub dispatched: Vec<(Dispatch, String)>,
}

impl RecordingRouter {
    #[must_use]
    pub fn at(current: impl Into<String>) -> Self {
        Self { current: current.into(), ..Self::default() }
    }

    /// Commit the pending navigation, if any.
    pub fn settle(&mut self) {
        if !self.pending.is_empty() {
            self.current = std::mem::take(&mut self.pending);
        }
    }

    #[must_use]
    pub fn last(&self) -> Option<&(Dispatch, String)> {
        self.dispatched.last()
    }
}

impl Router for RecordingRouter {
    fn current_path(&self) -> String {
        self.current.clone()
    }

    fn pending_path(&self) -> String {
        self.pending.clone()
    }

    fn redirect(&mut self, path: &str) {
        self.dispatched.push((Dispatch::Redirect, path.to_owned()));
        path.clone_into(&mut self.pending);
    }

    fn push(&mut self, path: &str) {
        self.dispatched.push((Dispatch::Push, path.to_owned()));
        if self.pending.is_empty() {
            path.clone_into(&mut self.pending);
        }
    }
}
