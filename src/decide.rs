//! Redirect decision table.
//!
//! Rules, first match wins:
//!
//! | # | Condition | Destination |
//! |---|---|---|
//! | 1 | no servers registered | add server |
//! | 2 | current server without token, or on the add page with exactly one server | login |
//! | 3 | authenticated and on a pre-auth page | home |
//! | 4 | no current server | select server |
//! | 5 | otherwise | stay |
//!
//! Rule 2's second clause moves the user off the add page right after they
//! register their only server, before a current server is marked. With two or
//! more servers it no longer fires and later rules apply.
//!
//! A computed destination is dropped when the router is already on it or
//! already heading to it. Re-issuing a navigation to the router's own
//! in-flight target can livelock it.

#[cfg(test)]
#[path = "decide_test.rs"]
mod decide_test;

use serde::{Deserialize, Serialize};

use crate::config::RouteTable;
use crate::router::{NavigationTarget, Navigator};
use crate::session::SessionStateView;

/// One of the reserved routes the guard can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    AddServer,
    SelectServer,
    Login,
    Home,
}

impl Destination {
    /// Route path for this destination in `routes`.
    #[must_use]
    pub fn path(self, routes: &RouteTable) -> &str {
        match self {
            Self::AddServer => &routes.add,
            Self::SelectServer => &routes.select,
            Self::Login => &routes.login,
            Self::Home => &routes.home,
        }
    }
}

/// A destination resolved to a concrete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectAction {
    pub destination: Destination,
    pub path: String,
}

impl RedirectAction {
    #[must_use]
    pub fn new(destination: Destination, routes: &RouteTable) -> Self {
        Self { destination, path: destination.path(routes).to_owned() }
    }
}

/// Result of the decision table plus loop avoidance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No destination: the user may stay.
    Stay,
    /// The router is already on, or heading to, the destination.
    Suppressed(Destination),
    /// Navigate to the action's path.
    Redirect(RedirectAction),
}

impl Verdict {
    /// The action to dispatch, if any.
    #[must_use]
    pub fn into_action(self) -> Option<RedirectAction> {
        match self {
            Self::Redirect(action) => Some(action),
            Self::Stay | Self::Suppressed(_) => None,
        }
    }
}

/// Evaluate the decision table. Total over its inputs; `None` means stay.
#[must_use]
pub fn decide(session: &SessionStateView, nav: &NavigationTarget, routes: &RouteTable) -> Option<Destination> {
    let has_current = session.current_server.is_some();

    let destination = if session.servers.is_empty() {
        Some(Destination::AddServer)
    } else if (has_current && session.access_token.is_empty())
        || (nav.current_path == routes.add && session.servers.len() == 1)
    {
        Some(Destination::Login)
    } else if session.is_authenticated() && routes.is_pre_auth(&nav.current_path) {
        Some(Destination::Home)
    } else if !has_current {
        Some(Destination::SelectServer)
    } else {
        None
    };

    tracing::debug!(
        current_path = %nav.current_path,
        pending_path = %nav.pending_path,
        ?destination,
        "redirect decision"
    );
    destination
}

/// [`decide`] followed by loop avoidance.
///
/// A destination the router is already on, or already heading to, comes back
/// as [`Verdict::Suppressed`] and must not be dispatched.
#[must_use]
pub fn redirect_target(session: &SessionStateView, nav: &NavigationTarget, routes: &RouteTable) -> Verdict {
    let Some(destination) = decide(session, nav, routes) else {
        return Verdict::Stay;
    };
    let action = RedirectAction::new(destination, routes);
    if nav.is_at_or_heading_to(&action.path) {
        tracing::debug!(path = %action.path, "redirect suppressed: already there or in flight");
        return Verdict::Suppressed(destination);
    }
    Verdict::Redirect(action)
}

/// Issue `action` through `navigator`.
pub fn apply(action: &RedirectAction, navigator: &mut dyn Navigator) {
    navigator.go_to(&action.path);
}
