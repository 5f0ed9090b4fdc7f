//! Per-navigation hook: session sync, then redirect decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host router calls [`NavigationGuard::on_navigate`] once per navigation
//! attempt, serialized. The guard owns the lifecycle phase: the first call runs
//! in [`LifecyclePhase::Booting`] and dispatches through the router's
//! short-circuit redirect; every later call runs in [`LifecyclePhase::Running`]
//! and enqueues a push. The transition happens once and is never undone, even
//! if the session later looks like a fresh install again.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use serde::{Deserialize, Serialize};

use crate::config::{GuardConfig, RouteTable};
use crate::decide::{Destination, Verdict, apply, redirect_target};
use crate::router::{NavigationTarget, QueuedNavigator, Router, ShortCircuitNavigator};
use crate::session::{Session, SessionStateView};
use crate::sync::sync;
use crate::transport::{Transport, TransportError};

/// Application lifecycle phase selecting the redirect mechanism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    /// No navigation has been guarded yet.
    #[default]
    Booting,
    Running,
}

/// What a guard invocation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// No redirect needed.
    Stayed,
    /// A destination was computed but the router is already on it or heading to it.
    Suppressed { destination: Destination },
    /// A redirect was dispatched.
    Redirected { destination: Destination, path: String, phase: LifecyclePhase },
}

/// Result of one [`NavigationGuard::on_navigate`] call.
///
/// The redirect decision never depends on the transport, so `outcome` is
/// always present. `sync` carries any transport failure separately.
#[derive(Debug)]
pub struct GuardReport {
    pub outcome: GuardOutcome,
    pub sync: Result<(), TransportError>,
}

impl GuardReport {
    /// Whether a redirect was handed to the router.
    #[must_use]
    pub fn dispatched(&self) -> bool {
        matches!(self.outcome, GuardOutcome::Redirected { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    config: GuardConfig,
    phase: LifecyclePhase,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self { config, phase: LifecyclePhase::Booting }
    }

    /// Guard resuming in `phase`, for hosts that guard navigations from a
    /// process that has already booted.
    #[must_use]
    pub fn with_phase(config: GuardConfig, phase: LifecyclePhase) -> Self {
        Self { config, phase }
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.config.routes
    }

    /// Guard one navigation.
    ///
    /// Syncs the transport, then decides and dispatches a redirect through the
    /// mechanism for the current phase. The phase becomes `Running` after this
    /// call whether or not anything was dispatched. A sync failure is reported
    /// in [`GuardReport::sync`] and does not stop the redirect.
    pub fn on_navigate<R: Router + ?Sized>(
        &mut self,
        transport: &mut dyn Transport,
        session: &(impl Session + ?Sized),
        router: &mut R,
    ) -> GuardReport {
        let synced = sync(transport, session);
        if let Err(e) = &synced {
            tracing::warn!(error = %e, "session sync failed");
        }

        let phase = std::mem::replace(&mut self.phase, LifecyclePhase::Running);
        let outcome = self.redirect(session, router, phase);
        GuardReport { outcome, sync: synced }
    }

    fn redirect<R: Router + ?Sized>(
        &self,
        session: &(impl Session + ?Sized),
        router: &mut R,
        phase: LifecyclePhase,
    ) -> GuardOutcome {
        let view = SessionStateView::from_session(session);
        let nav = NavigationTarget::from_router(&*router);

        let action = match redirect_target(&view, &nav, self.routes()) {
            Verdict::Stay => return GuardOutcome::Stayed,
            Verdict::Suppressed(destination) => return GuardOutcome::Suppressed { destination },
            Verdict::Redirect(action) => action,
        };

        match phase {
            LifecyclePhase::Booting => apply(&action, &mut ShortCircuitNavigator(router)),
            LifecyclePhase::Running => apply(&action, &mut QueuedNavigator(router)),
        }
        tracing::info!(destination = %action.path, ?phase, "redirect dispatched");

        GuardOutcome::Redirected { destination: action.destination, path: action.path, phase }
    }
}
