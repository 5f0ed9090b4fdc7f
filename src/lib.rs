//! # session-guard
//!
//! Client-side session and routing guard for applications that talk to one of
//! several user-selectable backend servers.
//!
//! SYSTEM CONTEXT
//! ==============
//! On every navigation the host calls [`guard::NavigationGuard::on_navigate`],
//! which first points the HTTP transport at the selected server
//! ([`sync::sync`]) and then decides whether the user must be sent to the
//! server-add, server-select, or login page ([`decide::decide`]).
//!
//! The session store, the transport, and the router are collaborators owned by
//! the host. They are reached only through the traits in [`session`],
//! [`transport`], and [`router`].

pub mod config;
pub mod decide;
pub mod guard;
pub mod router;
pub mod session;
pub mod sync;
pub mod transport;

pub use config::{GuardConfig, RouteTable};
pub use decide::{Destination, decide};
pub use guard::{GuardOutcome, LifecyclePhase, NavigationGuard};
pub use router::{NavigationTarget, Navigator, QueuedNavigator, RecordingRouter, Router, ShortCircuitNavigator};
pub use session::{ServerId, ServerRef, Session, SessionStateView, store::SessionStore};
pub use transport::{HttpTransport, Transport, TransportError};
