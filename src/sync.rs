//! Point the transport at the current server before any request goes out.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use crate::session::{Session, SessionStateView};
use crate::transport::{Transport, TransportError};

/// Set the transport's base URL to the current server's address (empty when
/// none is selected) and have the session re-apply its auth header.
///
/// # Errors
///
/// Forwards the error from [`Session::apply_auth_header`]. The base URL is
/// already updated when that happens.
pub fn sync(transport: &mut dyn Transport, session: &(impl Session + ?Sized)) -> Result<(), TransportError> {
    let view = SessionStateView::from_session(session);
    transport.set_base_url(view.current_address());
    session.apply_auth_header(transport)
}
