//! Session collaborator: known servers, current server, and access token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard only reads the session. [`Session`] is the capability the host's
//! store exposes; [`SessionStateView`] is the defaulted snapshot the decision
//! table runs on, so absent data never reaches [`crate::decide`].

pub mod store;


use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transport::{Transport, TransportError};

/// Opaque server identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(pub Uuid);

impl ServerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ServerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ServerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A backend server the user has registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRef {
    pub id: ServerId,
    /// Base URL of the server.
    pub address: String,
}

/// Read access to the host's session store.
pub trait Session {
    /// Registered servers, in registration order.
    fn servers(&self) -> Vec<ServerRef>;

    fn current_user(&self) -> Option<String>;

    /// Access token `user` holds for the current server.
    fn user_access_token(&self, user: &str) -> Option<String>;

    fn current_server(&self) -> Option<ServerRef>;

    /// Token of the current user, or empty when there is no user or no token.
    fn access_token(&self) -> String {
        self.current_user()
            .and_then(|user| self.user_access_token(&user))
            .unwrap_or_default()
    }

    /// Apply the current token as the transport's default auth header.
    fn apply_auth_header(&self, transport: &mut dyn Transport) -> Result<(), TransportError> {
        let token = self.access_token();
        transport.set_bearer_token(Some(token.as_str()).filter(|t| !t.is_empty()))
    }
}

/// Defaulted snapshot of the session the decision table runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStateView {
    pub servers: Vec<ServerRef>,
    pub current_server: Option<ServerRef>,
    /// Empty means not authenticated with the current server.
    pub access_token: String,
}

impl SessionStateView {
    #[must_use]
    pub fn from_session<S: Session + ?Sized>(session: &S) -> Self {
        Self {
            servers: session.servers(),
            current_server: session.current_server(),
            access_token: session.access_token(),
        }
    }

    /// Address of the current server, or empty when none is selected.
    #[must_use]
    pub fn current_address(&self) -> &str {
        self.current_server.as_ref().map_or("", |s| s.address.as_str())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_server.is_some() && !self.access_token.is_empty()
    }
}
