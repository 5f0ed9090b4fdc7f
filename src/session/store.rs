//! In-memory session store.
//!
//! Holds registered servers, the selected server, the signed-in user, and
//! one token per (server, user) pair. Nothing here is persisted; the type is
//! serde-friendly so hosts can hydrate it from whatever storage they own.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::{Deserialize, Serialize};

use super::{ServerId, ServerRef, Session};

/// Errors produced by [`SessionStore`] mutations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown server: {0}")]
    UnknownServer(ServerId),
    #[error("no server selected")]
    NoServerSelected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredToken {
    server: ServerId,
    user: String,
    token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStore {
    servers: Vec<ServerRef>,
    current_server: Option<ServerId>,
    current_user: Option<String>,
    tokens: Vec<StoredToken>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a server. Registration does not select it.
    pub fn add_server(&mut self, address: &str) -> ServerRef {
        let server = ServerRef { id: ServerId::new(), address: address.trim_end_matches('/').to_owned() };
        tracing::debug!(server_id = %server.id, address = %server.address, "server registered");
        self.servers.push(server.clone());
        server
    }

    /// Make `id` the current server.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownServer`] if `id` is not registered.
    pub fn select_server(&mut self, id: ServerId) -> Result<ServerRef, SessionError> {
        let server = self.find(id).cloned().ok_or(SessionError::UnknownServer(id))?;
        self.current_server = Some(id);
        tracing::debug!(server_id = %id, "server selected");
        Ok(server)
    }

    /// Forget a server along with its tokens. Clears the selection if it was current.
    pub fn remove_server(&mut self, id: ServerId) -> Option<ServerRef> {
        let index = self.servers.iter().position(|s| s.id == id)?;
        let removed = self.servers.remove(index);
        self.tokens.retain(|t| t.server != id);
        if self.current_server == Some(id) {
            self.current_server = None;
        }
        Some(removed)
    }

    /// Record `user` as signed in to the current server with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoServerSelected`] when no server is current.
    pub fn log_in(&mut self, user: &str, token: &str) -> Result<(), SessionError> {
        let server = self.current_server.ok_or(SessionError::NoServerSelected)?;
        self.tokens.retain(|t| !(t.server == server && t.user == user));
        self.tokens.push(StoredToken { server, user: user.to_owned(), token: token.to_owned() });
        self.current_user = Some(user.to_owned());
        Ok(())
    }

    /// Drop the current user's token for the current server.
    pub fn log_out(&mut self) {
        if let (Some(server), Some(user)) = (self.current_server, self.current_user.take()) {
            self.tokens.retain(|t| !(t.server == server && t.user == user));
        }
    }

    fn find(&self, id: ServerId) -> Option<&ServerRef> {
        self.servers.iter().find(|s| s.id == id)
    }
}

impl Session for SessionStore {
    fn servers(&self) -> Vec<ServerRef> {
        self.servers.clone()
    }

    fn current_user(&self) -> Option<String> {
        self.current_user.clone()
    }

    fn user_access_token(&self, user: &str) -> Option<String> {
        let server = self.current_server?;
        self.tokens
            .iter()
            .find(|t| t.server == server && t.user == user)
            .map(|t| t.token.clone())
    }

    fn current_server(&self) -> Option<ServerRef> {
        self.current_server.and_then(|id| self.find(id)).cloned()
    }
}
