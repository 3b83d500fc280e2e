//! Explicit auth session lifecycle

/// Auth context for the HTTP store.
///
/// Created once a token is available and injected into the client, instead
/// of being read from ambient global state. `clear` is the logout teardown.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session { token: None }
    }

    pub fn authenticated(token: impl Into<String>) -> Self {
        Session {
            token: Some(token.into()),
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Drop the token; the session stays usable for anonymous calls.
    pub fn clear(&mut self) {
        self.token = None;
    }
}
