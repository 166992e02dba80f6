//! Identity context passed into the controller and the tip advisor.
//!
//! One `Session` per active user session; no ambient process-wide state.
//! An anonymous session is the expected unauthenticated state, not an
//! error: every remote call is simply skipped.

/// Nullable user identity.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<UserHandle>,
}

/// An authenticated user together with its bearer credential.
#[derive(Debug, Clone)]
pub struct UserHandle {
    user_id: String,
    token: String,
}

impl Session {
    pub fn authenticated(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: Some(UserHandle {
                user_id: user_id.into(),
                token: token.into(),
            }),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&UserHandle> {
        self.user.as_ref()
    }
}

impl UserHandle {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Bearer token sent on every authenticated request.
    pub fn id_token(&self) -> &str {
        &self.token
    }
}
