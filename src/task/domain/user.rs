//! Acting user accounts.

use super::{AccessToken, UserId};

/// A user account able to author tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    github_token: Option<AccessToken>,
}

impl User {
    /// Creates a user without GitHub credentials.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            github_token: None,
        }
    }

    /// Attaches the user's GitHub OAuth token.
    #[must_use]
    pub fn with_github_token(mut self, token: AccessToken) -> Self {
        self.github_token = Some(token);
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the user's GitHub token, if connected.
    #[must_use]
    pub const fn github_token(&self) -> Option<&AccessToken> {
        self.github_token.as_ref()
    }
}
