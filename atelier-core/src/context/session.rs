use atelier_model::CurrentUser;
use std::fmt;

/// Connection details shared by every page, built once at start-up.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub base_url: String,
    pub token: Option<String>,
    pub current_user: Option<CurrentUser>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("current_user", &self.current_user)
            .finish()
    }
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            current_user: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_user(mut self, user: CurrentUser) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Name for the console header.
    pub fn display_user(&self) -> &str {
        self.current_user
            .as_ref()
            .map(|user| user.full_name.as_str())
            .unwrap_or("anonymous")
    }
}
