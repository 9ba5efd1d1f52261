use crate::session::Session;
use std::sync::Arc;

/// Outcome of a route check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
}

/// Route-level gate over the session's normalized roles.
pub struct RouteGuard {
    session: Arc<Session>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// No credential redirects; a required role missing from the
    /// normalized set redirects; everything else is granted. Both
    /// `"ADMIN"` and `"ROLE_ADMIN"` name the same requirement.
    #[must_use]
    pub fn check(&self, required_role: Option<&str>) -> Access {
        if !self.session.is_authenticated() {
            return Access::RedirectToLogin;
        }
        if let Some(role) = required_role
            && !self.session.has_role(role)
        {
            log::debug!("guard: missing role {role}");
            return Access::RedirectToLogin;
        }
        Access::Granted
    }
}
