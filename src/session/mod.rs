// Submodules for separation of concerns
mod roles;
mod store;

pub use roles::{RoleInput, RoleSet};
pub use store::{SessionFile, clear_saved, default_path, load_into, save_from};

use parking_lot::{Mutex, RwLock};
use zeroize::Zeroizing;

type InvalidatedHook = Box<dyn Fn() + Send + Sync>;

struct Credentials {
    token: Zeroizing<String>,
    username: String,
    roles: RoleSet,
}

/// Holder of the bearer credential and the normalized role set.
///
/// Collaborators that observe an unauthorized response call
/// [`Session::invalidate`]; the one registered owner (the route guard or
/// top-level session holder) is notified through its hook and the facade
/// refuses further fetches until `authenticate` runs again.
#[derive(Default)]
pub struct Session {
    creds: RwLock<Option<Credentials>>,
    on_invalidated: Mutex<Option<InvalidatedHook>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticate(&self, token: &str, username: &str, roles: impl Into<RoleSet>) {
        let roles = roles.into();
        log::info!("session: authenticated user={username} roles={roles}");
        *self.creds.write() = Some(Credentials {
            token: Zeroizing::new(token.to_string()),
            username: username.to_string(),
            roles,
        });
    }

    /// Drop the credential without signaling; an explicit logout.
    pub fn clear(&self) {
        *self.creds.write() = None;
    }

    /// Drop the credential in response to an unauthorized collaborator
    /// response and notify the registered owner, if any.
    pub fn invalidate(&self) {
        log::warn!("session: invalidated by unauthorized response");
        self.clear();
        if let Some(hook) = self.on_invalidated.lock().as_ref() {
            hook();
        }
    }

    /// Register the single invalidation subscriber. A second registration
    /// replaces the first; the session has exactly one owner.
    pub fn on_invalidated(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_invalidated.lock() = Some(Box::new(hook));
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.creds.read().is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.creds.read().as_ref().map(|c| c.token.as_str().to_string())
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.creds.read().as_ref().map(|c| c.username.clone())
    }

    #[must_use]
    pub fn roles(&self) -> RoleSet {
        self.creds.read().as_ref().map(|c| c.roles.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.creds.read().as_ref().is_some_and(|c| c.roles.has(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn invalidate_clears_and_notifies_once_per_call() {
        let session = Session::new();
        session.authenticate("tok", "ayse", RoleInput::from("ROLE_ADMIN"));
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        session.on_invalidated(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        session.invalidate();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn second_subscriber_replaces_the_first() {
        let session = Session::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let c1 = first.clone();
        session.on_invalidated(move || {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let c2 = second.clone();
        session.on_invalidated(move || {
            c2.fetch_add(1, Ordering::SeqCst);
        });

        session.invalidate();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn role_check_requires_a_credential() {
        let session = Session::new();
        assert!(!session.has_role("ADMIN"));
        session.authenticate("tok", "ayse", RoleInput::from("ADMIN"));
        assert!(session.has_role("ROLE_ADMIN"));
    }
}
