//! Session identity and the per-user "is admin" cache.
//!
//! The auth provider owns sign-in and sign-out. This module only tracks who
//! is signed in and remembers the result of the role lookup for that user,
//! so repeated checks within one session cost a single round-trip.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// The signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// Notification delivered to session listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(SessionUser),
    SignedOut,
}

/// Role-check result cached for exactly one user id.
#[derive(Debug, Clone, Default)]
pub struct RoleCache {
    entry: Option<(UserId, bool)>,
}

impl RoleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached answer for `user`, if the last lookup was for that user.
    pub fn get(&self, user: UserId) -> Option<bool> {
        match self.entry {
            Some((cached, is_admin)) if cached == user => Some(is_admin),
            _ => None,
        }
    }

    pub fn store(&mut self, user: UserId, is_admin: bool) {
        self.entry = Some((user, is_admin));
    }

    /// Drop the cached answer. Called on every sign-in and sign-out.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn cache_is_keyed_by_user() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let mut cache = RoleCache::new();
        assert_eq!(cache.get(alice), None);

        cache.store(alice, true);
        assert_eq!(cache.get(alice), Some(true));
        assert_eq!(cache.get(bob), None);

        cache.store(bob, false);
        assert_eq!(cache.get(alice), None);
        assert_eq!(cache.get(bob), Some(false));
    }

    #[test]
    fn invalidate_forgets() {
        let user = Uuid::new_v4();
        let mut cache = RoleCache::new();
        cache.store(user, true);
        cache.invalidate();
        assert_eq!(cache.get(user), None);
    }
}
