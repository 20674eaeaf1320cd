//! The signed-in user, their cached admin check, and change notifications.
//!
//! One [`Session`] is owned by the top-level application and handed by
//! reference to every gated component.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use seatfinder_core::session::{RoleCache, SessionEvent, SessionUser};

use crate::backend::Backend;
use crate::error::ConsoleError;

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
struct SessionInner {
    user: Option<SessionUser>,
    roles: RoleCache,
}

pub struct Session<B: Backend + ?Sized> {
    backend: Arc<B>,
    inner: Mutex<SessionInner>,
    listeners: Mutex<Vec<Listener>>,
}

impl<B: Backend + ?Sized> Session<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            inner: Mutex::new(SessionInner::default()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn inner(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a sign-in completed by the auth provider.
    pub fn sign_in(&self, user: SessionUser, access_token: String) {
        self.backend.set_access_token(Some(access_token));
        {
            let mut inner = self.inner();
            inner.roles.invalidate();
            inner.user = Some(user.clone());
        }
        tracing::info!(user_id = %user.id, "Signed in");
        self.notify(&SessionEvent::SignedIn(user));
    }

    pub fn sign_out(&self) {
        self.backend.set_access_token(None);
        {
            let mut inner = self.inner();
            inner.roles.invalidate();
            inner.user = None;
        }
        tracing::info!("Signed out");
        self.notify(&SessionEvent::SignedOut);
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.inner().user.clone()
    }

    /// Whether the current user may see the back office.
    ///
    /// Answered from the cache when possible; otherwise one role lookup.
    /// Signed-out callers are never admins and cost no request.
    pub async fn is_admin(&self) -> Result<bool, ConsoleError> {
        let user_id = {
            let inner = self.inner();
            let Some(user) = inner.user.as_ref() else {
                return Ok(false);
            };
            if let Some(cached) = inner.roles.get(user.id) {
                return Ok(cached);
            }
            user.id
        };

        let is_admin = self.backend.fetch_is_admin().await?;

        let mut inner = self.inner();
        if inner.user.as_ref().map(|u| u.id) == Some(user_id) {
            inner.roles.store(user_id, is_admin);
        }
        Ok(is_admin)
    }

    /// Register `callback` for every later sign-in and sign-out.
    ///
    /// Callbacks run on the thread that changed the session and must not
    /// register further callbacks.
    pub fn on_session_change<F>(&self, callback: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }

    fn notify(&self, event: &SessionEvent) {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use uuid::Uuid;

    use super::*;
    use crate::fake::FakeBackend;

    fn user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: Some("admin@ju.example".to_string()),
        }
    }

    #[tokio::test]
    async fn role_check_is_cached_per_user() {
        let backend = Arc::new(FakeBackend::new());
        backend.admin.store(true, Ordering::SeqCst);
        let session = Session::new(backend.clone());

        session.sign_in(user(), "token-a".into());
        assert!(session.is_admin().await.unwrap());
        assert!(session.is_admin().await.unwrap());
        assert_eq!(backend.role_fetches.load(Ordering::SeqCst), 1);

        session.sign_out();
        session.sign_in(user(), "token-b".into());
        assert!(session.is_admin().await.unwrap());
        assert_eq!(backend.role_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn signed_out_is_not_admin_and_costs_nothing() {
        let backend = Arc::new(FakeBackend::new());
        backend.admin.store(true, Ordering::SeqCst);
        let session = Session::new(backend.clone());

        assert!(!session.is_admin().await.unwrap());
        assert_eq!(backend.role_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sign_in_again_as_same_user_refetches() {
        let backend = Arc::new(FakeBackend::new());
        let session = Session::new(backend.clone());
        let me = user();

        session.sign_in(me.clone(), "t1".into());
        assert!(!session.is_admin().await.unwrap());

        backend.admin.store(true, Ordering::SeqCst);
        session.sign_in(me, "t2".into());
        assert!(session.is_admin().await.unwrap());
        assert_eq!(backend.role_fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn token_follows_session() {
        let backend = Arc::new(FakeBackend::new());
        let session = Session::new(backend.clone());

        session.sign_in(user(), "secret".into());
        assert_eq!(backend.token.lock().unwrap().as_deref(), Some("secret"));
        session.sign_out();
        assert!(backend.token.lock().unwrap().is_none());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn listeners_see_every_change() {
        let session = Session::new(Arc::new(FakeBackend::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session.on_session_change(move |event| sink.lock().unwrap().push(event.clone()));

        let me = user();
        session.sign_in(me.clone(), "t".into());
        session.sign_out();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![SessionEvent::SignedIn(me), SessionEvent::SignedOut]
        );
    }
}
