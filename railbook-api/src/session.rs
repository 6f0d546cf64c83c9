use crate::backend::IdentityBackend;
use crate::error::ApiResult;
use crate::token::TokenStore;
use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use railbook_shared::UserProfile;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Login state as every screen sees it. There is no loading variant: a
/// caller is "loading" while it awaits `session()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    LoggedOut,
    LoggedIn(UserProfile),
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::LoggedIn(profile) => Some(profile),
            Session::LoggedOut => None,
        }
    }
}

type SessionFuture = Shared<BoxFuture<'static, Session>>;

/// Single injected source of login state.
///
/// Derivation: no stored token means logged out with no network call;
/// otherwise a "who am I" round-trip decides. Screens that mount
/// concurrently share one in-flight round-trip instead of issuing one each.
pub struct SessionProvider {
    backend: Arc<dyn IdentityBackend>,
    store: Arc<dyn TokenStore>,
    inflight: Mutex<Option<SessionFuture>>,
}

impl SessionProvider {
    pub fn new(backend: Arc<dyn IdentityBackend>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            backend,
            store,
            inflight: Mutex::new(None),
        }
    }

    /// Current session, re-derived on every call but deduplicated across
    /// concurrent callers.
    pub async fn session(&self) -> Session {
        let fut = {
            let mut guard = self.inflight.lock().await;
            match guard.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let fresh = derive(self.backend.clone(), self.store.clone())
                        .boxed()
                        .shared();
                    *guard = Some(fresh.clone());
                    fresh
                }
            }
        };

        let session = fut.await;

        // The derivation is point-in-time; drop it so the next mount
        // re-checks rather than reading a stale answer forever.
        self.inflight.lock().await.take();

        session
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserProfile> {
        self.inflight.lock().await.take();
        self.backend.login(email, password).await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.inflight.lock().await.take();
        self.backend.logout().await
    }
}

async fn derive(backend: Arc<dyn IdentityBackend>, store: Arc<dyn TokenStore>) -> Session {
    match store.load_tokens().await {
        Ok(Some(_)) => {}
        Ok(None) => return Session::LoggedOut,
        Err(err) => {
            tracing::warn!("token storage unreadable: {err}");
            return Session::LoggedOut;
        }
    }

    match backend.me().await {
        Ok(profile) => {
            if let Err(err) = store.save_profile(&profile).await {
                tracing::warn!("failed to cache profile: {err}");
            }
            Session::LoggedIn(profile)
        }
        Err(err) => {
            tracing::info!("who-am-i failed, treating as logged out: {err}");
            if let Err(err) = store.clear().await {
                tracing::warn!("failed to clear stale credentials: {err}");
            }
            Session::LoggedOut
        }
    }
}
