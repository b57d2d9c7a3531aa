//! services/client/src/app/guard.rs
//!
//! Brackets every remote call with the loading indicator. The indicator is
//! released on every exit path, including early returns and failures, by a
//! drop guard.

use super::state::AppState;
use coursify_core::domain::{Role, SessionToken};
use coursify_core::ports::{PortError, PortResult};
use coursify_core::view::ViewState;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Keeps the loading indicator up while alive.
pub struct LoadingGuard<'a> {
    view: &'a Mutex<ViewState>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(view: &'a Mutex<ViewState>) -> Self {
        view.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .begin_loading();
        Self { view }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .end_loading();
    }
}

impl AppState {
    pub fn loading(&self) -> LoadingGuard<'_> {
        LoadingGuard::acquire(self.loading_slot())
    }

    /// Runs a public call with the loading indicator up.
    pub async fn run<T, Fut>(&self, call: Fut) -> PortResult<T>
    where
        Fut: Future<Output = PortResult<T>>,
    {
        let _loading = self.loading();
        call.await
    }

    /// Runs a call gated on `role`'s token. Without a stored token the call
    /// fails as `Unauthorized` and nothing is sent.
    ///
    /// When configured to, a 401 answer clears the role's token; the caller's
    /// next refresh then falls back to the anonymous mode.
    pub async fn run_gated<T, F, Fut>(&self, role: Role, call: F) -> PortResult<T>
    where
        F: FnOnce(SessionToken) -> Fut,
        Fut: Future<Output = PortResult<T>>,
    {
        let _loading = self.loading();
        let token = self.token(role).ok_or(PortError::Unauthorized)?;
        let result = call(token).await;
        if let Err(err) = &result {
            if err.is_unauthorized_status() && self.config.clear_on_unauthorized {
                info!(?role, "Session rejected by the API; clearing token");
                self.clear_token(role);
            }
        }
        result
    }
}
