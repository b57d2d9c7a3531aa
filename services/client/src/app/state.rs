//! services/client/src/app/state.rs
//!
//! Defines the state shared by an application's controller: the ports it
//! talks through, its configuration and its explicit UI state.

use crate::config::Config;
use chrono::{Duration, Utc};
use coursify_core::auth::{self, UiMode};
use coursify_core::domain::{App, Course, Role, SessionToken, View};
use coursify_core::generation::LoadTicket;
use coursify_core::ports::{CourseGateway, PortError, PortResult, SessionStore};
use coursify_core::render::{render_page, RenderResult};
use coursify_core::view::{ToastKind, ViewState};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Shown when a sign-in succeeded but its token could not be kept.
pub const SESSION_SAVE_FAILED: &str = "Could not save your session";

//=========================================================================================
// AppState (Shared by One Application's Controller)
//=========================================================================================

/// The shared application state, created once per page load.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn CourseGateway>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<Config>,
    view: Arc<Mutex<ViewState>>,
}

impl AppState {
    pub fn new(
        app: App,
        gateway: Arc<dyn CourseGateway>,
        sessions: Arc<dyn SessionStore>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            gateway,
            sessions,
            config,
            view: Arc::new(Mutex::new(ViewState::new(app))),
        }
    }

    /// Runs `f` against the UI state. Never held across an await.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut view)
    }

    /// A copy of the current UI state.
    pub fn snapshot(&self) -> ViewState {
        self.with_view(|view| view.clone())
    }

    pub fn render(&self) -> RenderResult {
        self.with_view(|view| render_page(view, Utc::now()))
    }

    pub(crate) fn loading_slot(&self) -> &Mutex<ViewState> {
        &self.view
    }

    //-------------------------------------------------------------------------------------
    // Session
    //-------------------------------------------------------------------------------------

    /// The role's stored token. An unreadable store counts as signed out.
    pub fn token(&self, role: Role) -> Option<SessionToken> {
        match self.sessions.get(role) {
            Ok(token) => token,
            Err(e) => {
                warn!(?role, "Failed to read session store: {}", e);
                None
            }
        }
    }

    pub fn store_token(&self, role: Role, token: SessionToken) -> PortResult<()> {
        self.sessions.set(role, token)
    }

    pub fn clear_token(&self, role: Role) {
        if let Err(e) = self.sessions.clear(role) {
            warn!(?role, "Failed to clear session token: {}", e);
        }
    }

    /// True when the page shows the signed-in mode but the role's token is
    /// gone, which a rejected gated call can cause.
    pub fn session_lost(&self, role: Role) -> bool {
        self.token(role).is_none()
            && self.with_view(|view| view.mode() == UiMode::Authenticated)
    }

    /// Whether the displayed mode still matches the session store.
    pub fn mode_matches_store(&self, role: Role) -> bool {
        let stored = UiMode::for_token(self.token(role).as_ref());
        self.with_view(|view| view.mode() == stored)
    }

    //-------------------------------------------------------------------------------------
    // Mode entry and view loads
    //-------------------------------------------------------------------------------------

    /// Enters the mode implied by `token` and returns the loads to run.
    pub fn enter(&self, app: App, token: Option<&SessionToken>) -> Vec<LoadTicket> {
        let entry = auth::enter(app, token);
        info!(?app, mode = ?entry.mode, loaders = entry.loaders.len(), "Entering UI mode");
        self.with_view(|view| view.enter_mode(&entry))
    }

    pub fn begin_load(&self, view: View) -> LoadTicket {
        self.with_view(|state| state.begin_load(view))
    }

    /// Applies a finished load. Stale results are dropped silently, fresh
    /// failures are reported with `fallback`.
    pub fn apply_load(&self, ticket: LoadTicket, result: PortResult<Vec<Course>>, fallback: &str) {
        match result {
            Ok(courses) => {
                let count = courses.len();
                if self.with_view(|view| view.commit(ticket, courses)) {
                    debug!(view = ?ticket.view, count, "View loaded");
                } else {
                    debug!(view = ?ticket.view, "Discarding stale view load");
                }
            }
            Err(e) => {
                if self.with_view(|view| view.is_current(ticket)) {
                    self.report(&e, fallback);
                } else {
                    debug!(view = ?ticket.view, "Ignoring failure of stale view load: {}", e);
                }
            }
        }
    }

    //-------------------------------------------------------------------------------------
    // Notifications
    //-------------------------------------------------------------------------------------

    fn toast_ttl(&self) -> Duration {
        Duration::from_std(self.config.toast_duration)
            .unwrap_or_else(|_| Duration::milliseconds(crate::config::DEFAULT_TOAST_MS as i64))
    }

    pub fn notify_success(&self, message: &str) {
        info!("{}", message);
        let ttl = self.toast_ttl();
        self.with_view(|view| view.notify(ToastKind::Success, message, Utc::now(), ttl));
    }

    pub fn notify_error(&self, message: &str) {
        warn!("{}", message);
        let ttl = self.toast_ttl();
        self.with_view(|view| view.notify(ToastKind::Error, message, Utc::now(), ttl));
    }

    /// Shows a failed call to the user: the server's message if it sent one,
    /// else `fallback`.
    pub fn report(&self, err: &PortError, fallback: &str) {
        warn!("Request failed: {}", err);
        self.notify_error(err.user_message(fallback));
    }
}
