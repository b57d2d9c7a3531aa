//! Shared setup for the client integration tests: a mock course API and a
//! throwaway session file.

#![allow(dead_code)]

use client_lib::adapters::{FileSessionStore, HttpGateway};
use client_lib::app::{AdminDashboard, AppState, Storefront};
use client_lib::config::Config;
use coursify_core::domain::{App, Role, SessionToken};
use coursify_core::ports::{PortError, PortResult, SessionStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::MockServer;

pub struct Harness {
    pub server: MockServer,
    pub dir: TempDir,
    pub sessions: Arc<FileSessionStore>,
    pub config: Arc<Config>,
}

impl Harness {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    pub async fn start_with(tweak: impl FnOnce(&mut Config)) -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let mut config = Config::new(server.uri(), dir.path().join("session.json"));
        tweak(&mut config);
        let sessions = Arc::new(FileSessionStore::new(config.session_path.clone()));
        Self {
            server,
            dir,
            sessions,
            config: Arc::new(config),
        }
    }

    pub fn state(&self, app: App) -> AppState {
        self.state_with(app, self.sessions.clone())
    }

    /// App state backed by `sessions` instead of the session file.
    pub fn state_with(&self, app: App, sessions: Arc<dyn SessionStore>) -> AppState {
        let gateway = Arc::new(HttpGateway::new(self.config.api_base_url.clone(), None).unwrap());
        AppState::new(app, gateway, sessions, self.config.clone())
    }

    pub fn storefront(&self) -> Storefront {
        Storefront::new(self.state(App::Storefront))
    }

    pub fn storefront_with(&self, sessions: Arc<dyn SessionStore>) -> Storefront {
        Storefront::new(self.state_with(App::Storefront, sessions))
    }

    /// An admin dashboard whose delete prompt always answers `confirm`.
    pub fn admin(&self, confirm: bool) -> AdminDashboard {
        AdminDashboard::new(self.state(App::Admin), Arc::new(move |_: &str| confirm))
    }

    pub fn sign_in_as(&self, role: Role, token: &str) {
        self.sessions
            .set(role, SessionToken::new(token).unwrap())
            .unwrap();
    }

    pub fn stored_token(&self, role: Role) -> Option<String> {
        self.sessions
            .get(role)
            .unwrap()
            .map(|t| t.as_str().to_string())
    }
}

/// A store that reads as empty and refuses every write.
pub struct ReadOnlySessions;

impl SessionStore for ReadOnlySessions {
    fn get(&self, _role: Role) -> PortResult<Option<SessionToken>> {
        Ok(None)
    }

    fn set(&self, _role: Role, _token: SessionToken) -> PortResult<()> {
        Err(PortError::Storage("read-only file system".to_string()))
    }

    fn clear(&self, _role: Role) -> PortResult<()> {
        Ok(())
    }
}

pub fn course_json(id: &str, title: &str, price: f64) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": format!("All about {title}"),
        "imageUrl": format!("https://img.example/{id}.png"),
        "price": price,
    })
}
