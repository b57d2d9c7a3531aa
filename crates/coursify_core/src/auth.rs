//! crates/coursify_core/src/auth.rs
//!
//! The authorization state machine shared by both applications.
//!
//! The UI mode is never stored on its own: it is recomputed from the role's
//! session token every time the controller runs. Region visibility is a pure
//! projection of the mode, so the anonymous and authenticated regions can
//! never be visible (or hidden) together.

use crate::domain::{App, SessionToken, View};

/// The two states of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Anonymous,
    Authenticated,
}

impl UiMode {
    pub fn for_token(token: Option<&SessionToken>) -> Self {
        match token {
            Some(_) => UiMode::Authenticated,
            None => UiMode::Anonymous,
        }
    }
}

/// A top-level page subtree toggled wholesale with the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Anonymous,
    Authenticated,
}

impl Region {
    /// DOM id of the region in the given application.
    pub fn element_id(self, app: App) -> &'static str {
        match (app, self) {
            (App::Storefront, Region::Anonymous) => "landingContent",
            (App::Storefront, Region::Authenticated) => "dashboardContent",
            (App::Admin, Region::Anonymous) => "adminWelcome",
            (App::Admin, Region::Authenticated) => "adminContent",
        }
    }
}

/// The single region shown for a mode.
pub fn visible_region(mode: UiMode) -> Region {
    match mode {
        UiMode::Anonymous => Region::Anonymous,
        UiMode::Authenticated => Region::Authenticated,
    }
}

/// Data loaders an application runs on entering a mode, each exactly once.
pub fn loaders(app: App, mode: UiMode) -> &'static [View] {
    match (app, mode) {
        (App::Storefront, UiMode::Anonymous) => &[View::Featured],
        (App::Storefront, UiMode::Authenticated) => &[View::Purchased, View::Available],
        (App::Admin, UiMode::Anonymous) => &[],
        (App::Admin, UiMode::Authenticated) => &[View::AdminCourses],
    }
}

/// Everything the controller must do on entering a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeEntry {
    pub mode: UiMode,
    pub region: Region,
    pub loaders: &'static [View],
}

/// Computes the mode entry for an application given the stored token.
pub fn enter(app: App, token: Option<&SessionToken>) -> ModeEntry {
    let mode = UiMode::for_token(token);
    ModeEntry {
        mode,
        region: visible_region(mode),
        loaders: loaders(app, mode),
    }
}
