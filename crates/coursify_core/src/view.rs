//! crates/coursify_core/src/view.rs
//!
//! The explicit UI state of one application. Controllers mutate it; the
//! renderer projects it to markup. Region visibility is derived from the
//! mode and never toggled directly.

use crate::auth::{visible_region, ModeEntry, Region, UiMode};
use crate::domain::{App, Course, View};
use crate::generation::{LoadGenerations, LoadTicket};
use crate::modal::ModalController;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// A transient notification. Only the latest one is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    app: App,
    mode: UiMode,
    views: BTreeMap<View, Vec<Course>>,
    generations: LoadGenerations,
    pub modals: ModalController,
    toast: Option<Toast>,
    loading_depth: usize,
    focus: Option<View>,
}

impl ViewState {
    /// A fresh page, before the controller has looked at the session store.
    pub fn new(app: App) -> Self {
        Self {
            app,
            mode: UiMode::Anonymous,
            views: BTreeMap::new(),
            generations: LoadGenerations::new(),
            modals: ModalController::new(),
            toast: None,
            loading_depth: 0,
            focus: None,
        }
    }

    pub fn app(&self) -> App {
        self.app
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn visible_region(&self) -> Region {
        visible_region(self.mode)
    }

    pub fn is_region_visible(&self, region: Region) -> bool {
        self.visible_region() == region
    }

    //-------------------------------------------------------------------------------------
    // Mode transitions and loads
    //-------------------------------------------------------------------------------------

    /// Applies a mode entry: drops content from the previous mode, makes
    /// every in-flight load stale and returns one ticket per loader.
    pub fn enter_mode(&mut self, entry: &ModeEntry) -> Vec<LoadTicket> {
        self.mode = entry.mode;
        self.views.clear();
        self.focus = None;
        self.generations.invalidate_all();
        entry
            .loaders
            .iter()
            .map(|view| self.generations.begin(*view))
            .collect()
    }

    /// Starts a reload of one view outside a mode transition.
    pub fn begin_load(&mut self, view: View) -> LoadTicket {
        self.generations.begin(view)
    }

    /// Replaces the view's content if the ticket is still current.
    /// Returns false when the response was stale and discarded.
    pub fn commit(&mut self, ticket: LoadTicket, courses: Vec<Course>) -> bool {
        if !self.generations.is_current(ticket) {
            return false;
        }
        self.views.insert(ticket.view, courses);
        true
    }

    /// Whether a load started with `ticket` may still report its outcome.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generations.is_current(ticket)
    }

    pub fn courses(&self, view: View) -> Option<&[Course]> {
        self.views.get(&view).map(Vec::as_slice)
    }

    //-------------------------------------------------------------------------------------
    // Notification and loading surfaces
    //-------------------------------------------------------------------------------------

    pub fn notify(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            expires_at: now + ttl,
        });
    }

    /// The toast still on screen at `now`, if any.
    pub fn toast_at(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.toast.as_ref().filter(|toast| now < toast.expires_at)
    }

    /// The most recent toast regardless of expiry.
    pub fn last_toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn begin_loading(&mut self) {
        self.loading_depth += 1;
    }

    pub fn end_loading(&mut self) {
        self.loading_depth = self.loading_depth.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.loading_depth > 0
    }

    pub fn loading_depth(&self) -> usize {
        self.loading_depth
    }

    pub fn focus(&mut self, view: View) {
        self.focus = Some(view);
    }

    pub fn focused(&self) -> Option<View> {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::enter;
    use crate::domain::{CourseId, SessionToken};

    fn course(id: &str) -> Course {
        Course {
            id: CourseId::new(id),
            title: id.to_uppercase(),
            description: String::new(),
            image_url: String::new(),
            price: 1.0,
        }
    }

    #[test]
    fn exactly_one_region_is_visible_in_every_mode() {
        let token = SessionToken::new("t").unwrap();
        for app in [App::Storefront, App::Admin] {
            for stored in [None, Some(&token)] {
                let mut state = ViewState::new(app);
                state.enter_mode(&enter(app, stored));
                let visible = [Region::Anonymous, Region::Authenticated]
                    .into_iter()
                    .filter(|r| state.is_region_visible(*r))
                    .count();
                assert_eq!(visible, 1);
            }
        }
    }

    #[test]
    fn entering_a_mode_returns_one_ticket_per_loader() {
        let token = SessionToken::new("t").unwrap();
        let mut state = ViewState::new(App::Storefront);
        let tickets = state.enter_mode(&enter(App::Storefront, Some(&token)));
        let views: Vec<View> = tickets.iter().map(|t| t.view).collect();
        assert_eq!(views, vec![View::Purchased, View::Available]);
    }

    #[test]
    fn logout_discards_in_flight_dashboard_loads() {
        let token = SessionToken::new("t").unwrap();
        let mut state = ViewState::new(App::Storefront);
        let tickets = state.enter_mode(&enter(App::Storefront, Some(&token)));
        state.enter_mode(&enter(App::Storefront, None));

        assert!(!state.commit(tickets[0], vec![course("late")]));
        assert!(state.courses(View::Purchased).is_none());
        assert_eq!(state.mode(), UiMode::Anonymous);
    }

    #[test]
    fn older_reload_cannot_overwrite_newer_one() {
        let mut state = ViewState::new(App::Admin);
        let slow = state.begin_load(View::AdminCourses);
        let fast = state.begin_load(View::AdminCourses);
        assert!(state.commit(fast, vec![course("new")]));
        assert!(!state.commit(slow, vec![course("old")]));
        assert_eq!(state.courses(View::AdminCourses).unwrap()[0].id.as_str(), "new");
    }

    #[test]
    fn toast_expires_after_its_ttl() {
        let mut state = ViewState::new(App::Storefront);
        let now = Utc::now();
        state.notify(ToastKind::Error, "boom", now, Duration::milliseconds(3000));
        assert!(state.toast_at(now + Duration::milliseconds(2999)).is_some());
        assert!(state.toast_at(now + Duration::milliseconds(3000)).is_none());
        assert_eq!(state.last_toast().unwrap().message, "boom");
    }

    #[test]
    fn loading_depth_never_goes_negative() {
        let mut state = ViewState::new(App::Storefront);
        state.begin_loading();
        state.begin_loading();
        state.end_loading();
        assert!(state.is_loading());
        state.end_loading();
        state.end_loading();
        assert!(!state.is_loading());
        assert_eq!(state.loading_depth(), 0);
    }
}
