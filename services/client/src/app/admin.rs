//! services/client/src/app/admin.rs
//!
//! The admin dashboard: sign-in/sign-up for course authors and CRUD over
//! their own courses.

use super::state::{AppState, SESSION_SAVE_FAILED};
use coursify_core::action::UiAction;
use coursify_core::domain::{App, CourseDraft, CourseId, Credentials, Role, SignupForm, View};
use coursify_core::generation::LoadTicket;
use coursify_core::modal::{AuthModal, Dismissal, DynamicModal, ModalId};
use coursify_core::password::validate_password;
use coursify_core::render::RenderResult;
use coursify_core::view::ViewState;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

const ROLE: Role = Role::Admin;

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this course? This action cannot be undone.";

/// Asks the operator to confirm a destructive action.
pub type Confirm = Arc<dyn Fn(&str) -> bool + Send + Sync>;

pub struct AdminDashboard {
    state: AppState,
    confirm: Confirm,
}

impl AdminDashboard {
    pub fn new(state: AppState, confirm: Confirm) -> Self {
        Self { state, confirm }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.snapshot()
    }

    pub fn render(&self) -> RenderResult {
        self.state.render()
    }

    //=====================================================================================
    // Auth State Controller
    //=====================================================================================

    /// Recomputes the UI mode from the admin token and loads the course list
    /// when signed in.
    pub async fn refresh(&self) {
        loop {
            let token = self.state.token(ROLE);
            let tickets = self.state.enter(App::Admin, token.as_ref());
            join_all(tickets.into_iter().map(|ticket| self.load(ticket))).await;
            if self.state.mode_matches_store(ROLE) {
                break;
            }
        }
    }

    async fn load(&self, ticket: LoadTicket) {
        if ticket.view != View::AdminCourses {
            debug!(view = ?ticket.view, "Admin dashboard has no such view");
            return;
        }
        let gateway = &self.state.gateway;
        let result = self
            .state
            .run_gated(ROLE, |token| async move { gateway.admin_courses(&token).await })
            .await;
        self.state.apply_load(ticket, result, "Error loading courses");
    }

    async fn reload_courses(&self) {
        let ticket = self.state.begin_load(View::AdminCourses);
        self.load(ticket).await;
    }

    async fn reconcile(&self) {
        if self.state.session_lost(ROLE) {
            self.refresh().await;
        }
    }

    //=====================================================================================
    // Authentication Gestures
    //=====================================================================================

    pub async fn sign_in(&self, credentials: Credentials) {
        let result = self
            .state
            .run(self.state.gateway.sign_in(ROLE, &credentials))
            .await;
        let token = match result {
            Ok(token) => token,
            Err(e) => return self.state.report(&e, "Invalid Credentials"),
        };
        if let Err(e) = self.state.store_token(ROLE, token) {
            return self.state.report(&e, SESSION_SAVE_FAILED);
        }
        info!("Admin signed in");
        self.state.with_view(|view| view.modals.close(ModalId::SignIn));
        self.refresh().await;
        self.state.notify_success("Successfully signed in!");
    }

    pub async fn sign_up(&self, form: SignupForm) {
        if let Err(violation) = validate_password(&form.password) {
            return self.state.notify_error(&violation.to_string());
        }
        let result = self.state.run(self.state.gateway.sign_up(ROLE, &form)).await;
        match result {
            Ok(()) => {
                self.state
                    .notify_success("Successfully signed up! Please sign in.");
                self.state.with_view(|view| {
                    view.modals.close(ModalId::SignUp);
                    view.modals.open(AuthModal::SignIn);
                });
            }
            Err(e) => self.state.report(&e, "Error signing up"),
        }
    }

    pub async fn logout(&self) {
        self.state.clear_token(ROLE);
        self.refresh().await;
        self.state.notify_success("Successfully logged out!");
    }

    //=====================================================================================
    // Course Gestures
    //=====================================================================================

    pub async fn create_course(&self, draft: CourseDraft) {
        let gateway = &self.state.gateway;
        let draft = &draft;
        let result = self
            .state
            .run_gated(ROLE, |token| async move {
                gateway.create_course(&token, draft).await
            })
            .await;
        match result {
            Ok(()) => {
                self.state.notify_success("Course created successfully!");
                self.reload_courses().await;
            }
            Err(e) => {
                self.state.report(&e, "Error creating course");
                self.reconcile().await;
            }
        }
    }

    /// Fetches one course and opens the prefilled edit overlay.
    pub async fn edit_course(&self, course_id: &CourseId) {
        let gateway = &self.state.gateway;
        let result = self
            .state
            .run_gated(ROLE, |token| async move {
                gateway.admin_course(&token, course_id).await
            })
            .await;
        match result {
            Ok(course) => self
                .state
                .with_view(|view| view.modals.show(DynamicModal::EditCourse(course))),
            Err(e) => {
                self.state.report(&e, "Error loading course details");
                self.reconcile().await;
            }
        }
    }

    /// Submits the edit overlay. On success the overlay is removed. Without
    /// an open edit overlay for this course there is no form to submit.
    pub async fn update_course(&self, course_id: &CourseId, draft: CourseDraft) {
        let editing = self.state.with_view(|view| {
            matches!(
                view.modals.dynamic(),
                Some(DynamicModal::EditCourse(course)) if &course.id == course_id
            )
        });
        if !editing {
            debug!(%course_id, "No edit overlay open for this course");
            return;
        }
        let gateway = &self.state.gateway;
        let draft = &draft;
        let result = self
            .state
            .run_gated(ROLE, |token| async move {
                gateway.update_course(&token, course_id, draft).await
            })
            .await;
        match result {
            Ok(()) => {
                self.state.notify_success("Course updated successfully!");
                self.state.with_view(|view| view.modals.close(ModalId::Dynamic));
                self.reload_courses().await;
            }
            Err(e) => {
                self.state.report(&e, "Error updating course");
                self.reconcile().await;
            }
        }
    }

    /// Deletes a course once the operator confirms.
    pub async fn delete_course(&self, course_id: &CourseId) {
        if !(self.confirm)(DELETE_PROMPT) {
            debug!(%course_id, "Delete not confirmed");
            return;
        }
        let gateway = &self.state.gateway;
        let result = self
            .state
            .run_gated(ROLE, |token| async move {
                gateway.delete_course(&token, course_id).await
            })
            .await;
        match result {
            Ok(()) => {
                self.state.notify_success("Course deleted successfully!");
                self.reload_courses().await;
            }
            Err(e) => {
                self.state.report(&e, "Error deleting course");
                self.reconcile().await;
            }
        }
    }

    pub fn dismiss(&self, modal: ModalId, how: Dismissal) {
        self.state.with_view(|view| view.modals.dismiss(modal, how));
    }

    /// Routes a delegated click to its gesture.
    pub async fn dispatch(&self, action: UiAction) {
        debug!(action = action.name(), "Dispatching admin action");
        match action {
            UiAction::OpenSignIn => self.state.with_view(|v| v.modals.open(AuthModal::SignIn)),
            UiAction::OpenSignUp => self.state.with_view(|v| v.modals.open(AuthModal::SignUp)),
            UiAction::SwitchToSignIn => self.state.with_view(|v| v.modals.switch_to_sign_in()),
            UiAction::SwitchToSignUp => self.state.with_view(|v| v.modals.switch_to_sign_up()),
            UiAction::Logout => self.logout().await,
            UiAction::Edit(id) => self.edit_course(&id).await,
            UiAction::Delete(id) => self.delete_course(&id).await,
            UiAction::GetStarted | UiAction::ShowDetails(_) | UiAction::Purchase(_) => {
                debug!("Ignoring storefront action on the admin dashboard");
            }
        }
    }
}
