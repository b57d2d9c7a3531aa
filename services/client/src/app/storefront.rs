//! services/client/src/app/storefront.rs
//!
//! The user-facing storefront: landing page, sign-in/sign-up, course
//! details, purchases and the purchased-course dashboard.

use super::state::{AppState, SESSION_SAVE_FAILED};
use coursify_core::action::UiAction;
use coursify_core::domain::{App, CourseId, Credentials, Role, SignupForm, View};
use coursify_core::generation::LoadTicket;
use coursify_core::modal::{AuthModal, Dismissal, DynamicModal, ModalId};
use coursify_core::password::validate_password;
use coursify_core::render::RenderResult;
use coursify_core::view::ViewState;
use futures::future::join_all;
use tracing::{debug, info};

const ROLE: Role = Role::User;

pub struct Storefront {
    state: AppState,
}

impl Storefront {
    pub fn new(state: AppState) -> Self {
        Self { state }
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

    /// Recomputes the UI mode from the session store and runs that mode's
    /// loaders once each. Repeats if a load cleared the session meanwhile;
    /// tokens are only ever removed here, so this settles after one repeat.
    pub async fn refresh(&self) {
        loop {
            let token = self.state.token(ROLE);
            let tickets = self.state.enter(App::Storefront, token.as_ref());
            join_all(tickets.into_iter().map(|ticket| self.load(ticket))).await;
            if self.state.mode_matches_store(ROLE) {
                break;
            }
        }
    }

    async fn load(&self, ticket: LoadTicket) {
        let gateway = &self.state.gateway;
        let (result, fallback) = match ticket.view {
            View::Featured => (
                self.state.run(gateway.preview_courses()).await,
                "Error loading courses",
            ),
            View::Available => (
                self.state.run(gateway.preview_courses()).await,
                "Error loading available courses",
            ),
            View::Purchased => (
                self.state
                    .run_gated(ROLE, |token| async move {
                        gateway.purchased_courses(&token).await
                    })
                    .await,
                "Error loading purchased courses",
            ),
            View::AdminCourses => {
                debug!("Storefront has no admin course view");
                return;
            }
        };
        self.state.apply_load(ticket, result, fallback);
    }

    /// Re-runs the controller if a failed call cleared the session.
    async fn reconcile(&self) {
        if self.state.session_lost(ROLE) {
            self.refresh().await;
        }
    }

    //=====================================================================================
    // Gestures
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
        info!("User signed in");
        self.state.with_view(|view| view.modals.close(ModalId::SignIn));
        self.refresh().await;
        self.state.notify_success("Successfully signed in!");
    }

    /// Validates the password locally first; a violation blocks the request.
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

    pub async fn purchase(&self, course_id: &CourseId) {
        let gateway = &self.state.gateway;
        let result = self
            .state
            .run_gated(ROLE, |token| async move {
                gateway.purchase_course(&token, course_id).await
            })
            .await;
        match result {
            Ok(()) => {
                self.state.notify_success("Course purchased successfully!");
                let purchased = self.state.begin_load(View::Purchased);
                let available = self.state.begin_load(View::Available);
                futures::join!(self.load(purchased), self.load(available));
            }
            Err(e) => {
                self.state.report(&e, "Error purchasing course");
                self.reconcile().await;
            }
        }
    }

    /// Opens the detail overlay for a course from the public catalogue.
    pub async fn show_course_details(&self, course_id: &CourseId) {
        let result = self.state.run(self.state.gateway.preview_courses()).await;
        match result {
            Ok(courses) => match courses.into_iter().find(|c| &c.id == course_id) {
                Some(course) => self
                    .state
                    .with_view(|view| view.modals.show(DynamicModal::CourseDetail(course))),
                None => self.state.notify_error("Course not found"),
            },
            Err(e) => self.state.report(&e, "Error loading course details"),
        }
    }

    /// Signed in: jump to the available courses. Otherwise invite to sign up.
    pub fn get_started(&self) {
        if self.state.token(ROLE).is_some() {
            self.state.with_view(|view| view.focus(View::Available));
        } else {
            self.state
                .with_view(|view| view.modals.open_sign_up_with_welcome());
        }
    }

    pub fn dismiss(&self, modal: ModalId, how: Dismissal) {
        self.state.with_view(|view| view.modals.dismiss(modal, how));
    }

    /// Routes a delegated click to its gesture.
    pub async fn dispatch(&self, action: UiAction) {
        debug!(action = action.name(), "Dispatching storefront action");
        match action {
            UiAction::OpenSignIn => self.state.with_view(|v| v.modals.open(AuthModal::SignIn)),
            UiAction::OpenSignUp => self.state.with_view(|v| v.modals.open(AuthModal::SignUp)),
            UiAction::SwitchToSignIn => self.state.with_view(|v| v.modals.switch_to_sign_in()),
            UiAction::SwitchToSignUp => self.state.with_view(|v| v.modals.switch_to_sign_up()),
            UiAction::Logout => self.logout().await,
            UiAction::GetStarted => self.get_started(),
            UiAction::ShowDetails(id) => self.show_course_details(&id).await,
            UiAction::Purchase(id) => self.purchase(&id).await,
            UiAction::Edit(_) | UiAction::Delete(_) => {
                debug!("Ignoring admin action on the storefront");
            }
        }
    }
}
