//! crates/coursify_core/src/modal.rs
//!
//! Overlay dialogs. Sign-in and sign-up are fixed overlays toggled between
//! visible and hidden. Course details and course editing are created on
//! demand and removed entirely when dismissed.

use crate::domain::Course;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalId {
    SignIn,
    SignUp,
    /// Whatever dynamic overlay currently exists.
    Dynamic,
}

impl ModalId {
    pub const fn element_id(self) -> &'static str {
        match self {
            ModalId::SignIn => "signinModal",
            ModalId::SignUp => "signupModal",
            ModalId::Dynamic => "dynamicModal",
        }
    }
}

/// The fixed overlays, the only ones that can be opened by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthModal {
    SignIn,
    SignUp,
}

impl From<AuthModal> for ModalId {
    fn from(modal: AuthModal) -> Self {
        match modal {
            AuthModal::SignIn => ModalId::SignIn,
            AuthModal::SignUp => ModalId::SignUp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DynamicModal {
    CourseDetail(Course),
    EditCourse(Course),
}

/// How the user dismissed an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    Backdrop,
    CloseGlyph,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalController {
    sign_in: bool,
    sign_up: bool,
    welcome_banner: bool,
    dynamic: Option<DynamicModal>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dynamic overlays are created through `show` instead.
    pub fn open(&mut self, modal: AuthModal) {
        match modal {
            AuthModal::SignIn => self.sign_in = true,
            AuthModal::SignUp => self.sign_up = true,
        }
    }

    /// Opens sign-up with the welcome banner on top of the form.
    pub fn open_sign_up_with_welcome(&mut self) {
        self.sign_up = true;
        self.welcome_banner = true;
    }

    /// Creates a dynamic overlay, replacing any existing one.
    pub fn show(&mut self, modal: DynamicModal) {
        self.dynamic = Some(modal);
    }

    pub fn close(&mut self, modal: ModalId) {
        match modal {
            ModalId::SignIn => self.sign_in = false,
            ModalId::SignUp => {
                self.sign_up = false;
                self.welcome_banner = false;
            }
            ModalId::Dynamic => self.dynamic = None,
        }
    }

    /// A backdrop click closes only the clicked overlay. The close glyph on a
    /// fixed overlay closes both fixed overlays.
    pub fn dismiss(&mut self, modal: ModalId, how: Dismissal) {
        match (modal, how) {
            (ModalId::Dynamic, _) | (_, Dismissal::Backdrop) => self.close(modal),
            (_, Dismissal::CloseGlyph) => {
                self.close(ModalId::SignIn);
                self.close(ModalId::SignUp);
            }
        }
    }

    pub fn switch_to_sign_up(&mut self) {
        self.close(ModalId::SignIn);
        self.open(AuthModal::SignUp);
    }

    pub fn switch_to_sign_in(&mut self) {
        self.close(ModalId::SignUp);
        self.open(AuthModal::SignIn);
    }

    pub fn is_open(&self, modal: ModalId) -> bool {
        match modal {
            ModalId::SignIn => self.sign_in,
            ModalId::SignUp => self.sign_up,
            ModalId::Dynamic => self.dynamic.is_some(),
        }
    }

    pub fn welcome_banner(&self) -> bool {
        self.welcome_banner
    }

    pub fn dynamic(&self) -> Option<&DynamicModal> {
        self.dynamic.as_ref()
    }
}
