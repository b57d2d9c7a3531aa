pub mod action;
pub mod auth;
pub mod domain;
pub mod generation;
pub mod modal;
pub mod password;
pub mod ports;
pub mod render;
pub mod session;
pub mod view;

pub use action::UiAction;
pub use auth::{ModeEntry, Region, UiMode};
pub use domain::{App, Course, CourseDraft, CourseId, Credentials, Role, SessionToken, SignupForm, View};
pub use modal::{AuthModal, Dismissal, DynamicModal, ModalController, ModalId};
pub use password::{validate_password, PasswordViolation};
pub use ports::{CourseGateway, PortError, PortResult, SessionStore};
pub use render::{RenderError, RenderResult};
pub use session::MemorySessionStore;
pub use view::{Toast, ToastKind, ViewState};
