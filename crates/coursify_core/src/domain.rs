//! crates/coursify_core/src/domain.rs
//!
//! Defines the pure, core data structures shared by the storefront and the
//! admin dashboard. The course payloads mirror the remote API's JSON shape.

use serde::{Deserialize, Serialize};
use std::fmt;

//=========================================================================================
// Roles and Session Tokens
//=========================================================================================

/// The two independent roles, each with its own persisted credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// The key the role's token is persisted under.
    pub fn storage_key(self) -> &'static str {
        match self {
            Role::User => "token",
            Role::Admin => "adminToken",
        }
    }

    /// Path segment used by the sign-in and sign-up endpoints.
    pub fn path_segment(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// An opaque credential proving a prior successful sign-in for one role.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token. Empty strings are not tokens.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens end up in logs through `Debug`; keep them out.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

//=========================================================================================
// Courses
//=========================================================================================

/// Identifier of a course, as issued by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A course as returned by the API. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    pub price: f64,
}

/// The editable fields of a course, sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub price: f64,
}

impl From<&Course> for CourseDraft {
    fn from(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
            image_url: course.image_url.clone(),
            price: course.price,
        }
    }
}

//=========================================================================================
// Forms
//=========================================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up payload. Built through `SignupForm::new`, which trims every field
/// except the password.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn new(first_name: &str, last_name: &str, email: &str, password: &str) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }
}

//=========================================================================================
// Presentation Vocabulary
//=========================================================================================

/// Which of the two client applications is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum App {
    Storefront,
    Admin,
}

impl App {
    pub fn role(self) -> Role {
        match self {
            App::Storefront => Role::User,
            App::Admin => Role::Admin,
        }
    }
}

/// A list target on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum View {
    Featured,
    Purchased,
    Available,
    AdminCourses,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Featured,
        View::Purchased,
        View::Available,
        View::AdminCourses,
    ];

    /// DOM id of the container the view renders into.
    pub fn element_id(self) -> &'static str {
        match self {
            View::Featured => "coursesGrid",
            View::Purchased => "purchasedCourses",
            View::Available => "availableCourses",
            View::AdminCourses => "adminCourses",
        }
    }
}
