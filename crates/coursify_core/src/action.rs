//! crates/coursify_core/src/action.rs
//!
//! Delegated UI actions. Rendered markup never names handler functions;
//! triggers carry `data-action` (and `data-course-id` where relevant) and a
//! single dispatcher maps them back to an `UiAction`.

use crate::domain::CourseId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    OpenSignIn,
    OpenSignUp,
    SwitchToSignIn,
    SwitchToSignUp,
    Logout,
    GetStarted,
    ShowDetails(CourseId),
    Purchase(CourseId),
    Edit(CourseId),
    Delete(CourseId),
}

impl UiAction {
    /// Parses a trigger's `data-action` and optional `data-course-id`.
    /// Course actions without an id are rejected.
    pub fn from_attributes(action: &str, course_id: Option<&str>) -> Option<Self> {
        let id = || {
            course_id
                .filter(|id| !id.is_empty())
                .map(CourseId::new)
        };
        match action {
            "signin" => Some(UiAction::OpenSignIn),
            "signup" => Some(UiAction::OpenSignUp),
            "switch-signin" => Some(UiAction::SwitchToSignIn),
            "switch-signup" => Some(UiAction::SwitchToSignUp),
            "logout" => Some(UiAction::Logout),
            "get-started" => Some(UiAction::GetStarted),
            "details" => id().map(UiAction::ShowDetails),
            "purchase" => id().map(UiAction::Purchase),
            "edit" => id().map(UiAction::Edit),
            "delete" => id().map(UiAction::Delete),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UiAction::OpenSignIn => "signin",
            UiAction::OpenSignUp => "signup",
            UiAction::SwitchToSignIn => "switch-signin",
            UiAction::SwitchToSignUp => "switch-signup",
            UiAction::Logout => "logout",
            UiAction::GetStarted => "get-started",
            UiAction::ShowDetails(_) => "details",
            UiAction::Purchase(_) => "purchase",
            UiAction::Edit(_) => "edit",
            UiAction::Delete(_) => "delete",
        }
    }

    pub fn course_id(&self) -> Option<&CourseId> {
        match self {
            UiAction::ShowDetails(id)
            | UiAction::Purchase(id)
            | UiAction::Edit(id)
            | UiAction::Delete(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_actions_need_an_id() {
        assert_eq!(UiAction::from_attributes("purchase", None), None);
        assert_eq!(UiAction::from_attributes("purchase", Some("")), None);
        assert_eq!(
            UiAction::from_attributes("purchase", Some("c9")),
            Some(UiAction::Purchase(CourseId::new("c9")))
        );
    }

    #[test]
    fn unknown_actions_are_ignored() {
        assert_eq!(UiAction::from_attributes("explode", Some("c1")), None);
    }

    #[test]
    fn plain_actions_ignore_the_id() {
        assert_eq!(
            UiAction::from_attributes("logout", Some("c1")),
            Some(UiAction::Logout)
        );
        assert_eq!(UiAction::Logout.course_id(), None);
    }
}
