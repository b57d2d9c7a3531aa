//! crates/coursify_core/src/render.rs
//!
//! Pure renderers from state to HTML markup, backed by the minijinja
//! templates under `templates/`.
//!
//! Every render fully replaces its target; there is no diffing. Triggers are
//! plain elements carrying `data-action` and `data-course-id`, to be routed
//! through `UiAction::from_attributes` by a single delegated listener. All
//! templates are HTML auto-escaped, so text coming from the API is inert.

use crate::action::UiAction;
use crate::auth::{Region, UiMode};
use crate::domain::{App, Course, View};
use crate::modal::{DynamicModal, ModalId};
use crate::view::ViewState;
use chrono::{DateTime, Utc};
use minijinja::{context, AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::sync::OnceLock;

pub use minijinja::Error as RenderError;

pub type RenderResult = Result<String, RenderError>;

//=========================================================================================
// Template Environment
//=========================================================================================

const TEMPLATES: &[(&str, &str)] = &[
    ("macros.html", include_str!("../templates/macros.html")),
    ("course_list.html", include_str!("../templates/course_list.html")),
    ("nav.html", include_str!("../templates/nav.html")),
    ("signin_modal.html", include_str!("../templates/signin_modal.html")),
    ("signup_modal.html", include_str!("../templates/signup_modal.html")),
    ("course_detail.html", include_str!("../templates/course_detail.html")),
    ("edit_course.html", include_str!("../templates/edit_course.html")),
    ("page.html", include_str!("../templates/page.html")),
];

/// The shared environment. Templates compile on first use, so a broken
/// template surfaces as a `RenderError` from the render that needs it.
fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_loader(|name| {
            Ok(TEMPLATES
                .iter()
                .find(|(known, _)| *known == name)
                .map(|(_, source)| source.to_string()))
        });
        env
    })
}

fn render_template<S: Serialize>(name: &str, ctx: S) -> RenderResult {
    environment().get_template(name)?.render(ctx)
}

//=========================================================================================
// Template Contexts
//=========================================================================================

pub fn format_price(price: f64) -> String {
    format!("₹{price}")
}

/// Text shown instead of an empty list.
pub fn placeholder(view: View) -> &'static str {
    match view {
        View::Featured | View::Available => "No courses available at the moment.",
        View::Purchased => "You haven't purchased any courses yet.",
        View::AdminCourses => "You haven't created any courses yet.",
    }
}

/// Names of the triggers that carry no course id.
#[derive(Serialize)]
struct Actions {
    signin: &'static str,
    signup: &'static str,
    switch_signin: &'static str,
    switch_signup: &'static str,
    logout: &'static str,
    get_started: &'static str,
}

impl Actions {
    fn new() -> Self {
        Self {
            signin: UiAction::OpenSignIn.name(),
            signup: UiAction::OpenSignUp.name(),
            switch_signin: UiAction::SwitchToSignIn.name(),
            switch_signup: UiAction::SwitchToSignUp.name(),
            logout: UiAction::Logout.name(),
            get_started: UiAction::GetStarted.name(),
        }
    }
}

#[derive(Serialize)]
struct ModalIds {
    signin: &'static str,
    signup: &'static str,
    dynamic: &'static str,
}

const MODAL_IDS: ModalIds = ModalIds {
    signin: ModalId::SignIn.element_id(),
    signup: ModalId::SignUp.element_id(),
    dynamic: ModalId::Dynamic.element_id(),
};

#[derive(Serialize)]
struct CardButton {
    label: &'static str,
    class: &'static str,
    /// `None` for a static button that routes nowhere.
    action: Option<&'static str>,
}

#[derive(Serialize)]
struct CourseCard<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    image_url: &'a str,
    price: String,
    /// Admin cards wrap their buttons in a `course-actions` row.
    grouped: bool,
    buttons: Vec<CardButton>,
}

impl<'a> CourseCard<'a> {
    fn new(view: View, course: &'a Course) -> Self {
        let button = |label, class, action: Option<UiAction>| CardButton {
            label,
            class,
            action: action.map(|a| a.name()),
        };
        let id = || course.id.clone();
        let buttons = match view {
            View::Featured => vec![button(
                "Learn More",
                "btn-primary",
                Some(UiAction::ShowDetails(id())),
            )],
            View::Purchased => vec![button("Start Learning", "btn-secondary", None)],
            View::Available => vec![button(
                "Purchase",
                "btn-primary",
                Some(UiAction::Purchase(id())),
            )],
            View::AdminCourses => vec![
                button("Edit", "btn-secondary", Some(UiAction::Edit(id()))),
                button("Delete", "btn-danger", Some(UiAction::Delete(id()))),
            ],
        };
        Self {
            id: course.id.as_str(),
            title: &course.title,
            description: &course.description,
            image_url: &course.image_url,
            price: format_price(course.price),
            grouped: view == View::AdminCourses,
            buttons,
        }
    }
}

#[derive(Serialize)]
struct CourseList<'a> {
    placeholder: &'static str,
    cards: Vec<CourseCard<'a>>,
}

impl<'a> CourseList<'a> {
    fn new(view: View, courses: &'a [Course]) -> Self {
        Self {
            placeholder: placeholder(view),
            cards: courses.iter().map(|c| CourseCard::new(view, c)).collect(),
        }
    }
}

/// A list target on the page. `list` is `None` until the view first loads.
#[derive(Serialize)]
struct ListContainer<'a> {
    id: &'static str,
    focused: bool,
    list: Option<CourseList<'a>>,
}

impl<'a> ListContainer<'a> {
    fn new(state: &'a ViewState, view: View) -> Self {
        Self {
            id: view.element_id(),
            focused: state.focused() == Some(view),
            list: state.courses(view).map(|courses| CourseList::new(view, courses)),
        }
    }
}

#[derive(Serialize)]
struct Views<'a> {
    featured: ListContainer<'a>,
    purchased: ListContainer<'a>,
    available: ListContainer<'a>,
    admin_courses: ListContainer<'a>,
}

#[derive(Serialize)]
struct Regions {
    anonymous: &'static str,
    anonymous_visible: bool,
    authenticated: &'static str,
    authenticated_visible: bool,
}

/// A single course shown in the detail or edit overlay.
#[derive(Serialize)]
struct CourseOverlay<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    image_url: &'a str,
    price: String,
    /// The bare number, for the edit form's price input.
    amount: String,
    purchase_action: &'static str,
}

impl<'a> CourseOverlay<'a> {
    fn new(course: &'a Course) -> Self {
        Self {
            id: course.id.as_str(),
            title: &course.title,
            description: &course.description,
            image_url: &course.image_url,
            price: format_price(course.price),
            amount: course.price.to_string(),
            purchase_action: UiAction::Purchase(course.id.clone()).name(),
        }
    }
}

fn app_name(app: App) -> &'static str {
    match app {
        App::Storefront => "storefront",
        App::Admin => "admin",
    }
}

//=========================================================================================
// Renderers
//=========================================================================================

/// Renders a course collection for a view: one card per course, or the
/// view's placeholder when the collection is empty.
pub fn render_list(view: View, courses: &[Course]) -> RenderResult {
    render_template(
        "course_list.html",
        context! { list => CourseList::new(view, courses) },
    )
}

pub fn render_nav(app: App, mode: UiMode) -> RenderResult {
    render_template(
        "nav.html",
        context! {
            app => app_name(app),
            signed_in => mode == UiMode::Authenticated,
            actions => Actions::new(),
        },
    )
}

pub fn render_course_detail(course: &Course) -> RenderResult {
    render_template(
        "course_detail.html",
        context! { modal_ids => MODAL_IDS, detail => CourseOverlay::new(course) },
    )
}

/// The edit overlay, prefilled with the course's current values.
pub fn render_edit_course(course: &Course) -> RenderResult {
    render_template(
        "edit_course.html",
        context! { modal_ids => MODAL_IDS, edit => CourseOverlay::new(course) },
    )
}

/// Renders the whole page for `state` as seen at `now`.
pub fn render_page(state: &ViewState, now: DateTime<Utc>) -> RenderResult {
    let app = state.app();
    let (detail, edit) = match state.modals.dynamic() {
        Some(DynamicModal::CourseDetail(course)) => (Some(CourseOverlay::new(course)), None),
        Some(DynamicModal::EditCourse(course)) => (None, Some(CourseOverlay::new(course))),
        None => (None, None),
    };
    let toast = state.toast_at(now).map(|toast| {
        context! { kind => toast.kind.css_class(), message => toast.message.as_str() }
    });

    render_template(
        "page.html",
        context! {
            app => app_name(app),
            signed_in => state.mode() == UiMode::Authenticated,
            actions => Actions::new(),
            modal_ids => MODAL_IDS,
            regions => Regions {
                anonymous: Region::Anonymous.element_id(app),
                anonymous_visible: state.is_region_visible(Region::Anonymous),
                authenticated: Region::Authenticated.element_id(app),
                authenticated_visible: state.is_region_visible(Region::Authenticated),
            },
            views => Views {
                featured: ListContainer::new(state, View::Featured),
                purchased: ListContainer::new(state, View::Purchased),
                available: ListContainer::new(state, View::Available),
                admin_courses: ListContainer::new(state, View::AdminCourses),
            },
            signin_open => state.modals.is_open(ModalId::SignIn),
            signup_open => state.modals.is_open(ModalId::SignUp),
            welcome => state.modals.welcome_banner(),
            detail => detail,
            edit => edit,
            toast => toast,
            loading => state.is_loading(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::enter;
    use crate::domain::{CourseId, SessionToken};
    use crate::modal::AuthModal;
    use crate::view::ToastKind;
    use chrono::Duration;

    fn course(id: &str, title: &str) -> Course {
        Course {
            id: CourseId::new(id),
            title: title.to_string(),
            description: "Learn it".to_string(),
            image_url: "https://img.example/c.png".to_string(),
            price: 499.0,
        }
    }

    #[test]
    fn every_template_compiles() {
        for (name, _) in TEMPLATES {
            assert!(environment().get_template(name).is_ok(), "{name} failed");
        }
    }

    #[test]
    fn empty_collection_renders_the_placeholder() {
        for view in View::ALL {
            let markup = render_list(view, &[]).unwrap();
            assert!(markup.contains(r#"class="no-courses""#));
            assert!(markup.contains(placeholder(view)));
            assert!(!markup.contains("course-card"));
        }
    }

    #[test]
    fn one_card_per_course_with_its_id_in_the_triggers() {
        let courses = vec![course("a1", "Rust"), course("b2", "Go")];
        let markup = render_list(View::Available, &courses).unwrap();
        assert_eq!(markup.matches(r#"class="course-card""#).count(), 2);
        assert!(markup.contains(r#"data-action="purchase" data-course-id="a1""#));
        assert!(markup.contains(r#"data-action="purchase" data-course-id="b2""#));
        assert!(markup.contains("₹499"));
    }

    #[test]
    fn admin_cards_carry_edit_and_delete_triggers() {
        let markup = render_list(View::AdminCourses, &[course("x", "Rust")]).unwrap();
        assert!(markup.contains(r#"<div class="course-actions">"#));
        assert!(markup.contains(r#"data-action="edit" data-course-id="x""#));
        assert!(markup.contains(r#"data-action="delete" data-course-id="x""#));
    }

    #[test]
    fn featured_cards_open_details_and_purchased_cards_have_no_trigger() {
        let featured = render_list(View::Featured, &[course("f", "Rust")]).unwrap();
        assert!(featured.contains(r#"data-action="details" data-course-id="f""#));
        let purchased = render_list(View::Purchased, &[course("p", "Rust")]).unwrap();
        assert!(!purchased.contains("data-action"));
        assert!(purchased.contains("Start Learning"));
    }

    #[test]
    fn api_text_is_escaped() {
        let markup =
            render_list(View::Featured, &[course("i\"d", "<script>x</script>")]).unwrap();
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;"));
        assert!(markup.contains(r#"data-course-id="i&quot;d""#));
    }

    #[test]
    fn fractional_prices_keep_their_decimals() {
        assert_eq!(format_price(49.5), "₹49.5");
        assert_eq!(format_price(1200.0), "₹1200");
    }

    #[test]
    fn nav_follows_app_and_mode() {
        let anon = render_nav(App::Storefront, UiMode::Anonymous).unwrap();
        assert!(anon.contains(r#"id="signinBtn" class="btn-primary" data-action="signin""#));
        assert!(anon.contains("admin.html"));

        let admin = render_nav(App::Admin, UiMode::Authenticated).unwrap();
        assert!(admin.contains(r#"data-action="logout""#));
        assert!(!admin.contains("admin.html"));
        assert!(!admin.contains("signinBtn"));
    }

    #[test]
    fn page_hides_exactly_one_region() {
        let token = SessionToken::new("t").unwrap();
        let mut state = ViewState::new(App::Storefront);
        state.enter_mode(&enter(App::Storefront, Some(&token)));
        let page = render_page(&state, Utc::now()).unwrap();
        assert!(page.contains(r#"<section id="landingContent" hidden>"#));
        assert!(page.contains(r#"<section id="dashboardContent">"#));
        assert!(page.contains("Logout"));
        assert!(!page.contains("signinBtn"));
    }

    #[test]
    fn admin_page_when_anonymous_shows_welcome() {
        let mut state = ViewState::new(App::Admin);
        state.enter_mode(&enter(App::Admin, None));
        let page = render_page(&state, Utc::now()).unwrap();
        assert!(page.contains(r#"<section id="adminWelcome">"#));
        assert!(page.contains(r#"<section id="adminContent" hidden>"#));
    }

    #[test]
    fn page_shows_live_toast_and_spinner() {
        let mut state = ViewState::new(App::Storefront);
        let now = Utc::now();
        state.notify(ToastKind::Error, "Already purchased", now, Duration::seconds(3));
        state.begin_loading();
        let page = render_page(&state, now).unwrap();
        assert!(page.contains(r#"<div id="toast" class="toast error">Already purchased</div>"#));
        assert!(page.contains(r#"<div id="loadingSpinner" class="spinner"></div>"#));

        state.end_loading();
        let later = render_page(&state, now + Duration::seconds(4)).unwrap();
        assert!(later.contains(r#"<div id="toast" class="toast" hidden></div>"#));
        assert!(later.contains(r#"<div id="loadingSpinner" class="spinner" hidden></div>"#));
    }

    #[test]
    fn toast_text_is_escaped() {
        let mut state = ViewState::new(App::Admin);
        let now = Utc::now();
        state.notify(ToastKind::Error, "<b>bad</b>", now, Duration::seconds(3));
        let page = render_page(&state, now).unwrap();
        assert!(page.contains("&lt;b&gt;bad"));
        assert!(!page.contains("<b>bad"));
    }

    #[test]
    fn edit_modal_is_prefilled() {
        let markup = render_edit_course(&course("e1", "Rust & Co")).unwrap();
        assert!(markup.contains(r#"value="Rust &amp; Co""#));
        assert!(markup.contains(r#"data-course-id="e1""#));
        assert!(markup.contains(r#"value="499""#));
    }

    #[test]
    fn course_detail_lists_features_and_an_enroll_trigger() {
        let markup = render_course_detail(&course("d1", "Rust")).unwrap();
        assert!(markup.contains(r#"class="course-meta""#));
        assert!(markup.contains(r#"class="learning-points""#));
        assert!(markup.contains(r#"class="features-grid""#));
        assert!(markup.contains("What You'll Learn"));
        assert!(markup.contains(r#"data-action="purchase" data-course-id="d1""#));
        assert!(markup.contains("₹499"));
    }

    #[test]
    fn dynamic_overlay_appears_on_the_page() {
        let mut state = ViewState::new(App::Storefront);
        assert!(!render_page(&state, Utc::now()).unwrap().contains("dynamicModal"));
        state.modals.show(DynamicModal::CourseDetail(course("d1", "Rust")));
        let page = render_page(&state, Utc::now()).unwrap();
        assert!(page.contains(r#"<div class="modal" id="dynamicModal""#));
        assert!(page.contains("Enroll Now"));
    }

    #[test]
    fn welcome_banner_only_when_requested() {
        let mut state = ViewState::new(App::Storefront);
        state.modals.open(AuthModal::SignUp);
        assert!(!render_page(&state, Utc::now()).unwrap().contains("welcome-message"));
        state.modals.open_sign_up_with_welcome();
        assert!(render_page(&state, Utc::now()).unwrap().contains("welcome-message"));
    }

    #[test]
    fn loaded_views_render_inside_their_containers() {
        let token = SessionToken::new("t").unwrap();
        let mut state = ViewState::new(App::Admin);
        let tickets = state.enter_mode(&enter(App::Admin, Some(&token)));
        state.commit(tickets[0], vec![]);
        let page = render_page(&state, Utc::now()).unwrap();
        assert!(page.contains(r#"<div id="adminCourses" class="courses-grid">"#));
        assert!(page.contains("You haven't created any courses yet."));
    }
}
