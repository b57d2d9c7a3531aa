//! services/client/src/bin/coursify.rs
//!
//! Command-line front end. Each invocation is one page load of the chosen
//! application followed by at most one user gesture; the resulting page is
//! printed as HTML.

use clap::{Args, Parser, Subcommand};
use client_lib::{
    adapters::{FileSessionStore, HttpGateway},
    app::{AdminDashboard, AppState, Confirm, Storefront},
    config::Config,
    error::ClientError,
};
use coursify_core::{
    action::UiAction,
    domain::{App, CourseDraft, CourseId, Credentials, SignupForm},
    ports::SessionStore,
    render::render_page,
    session::MemorySessionStore,
    view::ViewState,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coursify", about = "Coursify storefront and admin dashboard client")]
struct Cli {
    /// Write the rendered page here instead of stdout.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Keep session tokens in memory for this run only.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    app: AppCommand,
}

#[derive(Subcommand)]
enum AppCommand {
    /// The user-facing storefront.
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// The admin dashboard.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Args)]
struct SigninArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

impl From<SigninArgs> for Credentials {
    fn from(args: SigninArgs) -> Self {
        Credentials {
            email: args.email,
            password: args.password,
        }
    }
}

#[derive(Args)]
struct SignupArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

impl From<SignupArgs> for SignupForm {
    fn from(args: SignupArgs) -> Self {
        SignupForm::new(&args.first_name, &args.last_name, &args.email, &args.password)
    }
}

#[derive(Args)]
struct CourseArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    image_url: String,
    #[arg(long)]
    price: f64,
}

impl From<CourseArgs> for CourseDraft {
    fn from(args: CourseArgs) -> Self {
        CourseDraft {
            title: args.title,
            description: args.description,
            image_url: args.image_url,
            price: args.price,
        }
    }
}

#[derive(Args)]
struct ClickArgs {
    /// Value of the trigger's `data-action` attribute.
    action: String,
    /// Value of the trigger's `data-course-id` attribute, if any.
    course_id: Option<String>,
}

impl ClickArgs {
    fn to_action(&self) -> Result<UiAction, ClientError> {
        UiAction::from_attributes(&self.action, self.course_id.as_deref()).ok_or_else(|| {
            ClientError::Internal(format!("'{}' is not a known action", self.action))
        })
    }
}

#[derive(Subcommand)]
enum UserCommand {
    /// Load the page and print it.
    Show,
    Signin(SigninArgs),
    Signup(SignupArgs),
    Logout,
    Purchase { course_id: String },
    Details { course_id: String },
    GetStarted,
    /// Simulate a click on a rendered trigger.
    Click(ClickArgs),
}

#[derive(Subcommand)]
enum AdminCommand {
    Show,
    Signin(SigninArgs),
    Signup(SignupArgs),
    Logout,
    Create(CourseArgs),
    Edit {
        course_id: String,
    },
    Update {
        course_id: String,
        #[command(flatten)]
        course: CourseArgs,
    },
    Delete {
        course_id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    Click {
        #[command(flatten)]
        click: ClickArgs,
        #[arg(long)]
        yes: bool,
    },
}

/// Reads a yes/no answer from the terminal.
fn prompt_confirm(question: &str) -> bool {
    eprint!("{} [y/N] ", question);
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn confirmation(skip_prompt: bool) -> Confirm {
    if skip_prompt {
        return Arc::new(|_: &str| true);
    }
    Arc::new(prompt_confirm)
}

async fn run_user(state: AppState, command: UserCommand) -> Result<ViewState, ClientError> {
    let storefront = Storefront::new(state);
    storefront.refresh().await;
    match command {
        UserCommand::Show => {}
        UserCommand::Signin(args) => {
            storefront.dispatch(UiAction::OpenSignIn).await;
            storefront.sign_in(args.into()).await;
        }
        UserCommand::Signup(args) => {
            storefront.dispatch(UiAction::OpenSignUp).await;
            storefront.sign_up(args.into()).await;
        }
        UserCommand::Logout => storefront.dispatch(UiAction::Logout).await,
        UserCommand::Purchase { course_id } => {
            storefront
                .dispatch(UiAction::Purchase(CourseId::new(course_id)))
                .await
        }
        UserCommand::Details { course_id } => {
            storefront
                .dispatch(UiAction::ShowDetails(CourseId::new(course_id)))
                .await
        }
        UserCommand::GetStarted => storefront.dispatch(UiAction::GetStarted).await,
        UserCommand::Click(click) => storefront.dispatch(click.to_action()?).await,
    }
    Ok(storefront.snapshot())
}

async fn run_admin(state: AppState, command: AdminCommand) -> Result<ViewState, ClientError> {
    let skip_prompt = match &command {
        AdminCommand::Delete { yes, .. } | AdminCommand::Click { yes, .. } => *yes,
        _ => false,
    };
    let dashboard = AdminDashboard::new(state, confirmation(skip_prompt));
    dashboard.refresh().await;
    match command {
        AdminCommand::Show => {}
        AdminCommand::Signin(args) => {
            dashboard.dispatch(UiAction::OpenSignIn).await;
            dashboard.sign_in(args.into()).await;
        }
        AdminCommand::Signup(args) => {
            dashboard.dispatch(UiAction::OpenSignUp).await;
            dashboard.sign_up(args.into()).await;
        }
        AdminCommand::Logout => dashboard.dispatch(UiAction::Logout).await,
        AdminCommand::Create(course) => dashboard.create_course(course.into()).await,
        AdminCommand::Edit { course_id } => {
            dashboard
                .dispatch(UiAction::Edit(CourseId::new(course_id)))
                .await
        }
        AdminCommand::Update { course_id, course } => {
            let course_id = CourseId::new(course_id);
            dashboard.edit_course(&course_id).await;
            dashboard.update_course(&course_id, course.into()).await;
        }
        AdminCommand::Delete { course_id, .. } => {
            dashboard
                .dispatch(UiAction::Delete(CourseId::new(course_id)))
                .await
        }
        AdminCommand::Click { click, .. } => dashboard.dispatch(click.to_action()?).await,
    }
    Ok(dashboard.snapshot())
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(api = %config.api_base_url, "Configuration loaded");

    // --- 2. Initialize Adapters ---
    let gateway = Arc::new(HttpGateway::new(
        config.api_base_url.clone(),
        config.request_timeout,
    )?);
    let sessions: Arc<dyn SessionStore> = if cli.ephemeral {
        info!("Keeping the session in memory");
        Arc::new(MemorySessionStore::new())
    } else {
        let file = FileSessionStore::new(config.session_path.clone());
        info!(path = %file.path().display(), "Using session file");
        Arc::new(file)
    };

    // --- 3. Load the Page and Apply the Gesture ---
    let view = match cli.app {
        AppCommand::User { command } => {
            let state = AppState::new(App::Storefront, gateway, sessions, config.clone());
            run_user(state, command).await?
        }
        AppCommand::Admin { command } => {
            let state = AppState::new(App::Admin, gateway, sessions, config.clone());
            run_admin(state, command).await?
        }
    };

    // --- 4. Emit the Rendered Page ---
    if let Some(toast) = view.last_toast() {
        info!(kind = toast.kind.css_class(), "{}", toast.message);
    }
    let page = render_page(&view, chrono::Utc::now())?;
    match cli.out {
        Some(path) => std::fs::write(path, page)?,
        None => println!("{}", page),
    }
    Ok(())
}
