//! `crease`: drive the academy portal from a terminal.
//!
//! Each invocation is one page load: the persisted session is restored,
//! the chosen form is filled from the arguments and submitted, and the
//! resulting page is printed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crease::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// `crease` command arguments.
#[derive(Debug, Parser)]
#[command(name = "crease", about = "Client for the cricket academy API", version)]
struct Cli {
    /// API base URL. Falls back to `CREASE_API_URL`, then localhost:8080.
    #[arg(long = "api-url", value_name = "url", global = true)]
    api_url: Option<String>,

    /// Session file. Falls back to `CREASE_STORAGE`, then the data dir.
    #[arg(long, value_name = "path", global = true)]
    storage: Option<PathBuf>,

    /// Skip the `GET /` health check before signup and admin login.
    #[arg(long = "no-health-check", global = true)]
    no_health_check: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show who is logged in and the current page.
    Status,
    /// Create a cricketer account.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with a mobile number, or an email with `--admin`.
    Login {
        /// Mobile number (cricketers) or email (admins).
        identifier: String,
        #[arg(long)]
        password: String,
        /// Submit as an admin.
        #[arg(long)]
        admin: bool,
    },
    /// Log in through the admin page.
    AdminLogin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show your profile.
    Profile,
    /// Change profile fields. Omitted fields stay as they are.
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// List announcements.
    Announcements,
    /// Post an announcement (admin).
    Announce {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// List cricketers (admin).
    Cricketers,
    /// Set a cricketer's joining date (admin).
    SetJoiningDate {
        /// Cricketer id.
        id: String,
        /// `YYYY-MM-DD` or an RFC 3339 timestamp.
        date: String,
    },
    /// Mark a cricketer inactive, or active again with `--active` (admin).
    SetInactive {
        /// Cricketer id.
        id: String,
        #[arg(long)]
        active: bool,
    },
    /// Forget the stored session.
    Logout,
}

impl Command {
    /// The content slots worth printing after this command.
    fn focus(&self) -> &'static [ElementId] {
        match self {
            Self::Profile | Self::UpdateProfile { .. } => &[ElementId::ProfileInfo],
            Self::Announcements | Self::Announce { .. } => &[ElementId::AnnouncementsList],
            Self::Cricketers | Self::SetJoiningDate { .. } | Self::SetInactive { .. } => {
                &[ElementId::CricketersList]
            }
            Self::Login { .. } | Self::AdminLogin { .. } => &[
                ElementId::ProfileInfo,
                ElementId::AnnouncementsList,
                ElementId::CricketersList,
            ],
            Self::Status | Self::Signup { .. } | Self::Logout => &[],
        }
    }
}

fn config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(path) = &cli.storage {
        config.storage_path = path.clone();
    }
    if cli.no_health_check {
        config.health_check = false;
    }
    // The terminal shows the result once the command ends; no need to
    // hold the success message on screen.
    config.signup_redirect_delay = Duration::ZERO;
    config
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config(&cli);
    tracing::debug!(
        base_url = %config.base_url,
        storage = %config.storage_path.display(),
        "configured"
    );

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: ClientConfig) -> Result<(), ApiError> {
    let storage = FileStorage::open(&config.storage_path).inspect_err(|e| eprintln!("{e}"))?;
    let mut portal = PortalBuilder::new()
        .config(config)
        .connect(storage)
        .inspect_err(|e| eprintln!("{e}"))?;

    // A stale session fails here and is cleared; the command still runs.
    let started = portal.start().await;
    let focus = command.focus();

    let result = match command {
        Command::Status | Command::Profile | Command::Announcements | Command::Cricketers => {
            started.map(|_| ())
        }
        Command::Signup { name, email, mobile, password } => {
            portal.navigate(Page::Signup);
            portal
                .document_mut()
                .form_mut(FormId::Signup)
                .set(FormField::Name, name)
                .set(FormField::Email, email)
                .set(FormField::Mobile, mobile)
                .set(FormField::Password, password);
            portal.signup().await
        }
        Command::Login { identifier, password, admin } => {
            portal
                .document_mut()
                .form_mut(FormId::Login)
                .set(FormField::Identifier, identifier)
                .set(FormField::Password, password);
            let submitter = if admin { LoginSubmitter::Admin } else { LoginSubmitter::Cricketer };
            portal.login(submitter).await
        }
        Command::AdminLogin { email, password } => {
            portal.navigate(Page::AdminLogin);
            portal
                .document_mut()
                .form_mut(FormId::AdminLogin)
                .set(FormField::Email, email)
                .set(FormField::Password, password);
            portal.admin_login().await
        }
        Command::UpdateProfile { name, email, mobile, password } => {
            let form = portal.document_mut().form_mut(FormId::Profile);
            for (field, value) in [
                (FormField::Name, name),
                (FormField::Email, email),
                (FormField::Mobile, mobile),
                (FormField::Password, password),
            ] {
                if let Some(value) = value {
                    form.set(field, value);
                }
            }
            portal.update_profile().await
        }
        Command::Announce { title, content } => {
            portal
                .document_mut()
                .form_mut(FormId::Announcement)
                .set(FormField::Title, title)
                .set(FormField::Content, content);
            portal.create_announcement().await
        }
        Command::SetJoiningDate { id, date } => {
            portal
                .document_mut()
                .form_mut(FormId::CricketerAdmin)
                .set(FormField::CricketerId, id)
                .set(FormField::JoiningDate, date);
            portal.set_joining_date().await
        }
        Command::SetInactive { id, active } => {
            portal
                .document_mut()
                .form_mut(FormId::CricketerAdmin)
                .set(FormField::CricketerId, id);
            portal.set_inactive_status(!active).await
        }
        Command::Logout => portal.logout(),
    };

    print_view(&mut portal, focus);
    result
}

/// Prints the page: where we are, what it says, and the focused content.
fn print_view<T: Transport, S: Storage>(portal: &mut Portal<T, S>, focus: &[ElementId]) {
    let page = portal
        .current_page()
        .map_or_else(|| "none".to_string(), |p| p.to_string());
    match portal.store().current() {
        Some(session) => println!("page: {page} (logged in as {})", session.role),
        None => println!("page: {page} (not logged in)"),
    }

    let doc = portal.document_mut();
    for slot in [
        ElementId::LoginMessage,
        ElementId::SignupMessage,
        ElementId::ProfileMessage,
        ElementId::AnnouncementsMessage,
        ElementId::CricketersMessage,
    ] {
        match doc.message(slot) {
            Some((text, MessageKind::Success)) => println!("{text}"),
            Some((text, MessageKind::Error)) => eprintln!("error: {text}"),
            None => {}
        }
    }
    for alert in doc.take_alerts() {
        println!("! {alert}");
    }

    for &slot in focus {
        let visible = match slot {
            ElementId::ProfileInfo => doc.is_visible(ElementId::ProfileSection),
            ElementId::CricketersList => doc.is_visible(ElementId::AdminSection),
            _ => doc.is_visible(ElementId::LoggedInSection),
        };
        let text = doc.content(slot).map(render::plain_text).unwrap_or_default();
        if visible && !text.is_empty() {
            println!();
            println!("{text}");
        }
    }
}
