mod commands;
mod render;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gaon_core::calendar::ViewMode;
use gaon_core::client::PortalClient;
use gaon_core::config::GaonConfig;
use gaon_core::storage::{FileStorage, SharedStorage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gaon")]
#[command(about = "Gaon school portal in your terminal: calendar, chat, profile and theme")]
struct Cli {
    /// Portal backend URL (overrides server_url from config)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// School calendar and personal events
    Calendar {
        #[command(subcommand)]
        command: CalendarCommand,
    },
    /// Talk to the portal assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommand,
    },
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },
    /// Meals and timetable
    School {
        #[command(subcommand)]
        command: SchoolCommand,
    },
    /// Show or change settings in ~/.config/gaon/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum CalendarCommand {
    /// Draw the calendar
    Show {
        /// day, week, month or year
        #[arg(short, long, default_value = "month")]
        view: ViewMode,

        /// Date to start from (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Steps to move from the start date, in units of the view
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Add a personal event
    Add {
        /// Event title (prompted for when omitted)
        title: Option<String>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Hour of day ("09")
        #[arg(short, long)]
        time: Option<String>,

        /// Colour as #rrggbb
        #[arg(short, long)]
        color: Option<String>,
    },
}

#[derive(Subcommand)]
enum ChatCommand {
    /// Send a message in the current conversation
    Send {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Conversation to send into (defaults to the most recent)
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Start a new conversation
    New,
    /// List conversations, most recent first
    List,
    /// Print a conversation
    Show {
        /// Conversation id (defaults to the most recent)
        id: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show the display name
    Show,
    /// Change the nickname
    Edit { nickname: String },
    /// Log out on this machine
    Logout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ThemeCommand {
    Show,
    Toggle,
}

#[derive(Subcommand)]
enum SchoolCommand {
    /// Meals for a day
    Meal {
        /// YYYY-MM-DD, defaults to today
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Class periods for a day
    Timetable {
        /// YYYY-MM-DD, defaults to today
        #[arg(short, long)]
        day: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
    /// Point the client at another portal backend
    SetServer { url: String },
}

/// What every command needs: storage for local state and the backend client.
pub struct App {
    pub storage: SharedStorage,
    pub client: PortalClient,
}

impl App {
    fn load(server: Option<String>) -> Result<Self> {
        let config = GaonConfig::load()?;
        let server_url = server.unwrap_or(config.server_url.clone());
        tracing::debug!(%server_url, data_dir = %config.data_path().display(), "loaded config");

        Ok(App {
            storage: Arc::new(FileStorage::new(config.data_path())),
            client: PortalClient::new(&server_url),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gaon=warn,gaon_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Commands::Config { command } = cli.command {
        return match command {
            ConfigCommand::Show => commands::config::show(),
            ConfigCommand::SetServer { url } => commands::config::set_server(&url),
        };
    }

    let app = App::load(cli.server)?;

    match cli.command {
        Commands::Calendar { command } => match command {
            CalendarCommand::Show { view, date, offset } => {
                commands::calendar::show(&app, view, date.as_deref(), offset).await
            }
            CalendarCommand::Add {
                title,
                date,
                time,
                color,
            } => commands::calendar::add(&app, title, date, time, color),
        },
        Commands::Chat { command } => match command {
            ChatCommand::Send { message, session } => {
                commands::chat::send(&app, &message.join(" "), session.as_deref()).await
            }
            ChatCommand::New => commands::chat::new(&app),
            ChatCommand::List => commands::chat::list(&app),
            ChatCommand::Show { id } => commands::chat::show(&app, id.as_deref()),
        },
        Commands::Profile { command } => match command {
            ProfileCommand::Show => commands::profile::show(&app).await,
            ProfileCommand::Edit { nickname } => commands::profile::edit(&app, &nickname).await,
            ProfileCommand::Logout { yes } => commands::profile::logout(&app, yes).await,
        },
        Commands::Theme { command } => match command {
            ThemeCommand::Show => commands::theme::show(&app),
            ThemeCommand::Toggle => commands::theme::toggle(&app),
        },
        Commands::School { command } => match command {
            SchoolCommand::Meal { day } => commands::school::meal(&app, day.as_deref()).await,
            SchoolCommand::Timetable { day } => {
                commands::school::timetable(&app, day.as_deref()).await
            }
        },
        Commands::Config { .. } => Ok(()),
    }
}
