use anyhow::Result;
use brainbloom_application::AppContext;
use brainbloom_core::directory::ResourceKind;
use brainbloom_infrastructure::{BloomPaths, ConfigService, FileIdentityStore, MockDelays};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "brainbloom")]
#[command(
    about = "BrainBloom - mental-health support chat with crisis detection",
    long_about = None
)]
struct Cli {
    /// Directory holding config, identity and logs (default: $BRAINBLOOM_HOME
    /// or the platform config dir)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive support chat
    Chat,
    /// List peer supporters
    Peers,
    /// List professional and community resources nearby
    Resources {
        /// Only show one kind (therapist, crisis_center, hospital, support_group)
        #[arg(long)]
        kind: Option<ResourceKind>,
        /// Match against names and specialties
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show emergency hotlines
    Emergency,
    /// Show agent status and system health
    Agents {
        /// Keep polling until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Sign in
    Login {
        /// Use the Google sign-in flow
        #[arg(long, conflicts_with_all = ["email", "password"])]
        google: bool,
        #[arg(long, required_unless_present = "google")]
        email: Option<String>,
        #[arg(long, required_unless_present = "google")]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Check whether text contains crisis indicators
    Classify {
        /// Text to classify
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BloomPaths::new(cli.home.as_deref())?;
    let config = ConfigService::new(&paths).load()?;
    let _log_guard = logging::init(&paths.logs_dir(), &config.log_level)?;
    tracing::info!(home = %paths.base_dir().display(), "[Main] Starting");

    let delays = MockDelays::default();
    let identity = FileIdentityStore::new(&paths, &delays);
    let context = AppContext::with_mock_backend(&config, delays);

    match cli.command {
        Commands::Chat => commands::chat::run(&context, &identity).await?,
        Commands::Peers => commands::directory::peers(&context).await?,
        Commands::Resources { kind, search } => {
            commands::directory::resources(&context, kind, search).await?
        }
        Commands::Emergency => commands::directory::emergency(),
        Commands::Agents { watch } => commands::monitor::run(&context, watch).await?,
        Commands::Login {
            google,
            email,
            password,
        } => commands::account::login(&identity, google, email, password).await?,
        Commands::Logout => commands::account::logout(&identity)?,
        Commands::Whoami => commands::account::whoami(&identity),
        Commands::Classify { text } => commands::classify::run(&text.join(" ")),
    }

    Ok(())
}
