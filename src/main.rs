use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use drugspeak::actions::{
    verify_session, Credentials, ProfileUpdate, RegisterRequest, SessionController,
};
use drugspeak::api::{community, drugs, evaluation, learning};
use drugspeak::config::{Config, SecretString};
use drugspeak::session::RecordId;
use drugspeak::transport::{StaticToken, TransportClient};

#[derive(Debug, Parser)]
#[command(name = "drugspeak", version, about = "Command-line client for the DrugSpeak API")]
struct Cli {
    /// Config file (default: <config_dir>/drugspeak/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override api.base_url
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override api.timeout_seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Bearer token for commands that need an authenticated user
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and print the resulting session
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        gender: Option<String>,
    },
    /// Sign in and print the resulting session (including its token)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check whether --token is still accepted
    Verify,
    /// Sign in, then update the signed-in user's profile
    UpdateProfile {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        new_email: Option<String>,
        #[arg(long)]
        gender: Option<String>,
    },
    /// List drug categories
    Categories,
    /// List drugs in a category
    Drugs { category: String },
    /// Show one drug
    Drug { id: String },
    /// Search drugs by name
    Search { query: String },
    /// Show the learning list
    Learning,
    /// Show learning progress
    Progress,
    /// Show the community leaderboard
    Leaderboard,
    /// Show one user's rank
    Rank { user: String },
    /// Show pronunciation tips for a drug
    Tips { drug: String },
    /// Upload a recording for evaluation
    Submit { drug: String, file: PathBuf },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.api.timeout_seconds = timeout;
        config.api.connect_timeout_seconds = config.api.connect_timeout_seconds.min(timeout);
    }

    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let token = cli.token.map(SecretString::new);
    let transport = TransportClient::new(&config.api, Arc::new(StaticToken::new(token.clone())))
        .context("Failed to build HTTP client")?;

    match cli.command {
        Command::Register {
            username,
            email,
            password,
            gender,
        } => {
            let controller = SessionController::new(&config.api).context("Failed to build HTTP client")?;
            let mut request = RegisterRequest::new(username, email, password);
            request.gender = gender;
            controller.register(request).await?;
            print_json(&controller.store().snapshot())
        }
        Command::Login { email, password } => {
            let controller = SessionController::new(&config.api).context("Failed to build HTTP client")?;
            controller.login(Credentials::new(email, password)).await?;
            print_json(&controller.store().snapshot())
        }
        Command::Verify => {
            if token.is_none() {
                anyhow::bail!("verify requires --token");
            }
            print_json(&verify_session(&transport).await?)
        }
        Command::UpdateProfile {
            email,
            password,
            username,
            new_email,
            gender,
        } => {
            let controller = SessionController::new(&config.api).context("Failed to build HTTP client")?;
            let signed_in = controller.login(Credentials::new(email, password)).await?;
            let updates = ProfileUpdate {
                username,
                email: new_email,
                gender,
                ..ProfileUpdate::default()
            };
            controller.update_profile(signed_in.user.id, updates).await?;
            print_json(&controller.store().snapshot())
        }
        Command::Categories => print_json(&drugs::categories(&transport).await?),
        Command::Drugs { category } => {
            print_json(&drugs::by_category(&transport, &RecordId::from(category.as_str())).await?)
        }
        Command::Drug { id } => print_json(&drugs::details(&transport, &RecordId::from(id.as_str())).await?),
        Command::Search { query } => print_json(&drugs::search(&transport, &query).await?),
        Command::Learning => print_json(&learning::list(&transport).await?),
        Command::Progress => print_json(&learning::progress(&transport).await?),
        Command::Leaderboard => print_json(&community::leaderboard(&transport).await?),
        Command::Rank { user } => {
            print_json(&community::user_rank(&transport, &RecordId::from(user.as_str())).await?)
        }
        Command::Tips { drug } => print_json(&evaluation::tips(&transport, &RecordId::from(drug.as_str())).await?),
        Command::Submit { drug, file } => print_json(
            &evaluation::submit_recording_file(&transport, &RecordId::from(drug.as_str()), &file).await?,
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    drugspeak::logging::init_tracing(&config.logging.filter);
    run(cli, config).await
}
