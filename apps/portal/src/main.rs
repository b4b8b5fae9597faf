use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use github_api::{GitHubClient, GitHubClientFactory};
use portal_core::{
    validate_page, CommandOutcome, FragmentEngine, HttpFragmentEngine, NoopFragmentEngine,
    PageModel, SessionController, UiCommand,
};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod console;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Repository maintainer portal")]
struct Args {
    /// Settings file; defaults to ./portal.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the token's collaborator permission and open the matching view.
    Login {
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Show the repository README without logging in.
    Readme,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&settings.log_filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let page = PageModel::new(settings.tabs.clone());
    validate_page(&page)?;
    let controller = build_controller(&settings)?;
    info!(repo = %controller.repo(), "portal ready");

    let command = match args.command {
        Command::Login { token } => {
            let token = match token {
                Some(token) => token,
                None => prompt_token().await?,
            };
            UiCommand::LoginClicked { token }
        }
        Command::Readme => UiCommand::ViewReadme,
    };

    let outcome = controller.handle(&page, command).await;
    let mut stdout = io::stdout();
    stdout
        .write_all(console::render(&page.snapshot()).as_bytes())
        .await?;
    stdout.flush().await?;

    match outcome {
        CommandOutcome::Login(login) => match login.session() {
            Some(session) => {
                info!(
                    username = %session.username,
                    permission = session.permission.as_str(),
                    "session established"
                );
                Ok(())
            }
            None => std::process::exit(1),
        },
        CommandOutcome::Readme(Ok(())) => Ok(()),
        CommandOutcome::Readme(Err(_)) => std::process::exit(1),
        CommandOutcome::Ignored => {
            warn!("command ignored; anonymous README view is disabled in settings");
            std::process::exit(2);
        }
    }
}

fn build_controller(settings: &Settings) -> Result<SessionController> {
    let api_config = settings.api_config();
    let readme = GitHubClient::anonymous(api_config.clone())
        .context("failed to build GitHub client")?;
    let clients = GitHubClientFactory::new(api_config.clone());

    let fragments: Arc<dyn FragmentEngine> = match &settings.fragment_base_url {
        Some(base) => Arc::new(
            HttpFragmentEngine::new(base, &api_config)
                .with_context(|| format!("invalid fragment base URL '{base}'"))?,
        ),
        None => Arc::new(NoopFragmentEngine),
    };

    Ok(
        SessionController::new(Arc::new(readme), Arc::new(clients), fragments)
            .allow_anonymous_readme(settings.allow_anonymous_readme),
    )
}

async fn prompt_token() -> Result<String> {
    let mut stderr = io::stderr();
    stderr
        .write_all(b"GitHub Personal Access Token: ")
        .await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read token from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
