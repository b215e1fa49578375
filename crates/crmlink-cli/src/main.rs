mod render;

use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use crmlink_models::{Identity, IntegrationParams, Provider};
use crmlink_sdk::{
    IntegrationApi, IntegrationClient, IntegrationSession, Navigator, ViewState,
    DEFAULT_BACKEND_URL,
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "crmlink")]
#[command(author, version, about = "Connect a HubSpot account through the crmlink backend", long_about = None)]
pub struct Cli {
    /// User the integration belongs to (ex: TestUser)
    #[arg(long, env = "CRMLINK_USER")]
    pub user: String,

    /// Organization the user belongs to (ex: TestOrg)
    #[arg(long, env = "CRMLINK_ORG")]
    pub org: String,

    /// Integration backend base URL
    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check for stored credentials and print the connection state
    Status,
    /// Start the OAuth flow and print the URL to open
    Connect(ConnectArgs),
    /// Load and list the CRM items reachable with the stored credentials
    Items,
}

#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Keep checking for credentials until the browser flow completes
    #[arg(long)]
    pub wait: bool,

    /// Seconds between credential checks
    #[arg(long, default_value_t = 2)]
    pub interval: u64,

    /// Number of credential checks before giving up
    #[arg(long, default_value_t = 60)]
    pub attempts: u32,
}

/// Terminal stand-in for a browser redirect.
struct TerminalNavigator {
    provider: Provider,
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &str) {
        println!("Open this URL to connect {}:", self.provider);
        println!("  {url}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let provider = Provider::hubspot();
    let identity = Identity::from_parts(Some(&cli.user), Some(&cli.org));
    debug!(backend = %cli.backend_url, ?identity, "starting");

    let client = IntegrationClient::with_base_url(&cli.backend_url, provider.clone());
    let mut params = IntegrationParams::default();

    match cli.command {
        Commands::Status => {
            let mut session = IntegrationSession::new(client, TerminalNavigator { provider });
            session.mount(identity.as_ref(), |p| params = p).await;
            println!("{}", render::state_line(&session.state(&params), session.view().provider()));
        }
        Commands::Connect(args) => {
            let navigator = TerminalNavigator {
                provider: provider.clone(),
            };
            let mut session = IntegrationSession::new(client, navigator);
            session.connect(identity.as_ref()).await;
            if let ViewState::Error(message) = session.state(&params) {
                bail!(message);
            }
            if !args.wait {
                return Ok(());
            }

            let identity = identity.context("user and org are required")?;
            println!("Waiting for {provider} authorization...");
            let connected = session
                .poll_credentials(
                    &identity,
                    Duration::from_secs(args.interval),
                    args.attempts,
                    |p| params = p,
                )
                .await;
            if !connected {
                bail!("no credentials after {} checks", args.attempts);
            }
            println!("{}", render::state_line(&session.state(&params), &provider));
        }
        Commands::Items => {
            let identity = identity.context("user and org are required")?;
            let response = client
                .fetch_credentials(&identity)
                .await
                .context("credential check failed")?;
            let Some(credentials) = response.credentials() else {
                bail!("not connected to {provider}; run `crmlink connect` first");
            };
            let items = client
                .load_data(credentials)
                .await
                .context("loading items failed")?;
            if let Some(error) = items.error {
                bail!(error);
            }
            print!("{}", render::items_table(&items.items));
        }
    }

    Ok(())
}
