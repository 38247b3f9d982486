/// Tale Service - background profile playback host
use clap::Parser;
use std::path::PathBuf;
use tale_core::{InMemoryProfileStore, ProfileId};
use tale_playback::Disposition;
use tale_service::{PlaybackService, ServiceConfig, StartRequest};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tale-service")]
#[command(about = "Tale Player background playback service", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TALE_CONFIG")]
    config: Option<PathBuf>,

    /// Profile catalog (JSON), overrides the configured path
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Profile to play
    #[arg(short, long)]
    profile: ProfileId,

    /// Transport action applied after start (e.g. ACTION_PAUSE)
    #[arg(short, long)]
    action: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = ServiceConfig::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tale Service");
    tracing::info!("Catalog: {}", config.catalog.path.display());

    let store = InMemoryProfileStore::load(&config.catalog.path)?;
    tracing::info!("Loaded {} profiles", store.len());

    let (mut service, mut events) = PlaybackService::new(&config, store);

    let mut request = StartRequest::new(cli.profile);
    if let Some(action) = cli.action {
        request = request.with_action(action);
    }

    if let Disposition::Shutdown(reason) = service.start_command(request) {
        tracing::warn!("Service stopped during start: {:?}", reason);
        service.teardown();
        return Ok(());
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let reason = service.run(stdin, &mut events).await;
    tracing::info!("Tale Service stopped: {:?}", reason);

    Ok(())
}
