use crate::api::HrApiClient;
use crate::cli::{Cli, Command};
use crate::commands::{self, CommandContext};
use crate::components::{
    announcements::Announcements, employee_events::EmployeeEvents, ComponentManager,
};
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Run the requested command
pub async fn run(cli: Cli, config: Arc<RwLock<Config>>) -> miette::Result<()> {
    match cli.command {
        Command::Calendar { month } => {
            let ctx = CommandContext::new(config);
            commands::calendar::month(&ctx, month).await?;
        }
        Command::Today => {
            let ctx = CommandContext::new(config);
            commands::calendar::today(&ctx).await?;
        }
        Command::Week => {
            let ctx = CommandContext::new(config);
            commands::calendar::week(&ctx).await?;
        }
        Command::Announcements => {
            let ctx = CommandContext::new(config);
            commands::announcements::list(&ctx).await?;
        }
        Command::Watch => run_watch(config).await?,
    }

    Ok(())
}

/// Run watch mode until a termination signal arrives
async fn run_watch(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let api = HrApiClient::new(Arc::clone(&config));

    // Initialize component manager with the enabled components
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    {
        let config_read = config.read().await;
        if config_read.is_component_enabled("employee_events") {
            component_manager.register(EmployeeEvents::new());
        }
        if config_read.is_component_enabled("announcements") {
            component_manager.register(Announcements::new());
        }
    }

    // Create a shared component manager
    let component_manager = Arc::new(component_manager);

    // Initialize components
    component_manager
        .init_all(Arc::clone(&config), api)
        .await?;

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Clone component manager for shutdown handler
    let shutdown_components = Arc::clone(&component_manager);

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    info!("Watch mode started");

    // Wait for the shutdown signal
    let _ = shutdown_recv.await;
    info!("Watch mode stopped");

    Ok(())
}
