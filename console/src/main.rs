use clap::Parser;
use lms_console::{init_tracing, Cli, ConsoleApp};
use lms_shared::{AppConfig, Environment};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first, then the generic one
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        base_url = %config.api.base_url,
        "Starting LMS console"
    );

    let command = Cli::parse().into_command();
    let app = ConsoleApp::build(config)?;
    app.start().await;

    let mut stdout = std::io::stdout();
    if let Err(e) = app.run(command, &mut stdout).await {
        error!(error = %e, "Command failed");
        return Err(e);
    }
    Ok(())
}
