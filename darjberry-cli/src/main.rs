use clap::Parser;
use tracing::{debug, warn};

use darjberry_cli::app::App;
use darjberry_cli::cli::Cli;
use darjberry_cli::config::AppConfig;
use darjberry_cli::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let config = AppConfig::load(cli.config.as_deref())?;

    // --log-level beats RUST_LOG, which beats the config file
    if let Some(level) = cli.log_level.as_deref() {
        logging::set_log_level(level)?;
    } else if !logging::env_filter_is_set() {
        logging::set_log_level(&config.logging.level)?;
    }

    if let Some(path) = config.logging.file.as_deref() {
        if let Err(e) = logging::enable_file_logging(path) {
            warn!("File logging disabled: {e:#}");
        }
    }

    debug!(command = ?cli.command, "Running");
    let output = App::new(config)?.execute(cli.command).await?;
    print!("{output}");

    Ok(())
}
