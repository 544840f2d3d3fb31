//! Handler for running the bot from the command line.

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use super::command::Cli;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::exchange::exchange_base_url;
use crate::infrastructure::runtime::run_with_shutdown;

/// Load configuration, then either validate it or run until interrupted.
///
/// # Errors
///
/// Returns an error if configuration is invalid or startup fails.
pub async fn execute(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    if cli.check {
        print_summary(&config, cli.sandbox)?;
        return Ok(());
    }

    config.init_logging();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let run = run_with_shutdown(config, cli.sandbox, shutdown_rx);
    tokio::pin!(run);

    tokio::select! {
        result = &mut run => {
            result?;
            return Ok(());
        }
        () = shutdown_signal() => {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    }

    run.await?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(&cli.config)?;
    apply_overrides(&mut config, cli);
    config.logging.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
    if let Some(path) = &cli.database {
        config.database = path.to_string_lossy().into_owned();
    }
}

fn print_summary(config: &Config, sandbox: bool) -> Result<()> {
    let settings = config.bot_settings()?;
    println!("Configuration OK");
    println!("  asset        {}", settings.asset);
    println!("  buy amount   ${}", settings.buy_amount);
    println!("  dip          {}%", settings.dip_percent);
    println!("  average over {} days", settings.average_window_days);
    println!("  cool-down    {} days", settings.cool_down_days);
    println!("  interval     {} minutes", settings.tick_interval_minutes);
    println!(
        "  exchange     {} ({})",
        config.exchange.kind,
        exchange_base_url(&config.exchange, sandbox)
    );
    println!("  database     {}", config.database);
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                let _ = signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
    }
}
