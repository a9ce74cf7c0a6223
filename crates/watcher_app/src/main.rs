mod config;
mod logging;

use anyhow::Context;
use engine_logging::{engine_error, engine_info, engine_warn};
use tokio_util::sync::CancellationToken;
use watcher_engine::{DiscordNotifier, FetchSettings, Notifier, ReqwestFetcher, Scheduler};

use crate::config::AppConfig;
use crate::logging::LogDestination;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            logging::initialize_fallback();
            engine_error!("Invalid configuration: {}", err);
            log::logger().flush();
            std::process::exit(1);
        }
    };

    let destination = match &config.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    logging::initialize(config.log_level, config.monitor.timezone, destination);

    let fetcher = ReqwestFetcher::new(FetchSettings {
        request_timeout: config.monitor.request_timeout,
        ..FetchSettings::default()
    })
    .context("failed to build HTTP client")?;

    let notifier: Option<Box<dyn Notifier>> = match config.webhook_url.as_deref() {
        Some(webhook_url) => Some(Box::new(
            DiscordNotifier::new(webhook_url, config.monitor.timezone)?
                .with_timeout(config.monitor.request_timeout),
        )),
        None => {
            engine_warn!("WEBHOOK_URL is empty; changes will only be logged");
            None
        }
    };

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_shutdown_signal(cancel.clone()));

    let scheduler = Scheduler::new(&config.monitor, Box::new(fetcher), notifier);
    let state = scheduler.run(cancel).await;
    engine_info!(
        "Stopped. Success: {}, Errors: {}",
        state.success_count(),
        state.error_count()
    );
    log::logger().flush();
    Ok(())
}

/// Cancels `token` on Ctrl-C, or on SIGTERM where the platform has it.
async fn cancel_on_shutdown_signal(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    token.cancel();
}
