//! Binary entrypoint for the wallpaper rotator.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::task::JoinSet;
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use wallpaper_rotator::config::Configuration;
use wallpaper_rotator::engine::IndexingEngine;
use wallpaper_rotator::publish::SnapshotPublisher;
use wallpaper_rotator::tasks::refresh::RefreshLoop;
use wallpaper_rotator::tasks::rotation::RotationLoop;

#[derive(Debug, Parser)]
#[command(
    name = "wallpaper-rotator",
    version,
    about = "Index a wallpaper directory and publish a rotating selection"
)]
struct Cli {
    /// Path to YAML config file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the wallpaper root directory
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Scan, publish a single selection, and exit
    #[arg(long)]
    once: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("wallpaper_rotator={level}").parse()?);
    fmt().with_env_filter(filter).with_target(true).compact().init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = match &cli.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(root) = cli.root {
        cfg.wallpaper_root = root;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    info!("Loaded configuration:\n{:#?}", cfg);

    let engine = Arc::new(IndexingEngine::from_config(&cfg));
    let publisher = Arc::new(SnapshotPublisher::new(
        engine.clone(),
        cfg.manifest_path.clone(),
        cfg.state_path.clone(),
    ));

    let report = {
        let engine = engine.clone();
        tokio::task::spawn_blocking(move || engine.activate())
            .await
            .context("initial scan failed")?
    };
    info!(
        ingested = report.ingested,
        skipped = report.skipped,
        "initial index built"
    );

    if cli.once {
        match engine.select_next() {
            Some(entry) => {
                info!(path = %entry.path.display(), "selected");
                publisher.publish_manifest();
                publisher.publish_state();
            }
            None => warn!(root = %engine.root().display(), "no wallpapers found"),
        }
        engine.deactivate();
        return Ok(());
    }

    let rotation = Arc::new(RotationLoop::new(
        engine.clone(),
        publisher.clone(),
        cfg.rotation_interval,
    ));
    let refresh = Arc::new(RefreshLoop::new(engine.clone(), cfg.refresh_interval));

    let mut tasks = JoinSet::new();
    tasks.spawn({
        let refresh = refresh.clone();
        async move { refresh.run().await.context("refresh task failed") }
    });
    tasks.spawn({
        let rotation = rotation.clone();
        async move { rotation.run().await.context("rotation task failed") }
    });

    {
        let engine = engine.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; initiating shutdown");
            rotation.stop();
            refresh.shutdown();
            engine.deactivate();
        });
    }

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!("{err:#}"),
            Err(err) => error!("task join error: {err}"),
        }
    }

    info!(
        failed_writes = publisher.failed_writes(),
        "shutdown complete"
    );
    Ok(())
}
