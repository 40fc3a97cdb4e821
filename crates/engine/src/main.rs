use std::path::PathBuf;

use anyhow::Context;
use engine::runner::run_report_file;
use engine::shared::config::{load_config, load_config_from};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: engine <input.json> [config.toml]";

fn main() -> anyhow::Result<()> {
    // Log directory
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("engine.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let input_path = PathBuf::from(args.next().context(USAGE)?);
    let config = match args.next() {
        Some(path) => load_config_from(&PathBuf::from(path))?,
        None => load_config()?,
    };

    let started_at = std::time::Instant::now();
    let output = run_report_file(&input_path, &config)
        .with_context(|| format!("report over {} failed", input_path.display()))?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    tracing::info!("report finished in {} ms", started_at.elapsed().as_millis());

    Ok(())
}
