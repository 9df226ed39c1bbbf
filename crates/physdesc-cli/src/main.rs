use anyhow::Result;
use clap::Parser;
use physdesc_acquire::{open_output, Harvester};
use physdesc_model::HarvestConfig;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "physdesc")]
#[command(about = "Harvest \"Physical Description\" metadata from Huntington Library IIIF manifests")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, keeping HTTP client internals quiet at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn",
        LogLevel::Trace => "trace,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let config = HarvestConfig {
        request_timeout: Duration::from_secs(cli.timeout_secs),
        ..HarvestConfig::default()
    };
    tracing::debug!(config = %serde_json::to_string(&config)?, "Harvest configuration");
    tracing::info!(
        sections = ?config.sections,
        start = config.id_range.start,
        end = config.id_range.end,
        items = config.item_count(),
        "Harvesting Physical Descriptions"
    );

    // Output setup is the only step allowed to abort the run.
    let mut sink = open_output(&config.output_dir, &config.output_file)?;
    let output_path = config.output_path();
    let harvester = Harvester::new(config)?;
    let summary = harvester.run(&mut sink).await;

    tracing::info!(
        path = %output_path.display(),
        lines = sink.lines_written(),
        failed = summary.fetch_failed + summary.write_failed,
        "Harvest completed"
    );

    Ok(())
}
