use anyhow::Context;
use clap::Parser;
use tracing::info;

use lastrun_api::HttpApi;
use lastrun_observe::{LoggerTimeZone, init_local_offset, init_logger};
use lastrun_prometheus::{BuildInfo, ExporterMetrics};

mod cli;
use cli::{Args, ExporterConfig};

fn main() -> anyhow::Result<()> {
    // `--version` and usage errors exit here, before anything is bound.
    let config = ExporterConfig::from(Args::parse());

    // 1) logger; local offset must be read while the process is single-threaded
    if config.logger.tz == LoggerTimeZone::Local {
        init_local_offset();
    }
    init_logger(&config.logger).context("failed to initialize logger")?;

    // 2) runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: ExporterConfig) -> anyhow::Result<()> {
    let build = BuildInfo::current();
    info!(
        version = build.version,
        revision = build.revision,
        report = %config.report_path.display(),
        endpoint = %config.endpoint,
        "starting puppet_last_run_exporter"
    );

    // 3) registry + collector
    let metrics = ExporterMetrics::new(&config.report_path)
        .context("failed to register metrics")?;

    // 4) http
    let router = HttpApi::new(metrics).router(&config.endpoint)?;
    lastrun_api::run(&config.address, router).await?;

    Ok(())
}
