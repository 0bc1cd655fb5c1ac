use std::path::PathBuf;

use clap::Parser;
use lastrun_api::{DEFAULT_METRICS_PATH, ListenAddr};
use lastrun_model::DEFAULT_REPORT_PATH;
use lastrun_observe::{LoggerConfig, LoggerFormat, LoggerLevel, LoggerTimeZone};

#[derive(Debug, Parser)]
#[command(
    name = "puppet_last_run_exporter",
    about = "Exports Puppet's last_run_summary.yaml as Prometheus gauges",
    version
)]
pub struct Args {
    /// Address on which to expose metrics.
    #[arg(
        long = "telemetry.address",
        value_name = "ADDR",
        default_value = ListenAddr::DEFAULT,
        env = "LASTRUN_TELEMETRY_ADDRESS"
    )]
    pub address: ListenAddr,

    /// Path under which to expose metrics.
    #[arg(
        long = "telemetry.endpoint",
        value_name = "PATH",
        default_value = DEFAULT_METRICS_PATH,
        env = "LASTRUN_TELEMETRY_ENDPOINT"
    )]
    pub endpoint: String,

    /// Puppet last run summary to export.
    #[arg(
        long = "report.path",
        value_name = "FILE",
        default_value = DEFAULT_REPORT_PATH,
        env = "LASTRUN_REPORT_PATH"
    )]
    pub report_path: PathBuf,

    /// Log filter expression (e.g. "info", "lastrun_prometheus=debug,info").
    #[arg(long = "log.level", value_name = "FILTER", default_value = "info", env = "LASTRUN_LOG_LEVEL")]
    pub log_level: LoggerLevel,

    /// Log format: text, json or journald.
    #[arg(long = "log.format", value_name = "FORMAT", default_value = "text", env = "LASTRUN_LOG_FORMAT")]
    pub log_format: LoggerFormat,

    /// Timezone of log timestamps: utc or local.
    #[arg(long = "log.tz", value_name = "TZ", default_value = "utc", env = "LASTRUN_LOG_TZ")]
    pub log_tz: LoggerTimeZone,

    /// Disable colored log output.
    #[arg(long = "log.no-color", env = "LASTRUN_LOG_NO_COLOR")]
    pub log_no_color: bool,
}

/// Startup configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub address: ListenAddr,
    pub endpoint: String,
    pub report_path: PathBuf,
    pub logger: LoggerConfig,
}

impl From<Args> for ExporterConfig {
    fn from(args: Args) -> Self {
        Self {
            address: args.address,
            endpoint: args.endpoint,
            report_path: args.report_path,
            logger: LoggerConfig {
                format: args.log_format,
                level: args.log_level,
                tz: args.log_tz,
                use_color: !args.log_no_color,
                ..Default::default()
            },
        }
    }
}
