//! Tracing subscriber initialization.

use crate::config::{SiteConfig, TomlTableExt};
use std::path::Path;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initializes the tracing subscriber from the `[tracing]` config table.
///
/// Logs go to stdout; setting `log-dir` adds a daily-rolling file appender.
/// The returned guard must stay alive for the file writer to flush.
pub(crate) fn init(config: &SiteConfig) -> Option<WorkerGuard> {
    let table = config.tracing_table();
    let default_filter = if config.env() == "dev" {
        "info,kabar_query=debug,kabar_store=debug"
    } else {
        "info"
    };
    let filter = table
        .and_then(|t| t.get_str("filter"))
        .unwrap_or(default_filter);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    let stdout_layer = fmt::layer().with_target(
        table
            .and_then(|t| t.get_bool("display-target"))
            .unwrap_or(true),
    );

    let mut guard = None;
    let file_layer = table.and_then(|t| t.get_str("log-dir")).map(|log_dir| {
        let file_appender = rolling::daily(Path::new(log_dir), "kabar-site.log");
        let (writer, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);
        fmt::layer().with_ansi(false).with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
    guard
}
