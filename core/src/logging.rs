use std::path::Path;

use thiserror::Error;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
	filter::LevelFilter,
	fmt::{self, Layer},
	prelude::*,
	util::TryInitError,
	EnvFilter,
};

#[cfg(debug_assertions)]
const CONSOLE_LOG_FILTER: LevelFilter = LevelFilter::DEBUG;

#[cfg(not(debug_assertions))]
const CONSOLE_LOG_FILTER: LevelFilter = LevelFilter::INFO;

#[derive(Error, Debug)]
pub enum LoggerError {
	#[error("failed to create log directory: {0}")]
	Io(#[from] std::io::Error),
	#[error("invalid log directive: {0}")]
	Directive(#[from] tracing_subscriber::filter::ParseError),
	#[error(transparent)]
	Init(#[from] TryInitError),
}

/// Installs the global subscriber: console output on stderr plus a daily
/// rolling file under `<data_dir>/logs`.
///
/// `RUST_LOG` wins over `level` when set. The returned guard must be kept
/// alive for the file writer to flush.
pub fn init_logger(data_dir: impl AsRef<Path>, level: &str) -> Result<WorkerGuard, LoggerError> {
	let logs_dir = data_dir.as_ref().join("logs");
	std::fs::create_dir_all(&logs_dir)?;

	let (non_blocking, guard) = tracing_appender::non_blocking(rolling::daily(logs_dir, "log"));

	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(format!(
			"warn,ds_core={level},ds_api={level},docshelf={level}"
		))?,
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(std::io::stderr)
				.with_filter(CONSOLE_LOG_FILTER),
		)
		.with(
			Layer::default()
				.with_writer(non_blocking)
				.with_ansi(false)
				.with_filter(LevelFilter::DEBUG),
		)
		.try_init()?;

	Ok(guard)
}
