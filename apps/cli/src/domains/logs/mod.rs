//! Viewing the client's own log files

use anyhow::Result;
use clap::{Args, Subcommand};
use std::{
	collections::VecDeque,
	path::{Path, PathBuf},
	time::SystemTime,
};
use tokio::{
	fs::{self, File},
	io::{AsyncBufReadExt, BufReader},
};

use crate::context::Context;

#[derive(Subcommand, Debug)]
pub enum LogsCmd {
	/// Show recent log lines
	Show(LogsShowArgs),
	/// Print the log directory
	Path,
}

#[derive(Args, Debug)]
pub struct LogsShowArgs {
	/// Number of lines to show
	#[arg(short = 'n', long, default_value_t = 50)]
	pub lines: usize,

	/// Only show lines at this level or more severe (error, warn, info, debug, trace)
	#[arg(long)]
	pub level: Option<String>,
}

pub async fn run(ctx: &Context, cmd: LogsCmd) -> Result<()> {
	let logs_dir = ctx.data_dir.join("logs");

	match cmd {
		LogsCmd::Show(args) => {
			let Some(log_file) = current_log_file(&logs_dir).await? else {
				println!("No log file found in {}", logs_dir.display());
				return Ok(());
			};

			for line in read_last_lines(&log_file, args.lines, args.level.as_deref()).await? {
				println!("{line}");
			}
		}
		LogsCmd::Path => println!("{}", logs_dir.display()),
	}

	Ok(())
}

/// Today's file from the daily rotation, else the most recently modified one.
async fn current_log_file(logs_dir: &Path) -> Result<Option<PathBuf>> {
	let today = logs_dir.join(format!("log.{}", chrono::Utc::now().format("%Y-%m-%d")));
	if fs::try_exists(&today).await? {
		return Ok(Some(today));
	}

	let mut entries = match fs::read_dir(logs_dir).await {
		Ok(entries) => entries,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
		Err(e) => return Err(e.into()),
	};

	let mut newest: Option<(SystemTime, PathBuf)> = None;
	while let Some(entry) = entries.next_entry().await? {
		if !entry.file_name().to_string_lossy().starts_with("log") {
			continue;
		}

		let modified = entry.metadata().await?.modified()?;
		if newest
			.as_ref()
			.map_or(true, |(newest_modified, _)| modified > *newest_modified)
		{
			newest = Some((modified, entry.path()));
		}
	}

	Ok(newest.map(|(_, path)| path))
}

fn level_priority(level: &str) -> u8 {
	match level.to_uppercase().as_str() {
		"ERROR" => 0,
		"WARN" => 1,
		"INFO" => 2,
		"DEBUG" => 3,
		"TRACE" => 4,
		_ => 5,
	}
}

/// Level of a line written by the fmt layer: `<timestamp>  LEVEL target: message`.
fn line_level(line: &str) -> Option<&str> {
	line.split_whitespace().nth(1)
}

fn level_matches(line: &str, filter: Option<&str>) -> bool {
	match (filter, line_level(line)) {
		(None, _) => true,
		(Some(filter), Some(level)) => level_priority(level) <= level_priority(filter),
		(Some(_), None) => false,
	}
}

async fn read_last_lines(path: &Path, n: usize, level: Option<&str>) -> Result<Vec<String>> {
	if n == 0 {
		return Ok(Vec::new());
	}

	let mut lines = BufReader::new(File::open(path).await?).lines();
	let mut last = VecDeque::with_capacity(n);

	while let Some(line) = lines.next_line().await? {
		if !level_matches(&line, level) {
			continue;
		}
		if last.len() == n {
			last.pop_front();
		}
		last.push_back(line);
	}

	Ok(last.into())
}
