use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use ds_core::{config::ClientConfig, init_logger, Docshelf};
use std::path::PathBuf;

mod config;
mod context;
mod domains;
mod util;

use crate::context::{Context, OutputFormat};
use crate::domains::{
	admin::AdminCmd, auth::AuthCmd, config::ConfigCmd, logs::LogsCmd, resource::ResourceCmd,
	search::SearchArgs, tree::TreeArgs,
};

#[derive(Parser, Debug)]
#[command(name = "docshelf", about = "Browse, search and edit documents on a docshelf server")]
struct Cli {
	/// Path to the docshelf data directory
	#[arg(long)]
	data_dir: Option<PathBuf>,

	/// Server URL, overriding the config file for this invocation
	#[arg(long)]
	api_url: Option<String>,

	/// Output format
	#[arg(long, value_enum, default_value = "human")]
	format: OutputFormat,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Show the file tree of every repository
	Tree(TreeArgs),
	/// Search resources by term and tags
	Search(SearchArgs),
	/// Resource operations
	#[command(subcommand)]
	Resource(ResourceCmd),
	/// Log in and out
	#[command(subcommand)]
	Auth(AuthCmd),
	/// Users, groups, permissions and roles
	#[command(subcommand)]
	Admin(AdminCmd),
	/// Client configuration
	#[command(subcommand)]
	Config(ConfigCmd),
	/// Client logs
	#[command(subcommand)]
	Logs(LogsCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	let data_dir = match cli.data_dir {
		Some(data_dir) => data_dir,
		None => config::default_data_dir()?,
	};

	let mut client_config = ClientConfig::load(&data_dir)
		.await
		.with_context(|| format!("Failed to load config from {}", data_dir.display()))?;
	client_config.apply_overrides(cli.api_url);

	let _guard = init_logger(&data_dir, &client_config.log_level)?;

	let mut ctx = Context::new(Docshelf::new(client_config), cli.format, data_dir);

	match cli.command {
		Commands::Tree(args) => domains::tree::run(&ctx, args).await,
		Commands::Search(args) => domains::search::run(&ctx, args).await,
		Commands::Resource(cmd) => domains::resource::run(&ctx, cmd).await,
		Commands::Auth(cmd) => domains::auth::run(&mut ctx, cmd).await,
		Commands::Admin(cmd) => domains::admin::run(&ctx, cmd).await,
		Commands::Config(cmd) => domains::config::run(&ctx, cmd).await,
		Commands::Logs(cmd) => domains::logs::run(&ctx, cmd).await,
	}
}
