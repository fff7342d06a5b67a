use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use ds_core::config::ClientConfig;

use crate::context::{Context, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
	/// Show all configuration
	Show,
	/// Get a configuration value
	Get {
		/// Configuration key (e.g., "api_url", "return_limit")
		key: String,
	},
	/// Set a configuration value
	Set {
		/// Configuration key
		key: String,
		/// Configuration value
		value: String,
	},
}

const KEYS: [&str; 5] = ["api_url", "user_id", "return_limit", "with_data", "log_level"];

fn get(config: &ClientConfig, key: &str) -> Result<String> {
	Ok(match key {
		"api_url" => config.api_url.clone(),
		"user_id" => config
			.user_id
			.clone()
			.unwrap_or_else(|| "(not set)".to_string()),
		"return_limit" => config.return_limit.to_string(),
		"with_data" => config.with_data.to_string(),
		"log_level" => config.log_level.clone(),
		_ => bail!("Unknown config key: {key}"),
	})
}

fn set(config: &mut ClientConfig, key: &str, value: String) -> Result<()> {
	match key {
		"api_url" => config.api_url = value,
		"user_id" => config.user_id = Some(value).filter(|user| !user.is_empty()),
		"return_limit" => {
			config.return_limit = value
				.parse()
				.map_err(|e| anyhow!("Invalid return_limit '{value}': {e}"))?
		}
		"with_data" => {
			config.with_data = value
				.parse()
				.map_err(|e| anyhow!("Invalid with_data '{value}': {e}"))?
		}
		"log_level" => config.log_level = value,
		_ => bail!("Cannot set key: {key}"),
	}

	Ok(())
}

pub async fn run(ctx: &Context, cmd: ConfigCmd) -> Result<()> {
	// Overrides from the environment or command line are never written back.
	let mut config = ClientConfig::load_stored(&ctx.data_dir).await?;

	match cmd {
		ConfigCmd::Show => {
			if matches!(ctx.format, OutputFormat::Json) {
				crate::util::output::print_json(&config)?;
				return Ok(());
			}

			let mut table = Table::new();
			table.load_preset(UTF8_BORDERS_ONLY);
			table.set_header(vec!["Key", "Value"]);
			for key in KEYS {
				table.add_row(vec![key.to_string(), get(&config, key)?]);
			}
			table.add_row(vec![
				"auth_token".to_string(),
				if config.auth_token.is_some() { "(set)" } else { "(not set)" }.to_string(),
			]);

			println!("{table}");
			println!();
			println!("Config file: {}", ClientConfig::path(&ctx.data_dir).display());
		}
		ConfigCmd::Get { key } => {
			println!("{}", get(&config, &key)?);
		}
		ConfigCmd::Set { key, value } => {
			set(&mut config, &key, value)?;
			config.save(&ctx.data_dir).await?;
			println!("Set {key} = {}", get(&config, &key)?);
		}
	}

	Ok(())
}
