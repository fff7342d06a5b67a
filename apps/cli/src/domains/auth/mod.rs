use anyhow::{bail, Result};
use clap::Subcommand;
use ds_core::config::ClientConfig;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::context::{Context, OutputFormat};
use crate::util::prelude::*;

#[derive(Subcommand, Debug)]
pub enum AuthCmd {
	/// Log in and store the token in the config file
	Login {
		user_id: String,
		/// Read from stdin when omitted
		#[arg(long)]
		password: Option<String>,
	},
	/// Forget the stored user and token
	Logout,
	/// Show the configured user
	Whoami,
}

pub async fn run(ctx: &mut Context, cmd: AuthCmd) -> Result<()> {
	let json = matches!(ctx.format, OutputFormat::Json);

	match cmd {
		AuthCmd::Login { user_id, password } => {
			let password = match password {
				Some(password) => password,
				None => read_password().await?,
			};

			let token = ctx.shelf.login(&user_id, &password).await?;

			let mut stored = ClientConfig::load_stored(&ctx.data_dir).await?;
			stored.user_id = Some(user_id.clone());
			stored.auth_token = Some(token);
			stored.save(&ctx.data_dir).await?;

			print_done(json, format!("Logged in as {user_id}"))?;
		}
		AuthCmd::Logout => {
			ctx.shelf.logout().await;

			let mut stored = ClientConfig::load_stored(&ctx.data_dir).await?;
			stored.user_id = None;
			stored.auth_token = None;
			stored.save(&ctx.data_dir).await?;

			print_done(json, "Logged out")?;
		}
		AuthCmd::Whoami => {
			let user_id = ctx.user_id()?.to_string();
			print_output!(
				ctx,
				&serde_json::json!({ "user_id": user_id }),
				|_: &serde_json::Value| println!("{user_id}")
			);
		}
	}

	Ok(())
}

async fn read_password() -> Result<String> {
	eprint!("Password: ");

	let mut line = String::new();
	BufReader::new(io::stdin()).read_line(&mut line).await?;

	let password = line.trim_end_matches(&['\r', '\n'][..]).to_string();
	if password.is_empty() {
		bail!("No password given");
	}

	Ok(password)
}
