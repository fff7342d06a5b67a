mod args;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use ds_core::{
	api::Resource,
	editor::{Decision, EditSession, MetadataChange},
	tree::ResourceKey,
	Error,
};
use serde::Serialize;
use tokio::fs;
use tracing::warn;

use crate::context::Context;
use crate::util::prelude::*;

pub use self::args::*;

#[derive(Subcommand, Debug)]
pub enum ResourceCmd {
	/// Show a document and its metadata
	Show {
		#[command(flatten)]
		target: ResourceTarget,
		/// Only print the document content
		#[arg(long, default_value_t = false)]
		raw: bool,
	},
	/// Create a new markdown document
	Add(AddArgs),
	/// Delete a document
	Remove(ResourceTarget),
	/// Move or rename a document
	Move(MoveArgs),
	/// Replace content or metadata while holding the edit marker
	Edit(EditArgs),
	/// Show who is currently editing a document
	Editor(ResourceTarget),
}

#[derive(Serialize)]
struct EditorOutput {
	repo_id: String,
	path: String,
	editing_user: Option<String>,
}

pub async fn run(ctx: &Context, cmd: ResourceCmd) -> Result<()> {
	let json = matches!(ctx.format, crate::context::OutputFormat::Json);

	match cmd {
		ResourceCmd::Show { target, raw } => {
			let key = ctx.key(&target.repo, &target.path);
			ctx.shelf.reload().await?;
			let resource = ctx
				.shelf
				.tree()
				.find(&key)
				.ok_or_else(|| anyhow!("Resource {key} not found"))?;

			if raw {
				print!("{}", resource.data.unwrap_or_default());
				return Ok(());
			}

			print_output!(ctx, &resource, |resource: &Resource| print_resource(resource));
		}
		ResourceCmd::Add(args) => {
			let key = ctx.key(&args.target.repo, &args.target.path);
			let content = match &args.file {
				Some(file) => fs::read_to_string(file).await?,
				None => String::new(),
			};

			ctx.shelf
				.add_resource(&key, content, args.category, args.tags)
				.await?;
			print_done(json, format!("Added {key}"))?;
		}
		ResourceCmd::Remove(target) => {
			let key = ctx.key(&target.repo, &target.path);
			ctx.shelf.remove_resource(&key).await?;
			print_done(json, format!("Removed {key}"))?;
		}
		ResourceCmd::Move(args) => {
			let from = ctx.key(&args.from.repo, &args.from.path);
			let to = ctx.key(args.to_repo.as_deref().unwrap_or(&args.from.repo), &args.to);
			ctx.shelf.move_resource(&from, &to).await?;
			print_done(json, format!("Moved {from} to {to}"))?;
		}
		ResourceCmd::Edit(args) => {
			let key = ctx.key(&args.target.repo, &args.target.path);
			let content = match &args.file {
				Some(file) => Some(fs::read_to_string(file).await?),
				None => None,
			};

			let mut session = ctx.shelf.edit_session()?;
			if let Err(e) = edit(&mut session, key.clone(), content, &args).await {
				// Never leave our marker behind on a failed edit.
				if session.is_dirty() {
					session.discard()?;
				}
				if let Err(close_err) = session.close().await {
					warn!(?close_err, "Failed to release edit marker after error;");
				}
				return Err(e.into());
			}

			ctx.shelf.reload().await?;
			print_done(json, format!("Saved {key}"))?;
		}
		ResourceCmd::Editor(target) => {
			let key = ctx.key(&target.repo, &target.path);
			let editing_user = ctx.shelf.backend().editing_user(&key).await?;

			print_output!(
				ctx,
				&EditorOutput {
					repo_id: key.repo_id.clone(),
					path: key.path.clone(),
					editing_user,
				},
				|output: &EditorOutput| match &output.editing_user {
					Some(user) => println!("{key} is being edited by {user}"),
					None => println!("Nobody is editing {key}"),
				}
			);
		}
	}

	Ok(())
}

async fn edit(
	session: &mut EditSession,
	key: ResourceKey,
	content: Option<String>,
	args: &EditArgs,
) -> Result<(), Error> {
	session.open(key).await?;

	if let Some(content) = content {
		session.edit(content)?;
	}

	if args.has_metadata() {
		session
			.update_metadata(MetadataChange {
				tags_to_add: args.add_tag.clone(),
				tags_to_remove: args.remove_tag.clone(),
				category: args.category.clone(),
				..Default::default()
			})
			.await?;
	}

	session.leave(Decision::Save).await?;

	Ok(())
}

fn print_resource(resource: &Resource) {
	println!("{}:{}", resource.repo_id, resource.path);
	println!(
		"  created:       {} by {}",
		format_timestamp(&resource.created_at),
		resource.created_by
	);
	println!(
		"  last modified: {} by {}",
		format_timestamp(&resource.last_modified_at),
		resource.last_modified_by
	);
	if let Some(category) = &resource.category {
		println!("  category:      {category}");
	}
	if !resource.tags.is_empty() {
		println!("  tags:          {}", tags_cell(resource));
	}
	if !resource.is_editable {
		println!("  read only");
	}

	if let Some(data) = &resource.data {
		println!();
		println!("{data}");
	}
}
