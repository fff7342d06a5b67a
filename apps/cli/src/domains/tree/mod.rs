use anyhow::{bail, Result};
use clap::Args;
use ds_core::{api::ContentGroup, tree::TreeSnapshot};

use crate::context::Context;
use crate::util::prelude::*;

#[derive(Args, Debug)]
pub struct TreeArgs {
	/// Only show this repository
	#[arg(long)]
	pub repo: Option<String>,
}

pub async fn run(ctx: &Context, args: TreeArgs) -> Result<()> {
	let snapshot = ctx.shelf.reload().await?;

	match &args.repo {
		Some(repo) => {
			let Some(root) = snapshot.root(repo) else {
				bail!("Repository '{repo}' not found or not visible to you");
			};
			print_output!(ctx, root, |root: &ContentGroup| print_group(root, 0));
		}
		None => {
			print_output!(ctx, &*snapshot, |snapshot: &TreeSnapshot| {
				if snapshot.is_empty() {
					println!("No resources found");
					return;
				}

				for repo in snapshot.repositories() {
					println!("{repo}");
					if let Some(root) = snapshot.root(repo) {
						print_group(root, 1);
					}
				}
			});
		}
	}

	Ok(())
}

fn print_group(group: &ContentGroup, depth: usize) {
	let indent = "  ".repeat(depth);

	for (name, child) in &group.children {
		println!("{indent}{name}/");
		print_group(child, depth + 1);
	}

	for resource in &group.resources {
		let name = resource.path.rsplit('/').next().unwrap_or(&resource.path);
		if resource.is_editable {
			println!("{indent}{name}");
		} else {
			println!("{indent}{name} (read only)");
		}
	}
}
