mod args;

use anyhow::Result;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use ds_core::{
	api::Resource,
	search::SearchResults,
	tag::TagState,
	tree::{ResourceKey, TreeSnapshot},
};
use std::collections::BTreeMap;

use crate::context::Context;
use crate::util::prelude::*;

pub use self::args::*;

pub async fn run(ctx: &Context, args: SearchArgs) -> Result<()> {
	let mut session = ctx.shelf.search_session();

	for tag in args.tags {
		session.set_tag(tag, TagState::Whitelisted);
	}
	// A tag given both ways ends up excluded.
	for tag in args.exclude_tags {
		session.set_tag(tag, TagState::Blacklisted);
	}
	session.set_search_term(args.term);
	session.set_repo(args.repo);
	session.set_path(args.path);

	let results = session.search().await?;

	if args.tree {
		print_output!(ctx, &results.tree(), |tree: &TreeSnapshot| {
			for resource in tree.resources() {
				println!("{}", ResourceKey::of(resource));
			}
		});
	} else {
		print_output!(
			ctx,
			&*results.resources,
			|_: &BTreeMap<String, Vec<Resource>>| print_table(&results)
		);
	}

	Ok(())
}

fn print_table(results: &SearchResults) {
	if results.is_empty() {
		println!("No resources found");
		return;
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Repository", "Path", "Category", "Tags", "Last modified"]);

	for resource in results.iter() {
		table.add_row(vec![
			resource.repo_id.clone(),
			resource.path.clone(),
			resource.category.clone().unwrap_or_default(),
			tags_cell(resource),
			format!(
				"{} by {}",
				format_timestamp(&resource.last_modified_at),
				resource.last_modified_by
			),
		]);
	}

	println!("{table}");
	println!("{} resources found", results.len());
}
