use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ResourceTarget {
	/// Repository id
	pub repo: String,
	/// Path of the document inside the repository
	pub path: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
	#[command(flatten)]
	pub target: ResourceTarget,

	/// Local markdown file to upload, empty document when omitted
	#[arg(long)]
	pub file: Option<PathBuf>,

	/// Category of the new document
	#[arg(long)]
	pub category: Option<String>,

	/// Tag id to attach (can be specified multiple times)
	#[arg(long = "tag")]
	pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
	#[command(flatten)]
	pub from: ResourceTarget,

	/// New path
	pub to: String,

	/// Target repository, defaults to the source repository
	#[arg(long)]
	pub to_repo: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
	#[command(flatten)]
	pub target: ResourceTarget,

	/// Replace the content with this local file
	#[arg(long)]
	pub file: Option<PathBuf>,

	/// Tag to add (can be specified multiple times)
	#[arg(long)]
	pub add_tag: Vec<String>,

	/// Tag to remove (can be specified multiple times)
	#[arg(long)]
	pub remove_tag: Vec<String>,

	/// Replace the category
	#[arg(long)]
	pub category: Option<String>,
}

impl EditArgs {
	pub fn has_metadata(&self) -> bool {
		!self.add_tag.is_empty() || !self.remove_tag.is_empty() || self.category.is_some()
	}
}
