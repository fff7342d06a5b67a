use clap::Args;

#[derive(Args, Debug)]
pub struct SearchArgs {
	/// Text to look for in paths and contents
	pub term: Option<String>,

	/// Only resources carrying this tag (can be specified multiple times)
	#[arg(long = "tag")]
	pub tags: Vec<String>,

	/// Skip resources carrying this tag (can be specified multiple times)
	#[arg(long = "exclude-tag")]
	pub exclude_tags: Vec<String>,

	/// Restrict to one repository
	#[arg(long)]
	pub repo: Option<String>,

	/// Restrict to a path inside the repository
	#[arg(long)]
	pub path: Option<String>,

	/// Print matches as a file tree instead of a table
	#[arg(long, default_value_t = false)]
	pub tree: bool,
}
