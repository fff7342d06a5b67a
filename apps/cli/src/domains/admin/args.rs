use clap::{Args, Subcommand};
use ds_core::api::admin::permission::Holder;

#[derive(Subcommand, Debug)]
pub enum UserCmd {
	/// List users, or show one
	List {
		repo: String,
		#[arg(long)]
		user: Option<String>,
	},
	/// Create a user
	Add {
		repo: String,
		user: String,
		#[arg(long)]
		password: String,
		/// Must match --password
		#[arg(long)]
		confirm: String,
	},
	/// Delete a user
	Remove { repo: String, user: String },
}

#[derive(Subcommand, Debug)]
pub enum GroupCmd {
	/// List groups, or show one
	List {
		repo: String,
		#[arg(long)]
		group: Option<String>,
	},
	/// Create a group
	Add {
		repo: String,
		group: String,
		/// Display name, defaults to the group id
		#[arg(long)]
		name: Option<String>,
	},
	/// Delete a group
	Remove { repo: String, group: String },
	/// Change the display name of a group
	Rename {
		repo: String,
		group: String,
		new_name: String,
	},
	/// Add a member
	AddUser {
		repo: String,
		group: String,
		user: String,
	},
	/// Remove a member
	RemoveUser {
		repo: String,
		group: String,
		user: String,
	},
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct HolderArgs {
	/// Permissions of this user
	#[arg(long)]
	pub user: Option<String>,
	/// Permissions of this group
	#[arg(long)]
	pub group: Option<String>,
}

impl HolderArgs {
	pub fn holder(&self) -> Holder<'_> {
		match (&self.user, &self.group) {
			(Some(user), _) => Holder::User(user),
			(None, Some(group)) => Holder::Group(group),
			// clap enforces exactly one of the two.
			(None, None) => Holder::User(""),
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum PermissionCmd {
	/// List permissions
	List {
		repo: String,
		#[command(flatten)]
		holder: HolderArgs,
	},
	/// Grant a permission on a path
	Grant {
		repo: String,
		#[command(flatten)]
		holder: HolderArgs,
		/// Permission type, e.g. READ or WRITE
		permission: String,
		path: String,
	},
	/// Revoke a permission on a path
	Revoke {
		repo: String,
		#[command(flatten)]
		holder: HolderArgs,
		permission: String,
		path: String,
	},
}
