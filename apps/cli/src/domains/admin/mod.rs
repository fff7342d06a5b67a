mod args;

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use ds_core::api::{
	admin::{group, permission, role, user},
	Group, Permission, User,
};

use crate::context::{Context, OutputFormat};
use crate::util::prelude::*;

pub use self::args::*;

#[derive(Subcommand, Debug)]
pub enum AdminCmd {
	/// User management
	#[command(subcommand)]
	User(UserCmd),
	/// Group management
	#[command(subcommand)]
	Group(GroupCmd),
	/// Permission management
	#[command(subcommand)]
	Permission(PermissionCmd),
	/// Roles of a user
	Roles { repo: String, user: String },
}

pub async fn run(ctx: &Context, cmd: AdminCmd) -> Result<()> {
	let config = ctx.request_config();
	let json = matches!(ctx.format, OutputFormat::Json);

	match cmd {
		AdminCmd::User(cmd) => match cmd {
			UserCmd::List { repo, user } => {
				let users = user::get(&config, &repo, user.as_deref()).await?;
				print_output!(ctx, &users, |users: &Vec<User>| print_users(users));
			}
			UserCmd::Add {
				repo,
				user,
				password,
				confirm,
			} => {
				user::add(&config, &repo, &user, &password, &confirm).await?;
				print_done(json, format!("Created user {user}"))?;
			}
			UserCmd::Remove { repo, user } => {
				user::remove(&config, &repo, &user).await?;
				print_done(json, format!("Removed user {user}"))?;
			}
		},
		AdminCmd::Group(cmd) => match cmd {
			GroupCmd::List { repo, group } => {
				let groups = group::get(&config, &repo, group.as_deref()).await?;
				print_output!(ctx, &groups, |groups: &Vec<Group>| print_groups(groups));
			}
			GroupCmd::Add { repo, group, name } => {
				group::add(&config, &repo, &group, name.as_deref().unwrap_or(&group)).await?;
				print_done(json, format!("Created group {group}"))?;
			}
			GroupCmd::Remove { repo, group } => {
				group::remove(&config, &repo, &group).await?;
				print_done(json, format!("Removed group {group}"))?;
			}
			GroupCmd::Rename {
				repo,
				group,
				new_name,
			} => {
				group::rename(&config, &repo, &group, &new_name).await?;
				print_done(json, format!("Renamed group {group} to {new_name}"))?;
			}
			GroupCmd::AddUser { repo, group, user } => {
				group::add_user(&config, &repo, &group, &user).await?;
				print_done(json, format!("Added {user} to {group}"))?;
			}
			GroupCmd::RemoveUser { repo, group, user } => {
				group::remove_user(&config, &repo, &group, &user).await?;
				print_done(json, format!("Removed {user} from {group}"))?;
			}
		},
		AdminCmd::Permission(cmd) => match cmd {
			PermissionCmd::List { repo, holder } => {
				let permissions = permission::get(&config, &repo, holder.holder()).await?;
				print_output!(ctx, &permissions, |permissions: &Vec<Permission>| {
					print_permissions(permissions)
				});
			}
			PermissionCmd::Grant {
				repo,
				holder,
				permission,
				path,
			} => {
				permission::add(&config, &repo, holder.holder(), &permission, &path).await?;
				print_done(json, format!("Granted {permission} on {path}"))?;
			}
			PermissionCmd::Revoke {
				repo,
				holder,
				permission,
				path,
			} => {
				permission::remove(&config, &repo, holder.holder(), &permission, &path).await?;
				print_done(json, format!("Revoked {permission} on {path}"))?;
			}
		},
		AdminCmd::Roles { repo, user } => {
			let roles = role::get(&config, &repo, &user).await?;
			print_output!(ctx, &roles, |roles: &Vec<String>| {
				if roles.is_empty() {
					println!("{user} has no roles in {repo}");
				}
				for role in roles {
					println!("{role}");
				}
			});
		}
	}

	Ok(())
}

fn print_users(users: &[User]) {
	if users.is_empty() {
		println!("No users found");
		return;
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["User", "Roles", "Groups", "Permissions"]);
	for user in users {
		table.add_row(vec![
			user.user_id.clone(),
			user.roles.join(", "),
			user.groups.join(", "),
			user.permissions.len().to_string(),
		]);
	}

	println!("{table}");
}

fn print_groups(groups: &[Group]) {
	if groups.is_empty() {
		println!("No groups found");
		return;
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Group", "Name", "Members", "Permissions"]);
	for group in groups {
		table.add_row(vec![
			group.group_id.clone(),
			group.name.clone(),
			group.users.join(", "),
			group.permissions.len().to_string(),
		]);
	}

	println!("{table}");
}

fn print_permissions(permissions: &[Permission]) {
	if permissions.is_empty() {
		println!("No permissions found");
		return;
	}

	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Permission", "Path"]);
	for permission in permissions {
		table.add_row(vec![permission.id.clone(), permission.path.clone()]);
	}

	println!("{table}");
}
