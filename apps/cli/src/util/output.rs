use anyhow::Result;
use chrono::{DateTime, Local};
use ds_core::api::Resource;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

/// Confirmation line for commands without a result, `{"ok":true}` in JSON mode.
pub fn print_done(json: bool, message: impl std::fmt::Display) -> Result<()> {
	if json {
		print_json(&serde_json::json!({ "ok": true, "message": message.to_string() }))
	} else {
		println!("{message}");
		Ok(())
	}
}

/// Backend timestamps are RFC 3339; anything else is shown as sent.
pub fn format_timestamp(raw: &str) -> String {
	match DateTime::parse_from_rfc3339(raw) {
		Ok(timestamp) => timestamp
			.with_timezone(&Local)
			.format("%Y-%m-%d %H:%M")
			.to_string(),
		Err(_) => raw.to_string(),
	}
}

pub fn tags_cell(resource: &Resource) -> String {
	resource
		.tags
		.values()
		.map(String::as_str)
		.collect::<Vec<_>>()
		.join(", ")
}
