pub mod admin;
pub mod auth;
pub mod config;
pub mod logs;
pub mod resource;
pub mod search;
pub mod tree;
