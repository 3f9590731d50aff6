//! CLI command implementations.

pub mod build;
pub mod common;
pub mod config;
pub mod info;
pub mod init;
pub mod install;
pub mod list;
pub mod publish;
pub mod uninstall;
pub mod validate;
