//! CLI module for the users API
//!
//! Provides subcommands:
//! - `serve`: HTTP server
//! - `create-user`: add a user to the configured store
//! - `migrate`: apply or revert the PostgreSQL schema

pub mod create_user;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Users API - user directory behind token introspection
#[derive(Parser)]
#[command(name = "users-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Create a user directly in storage
    CreateUser(create_user::CreateUserArgs),

    /// Run PostgreSQL schema migrations
    Migrate(migrate::MigrateArgs),
}
