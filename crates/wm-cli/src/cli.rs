//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Waymark - versioned SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "wm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (database connection)
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Override the database path
    #[arg(long, global = true, env = "WAYMARK_DATABASE")]
    pub database: Option<String>,

    /// Override the migrations directory
    #[arg(long, global = true)]
    pub migrations_dir: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply (up) or revert (down) migrations
    Migrate(MigrateArgs),

    /// Create an empty up/down migration pair
    Create(CreateArgs),

    /// Show which migrations are applied
    Status(StatusArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Direction to migrate: up or down
    pub direction: String,

    /// Target version (YYYY-MM-DD-hh:mm:ss), defaults to now
    #[arg(long = "version", value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Show the plan without executing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Descriptive migration name (letters, digits, '_' and '-')
    #[arg(short, long)]
    pub name: String,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Human-readable table
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
