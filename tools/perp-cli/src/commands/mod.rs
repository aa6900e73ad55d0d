//! CLI command implementations.

pub mod config;
pub mod join;
pub mod render;

use clap::Args;

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Write the HTML to this file instead of stdout.
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Arguments for the join command.
#[derive(Args)]
pub struct JoinArgs {
    /// Email address to put on the waitlist.
    pub email: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Show the anon key unredacted.
    #[arg(long)]
    pub show_key: bool,
}
