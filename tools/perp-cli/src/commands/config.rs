//! Show the effective configuration.

use anyhow::Result;
use perp_core::LandingConfig;

use super::ConfigArgs;
use crate::context::Context;
use crate::output::ConfigReport;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    let shown = displayed_config(&ctx.config, args.show_key);
    ctx.output.config_report(&ConfigReport {
        config: &shown,
        issues: ctx.config.backend.issues(),
    });
    Ok(())
}

/// The config as printed: the anon key is masked unless asked for.
fn displayed_config(config: &LandingConfig, show_key: bool) -> LandingConfig {
    let mut shown = config.clone();
    if !show_key {
        shown.backend.anon_key = config.backend.redacted_key();
    }
    shown
}
