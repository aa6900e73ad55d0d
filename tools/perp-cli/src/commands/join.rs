//! Submit one email through the waitlist flow.

use std::sync::Arc;

use anyhow::{bail, Result};
use perp_core::{SkipReason, SubmitOutcome, WaitlistForm, WaitlistStore};
use perp_data::RestWaitlistStore;
use perp_landing::WaitlistCopy;

use super::JoinArgs;
use crate::context::Context;
use crate::output::JoinReport;

/// Run the join command.
pub async fn run(args: JoinArgs, ctx: &Context) -> Result<()> {
    let backend = &ctx.config.backend;
    backend.report_issues(&ctx.logger.for_component("config"));
    ctx.output.debug(&format!(
        "Inserting into {}/rest/v1/{}",
        backend.url.trim_end_matches('/'),
        backend.table
    ));

    join_with(Arc::new(RestWaitlistStore::new(backend)), &args.email, ctx).await
}

/// Submit `email` through a form backed by `store` and report the result.
///
/// Fails when the store did not acknowledge the write.
pub async fn join_with(store: Arc<dyn WaitlistStore>, email: &str, ctx: &Context) -> Result<()> {
    let form = WaitlistForm::with_logger(store, ctx.logger.clone());

    let spinner = ctx
        .output
        .submitting(&WaitlistCopy::default().submitting_text);
    let outcome = form.submit_email(email).await;
    spinner.finish_and_clear();

    let state = form.snapshot();
    ctx.output.join_report(&JoinReport::new(email, &state));
    if let Some(feedback) = state.feedback() {
        ctx.output.feedback(&feedback);
    }

    match outcome {
        SubmitOutcome::Joined => Ok(()),
        SubmitOutcome::Failed(message) => bail!("{}", message),
        SubmitOutcome::Skipped(SkipReason::EmptyEmail) => bail!("Email address is required"),
        SubmitOutcome::Skipped(SkipReason::InFlight) => bail!("A submission is already in flight"),
    }
}
