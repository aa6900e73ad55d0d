//! Render the landing page.

use anyhow::{Context as _, Result};
use perp_core::SubmissionState;
use perp_landing::{render_page, LandingContent};

use super::RenderArgs;
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let html = render_page(
        &ctx.config.page,
        &LandingContent::default(),
        &SubmissionState::default(),
    );

    match args.out {
        Some(out) => {
            let path = ctx.resolve_path(&out);
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.wrote_page(&path, html.len());
        }
        None => println!("{}", html),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_writes_page_relative_to_cwd() {
        let ctx = Context::for_tests();
        let name = format!("perp-render-{}.html", ctx.logger.session_id());

        run(RenderArgs { out: Some(name.clone()) }, &ctx).await.unwrap();

        let path = ctx.cwd.join(&name);
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"data-phase="idle""#));
        std::fs::remove_file(path).unwrap();
    }
}
