//! Perfx landing page.
//!
//! Renders the marketing sections as HTML and owns one waitlist form per
//! page session:
//! - Hero banner with the call to action pointing at the waitlist
//! - "The Solution" feature cards
//! - Solana pitch
//! - Waitlist form, rendered from the live submission state

mod data;
mod sections;

use std::sync::Arc;

use perp_core::{PageConfig, SubmissionState, SubmitOutcome, WaitlistForm, WaitlistStore};
use perp_observability::{SessionId, StructuredLogger};

pub use data::*;
pub use sections::{render_hero, render_pitch, render_solution, render_waitlist};

/// Render the whole document for a given waitlist state.
pub fn render_page(page: &PageConfig, content: &LandingContent, state: &SubmissionState) -> String {
    let body = [
        render_hero(&content.hero),
        render_solution(&content.solution),
        render_pitch(&content.pitch),
        render_waitlist(&content.waitlist, state),
    ]
    .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="{}">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
<main>
{}
</main>
<footer class="site-footer">
    <p>&copy; {}. All rights reserved.</p>
</footer>
</body>
</html>"#,
        sections::html_escape(&page.description),
        sections::html_escape(&page.title),
        LANDING_STYLES,
        body,
        sections::html_escape(&content.hero.brand)
    )
}

/// One visitor's page session: static content plus its waitlist form.
pub struct LandingSession {
    page: PageConfig,
    content: LandingContent,
    form: WaitlistForm,
}

impl LandingSession {
    /// Start a session with default content.
    pub fn new(page: PageConfig, store: Arc<dyn WaitlistStore>) -> Self {
        Self::with_logger(page, store, StructuredLogger::new(SessionId::generate()))
    }

    /// Start a session logging through `logger`.
    pub fn with_logger(
        page: PageConfig,
        store: Arc<dyn WaitlistStore>,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            page,
            content: LandingContent::default(),
            form: WaitlistForm::with_logger(store, logger),
        }
    }

    /// Replace the default marketing content.
    pub fn with_content(mut self, content: LandingContent) -> Self {
        self.content = content;
        self
    }

    pub fn form(&self) -> &WaitlistForm {
        &self.form
    }

    /// Keystroke in the email field.
    pub fn type_email(&self, value: impl Into<String>) {
        self.form.set_email(value);
    }

    /// Click on the submit button.
    ///
    /// A disabled button does nothing; the form enforces the same rule.
    pub async fn click_submit(&self) -> SubmitOutcome {
        self.form.submit().await
    }

    /// Current full page.
    pub fn render(&self) -> String {
        render_page(&self.page, &self.content, &self.form.snapshot())
    }

    /// Current waitlist section only.
    pub fn render_waitlist(&self) -> String {
        render_waitlist(&self.content.waitlist, &self.form.snapshot())
    }
}

const LANDING_STYLES: &str = r##"
:root {
    --bg: #000000;
    --fg: #ffffff;
    --muted: rgba(255, 255, 255, 0.6);
    --border: rgba(255, 255, 255, 0.2);
    --success: #4ade80;
    --error: #f87171;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    font-weight: 300;
    background: var(--bg);
    color: var(--fg);
    line-height: 1.6;
}

section { padding: 6rem 2rem; }

.hero { min-height: 100vh; display: flex; align-items: center; justify-content: center; text-align: center; }
.hero-brand { font-family: Georgia, serif; font-size: 8rem; font-weight: 300; letter-spacing: -0.05em; }
.hero-tagline { font-size: 1.5rem; color: var(--muted); margin-bottom: 2.5rem; }
.hero-actions { display: flex; gap: 1rem; justify-content: center; flex-wrap: wrap; }

.btn-outline, .btn-primary {
    padding: 0.875rem 2rem;
    border-radius: 9999px;
    text-decoration: none;
    font-size: 1.125rem;
}
.btn-outline { color: var(--fg); border: 1px solid var(--border); }
.btn-primary { background: var(--fg); color: var(--bg); }

.section-header { text-align: center; max-width: 720px; margin: 0 auto 4rem; }
.section-header h2, .pitch h2, .waitlist h2 { font-family: Georgia, serif; font-size: 3rem; font-weight: 300; margin-bottom: 1.5rem; }
.section-header p, .pitch p, .waitlist p { color: var(--muted); font-size: 1.25rem; }

.features-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 2rem;
    max-width: 1200px;
    margin: 0 auto;
}
.feature-card { padding: 2rem; border: 1px solid var(--border); }
.feature-title { font-size: 1.25rem; font-weight: 400; margin-bottom: 0.75rem; }
.feature-description { color: var(--muted); }

.pitch-copy { max-width: 720px; margin: 0 auto; }

.waitlist-content { max-width: 560px; margin: 0 auto; text-align: center; }
.form-group { display: flex; gap: 0.75rem; margin-top: 2rem; }
.form-group input {
    flex: 1;
    height: 3.5rem;
    padding: 0 1.5rem;
    border-radius: 9999px;
    border: 1px solid var(--border);
    background: rgba(0, 0, 0, 0.3);
    color: var(--fg);
    font-size: 1rem;
}
.form-group button {
    height: 3.5rem;
    padding: 0 2rem;
    border: none;
    border-radius: 9999px;
    background: var(--fg);
    color: var(--bg);
    font-size: 1.125rem;
    cursor: pointer;
}
.form-group button:disabled, .form-group input:disabled { opacity: 0.6; cursor: not-allowed; }
.waitlist-success { margin-top: 1.5rem; color: var(--success); }
.waitlist-error { margin-top: 1.5rem; color: var(--error); }

.site-footer { padding: 2rem; text-align: center; color: var(--muted); font-size: 0.875rem; border-top: 1px solid var(--border); }

@media (max-width: 768px) {
    .hero-brand { font-size: 4.5rem; }
    .form-group { flex-direction: column; }
}
"##;
