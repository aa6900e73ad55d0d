//! Terminal and JSON rendering of waitlist results.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use perp_core::{Feedback, LandingConfig, SubmissionState};
use serde::Serialize;

/// `perp join` result as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct JoinReport<'a> {
    pub email: &'a str,
    pub phase: &'static str,
    pub joined: bool,
    pub message: Option<String>,
}

impl<'a> JoinReport<'a> {
    pub fn new(email: &'a str, state: &SubmissionState) -> Self {
        Self {
            email,
            phase: state.phase().as_str(),
            joined: state.is_submitted,
            message: state.feedback().map(|f| f.text().to_string()),
        }
    }
}

/// `perp config` result as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct ConfigReport<'a> {
    pub config: &'a LandingConfig,
    pub issues: Vec<&'static str>,
}

/// Printer for command results; quiet outside JSON mode's one document.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print the feedback line the form would show.
    pub fn feedback(&self, feedback: &Feedback) {
        if self.json {
            return;
        }
        match feedback {
            Feedback::Joined => println!("{} {}", style("✓").green(), feedback.text()),
            Feedback::Error(message) => {
                eprintln!("{} {}", style("✗").red(), style(message).red())
            }
        }
    }

    /// Print the outcome of a join attempt.
    pub fn join_report(&self, report: &JoinReport<'_>) {
        if self.json {
            self.json(report);
            return;
        }
        self.debug(&format!("{} finished in phase {}", report.email, report.phase));
    }

    /// Print the effective configuration and anything missing from it.
    pub fn config_report(&self, report: &ConfigReport<'_>) {
        if self.json {
            self.json(report);
            return;
        }

        let backend = &report.config.backend;
        println!("\n{}", style("Backend").bold().underlined());
        self.field("url", &backend.url);
        self.field("anon_key", &backend.anon_key);
        self.field("table", &backend.table);

        let page = &report.config.page;
        println!("\n{}", style("Page").bold().underlined());
        self.field("title", &page.title);
        self.field("description", &page.description);

        println!();
        if report.issues.is_empty() {
            println!("{} Backend configuration complete", style("✓").green());
        }
        for var in &report.issues {
            eprintln!("{} {} is not set", style("⚠").yellow(), style(var).bold());
        }
    }

    /// Confirm a rendered page was written to disk.
    pub fn wrote_page(&self, path: &Path, bytes: usize) {
        if self.json {
            self.json(&serde_json::json!({ "path": path.display().to_string(), "bytes": bytes }));
            return;
        }
        println!("{} Wrote {} bytes to {}", style("✓").green(), bytes, path.display());
    }

    /// Print a failure that ends the command.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a diagnostic (verbose mode only).
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    /// Spinner shown while the store call is pending, labelled with the
    /// button's busy text.
    pub fn submitting(&self, label: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn field(&self, key: &str, value: &str) {
        let value = if value.is_empty() {
            style("(empty)").dim().to_string()
        } else {
            value.to_string()
        };
        println!("  {}: {}", style(key).dim(), value);
    }

    fn json<T: Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_report_after_rejection() {
        let state = SubmissionState {
            email: "bad".to_string(),
            error: Some("duplicate email".to_string()),
            ..Default::default()
        };
        let report = JoinReport::new("bad", &state);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "email": "bad",
                "phase": "failed",
                "joined": false,
                "message": "duplicate email",
            })
        );
    }

    #[test]
    fn test_join_report_after_success() {
        let state = SubmissionState {
            is_submitted: true,
            ..Default::default()
        };
        let report = JoinReport::new("a@b.com", &state);
        assert_eq!(report.phase, "success");
        assert!(report.joined);
        assert_eq!(report.message.as_deref(), Some(perp_core::JOINED_MESSAGE));
    }
}
