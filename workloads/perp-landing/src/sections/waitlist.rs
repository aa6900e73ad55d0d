//! Waitlist signup section.
//!
//! Rendered from the current [`SubmissionState`]: while a submission is in
//! flight both the input and the button are disabled, which is what keeps
//! a visitor from triggering a second write.

use perp_core::SubmissionState;

use super::html_escape;
use crate::data::WaitlistCopy;

/// Render the waitlist form for the given state.
pub fn render_waitlist(copy: &WaitlistCopy, state: &SubmissionState) -> String {
    let disabled = if state.controls_enabled() { "" } else { " disabled" };
    let button_text = if state.is_submitting {
        &copy.submitting_text
    } else {
        &copy.submit_text
    };

    let feedback = state
        .feedback()
        .map(|feedback| {
            let class = if feedback.is_error() {
                "waitlist-error"
            } else {
                "waitlist-success"
            };
            let role = if feedback.is_error() { "alert" } else { "status" };
            format!(
                r#"
            <p class="{}" role="{}">{}</p>"#,
                class,
                role,
                html_escape(feedback.text())
            )
        })
        .unwrap_or_default();

    format!(
        r#"<section class="waitlist" id="waitlist" data-section="waitlist" data-phase="{}">
    <div class="waitlist-content">
        <h2>{}</h2>
        <p>{}</p>
        <form class="waitlist-form" id="waitlist-form" method="POST">
            <div class="form-group">
                <input
                    type="email"
                    name="email"
                    value="{}"
                    placeholder="{}"
                    required
                    aria-label="Email address"{}
                >
                <button type="submit"{}>{}</button>
            </div>{}
        </form>
    </div>
</section>"#,
        state.phase().as_str(),
        html_escape(&copy.headline),
        html_escape(&copy.subheadline),
        html_escape(&state.email),
        html_escape(&copy.placeholder),
        disabled,
        disabled,
        html_escape(button_text),
        feedback
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use perp_core::{FALLBACK_ERROR_MESSAGE, JOINED_MESSAGE};

    fn copy() -> WaitlistCopy {
        WaitlistCopy::default()
    }

    #[test]
    fn test_idle_form() {
        let html = render_waitlist(&copy(), &SubmissionState::default());
        assert!(html.contains(r#"data-phase="idle""#));
        assert!(html.contains("required"));
        assert!(html.contains(">Join Now</button>"));
        assert!(!html.contains("disabled"));
        assert!(!html.contains("waitlist-success"));
        assert!(!html.contains("waitlist-error"));
    }

    #[test]
    fn test_submitting_disables_controls() {
        let state = SubmissionState {
            email: "a@b.com".to_string(),
            is_submitting: true,
            ..Default::default()
        };
        let html = render_waitlist(&copy(), &state);
        assert_eq!(html.matches(" disabled").count(), 2);
        assert!(html.contains(">Joining...</button>"));
        assert!(html.contains(r#"value="a@b.com""#));
    }

    #[test]
    fn test_success_message() {
        let state = SubmissionState {
            is_submitted: true,
            ..Default::default()
        };
        let html = render_waitlist(&copy(), &state);
        assert!(html.contains(JOINED_MESSAGE));
        assert!(html.contains(r#"role="status""#));
        assert!(html.contains(r#"value="""#));
    }

    #[test]
    fn test_error_message_is_escaped() {
        let state = SubmissionState {
            email: "bad".to_string(),
            error: Some(r#"<script>"x"</script>"#.to_string()),
            ..Default::default()
        };
        let html = render_waitlist(&copy(), &state);
        assert!(html.contains("&lt;script&gt;&quot;x&quot;&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"role="alert""#));
    }

    #[test]
    fn test_fallback_error_rendered() {
        let state = SubmissionState {
            error: Some(FALLBACK_ERROR_MESSAGE.to_string()),
            ..Default::default()
        };
        let html = render_waitlist(&copy(), &state);
        assert!(html.contains(FALLBACK_ERROR_MESSAGE));
        assert!(html.contains(r#"data-phase="failed""#));
    }
}
