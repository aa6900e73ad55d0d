//! Waitlist submission state machine.
//!
//! ```text
//! Idle --submit--> Submitting --ok--> Success
//!                       |
//!                       +--fail--> Failed --submit--> Submitting
//! ```
//!
//! `is_submitted` is never reset, so a session that joined once keeps
//! showing it. A later submit still dispatches a write.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use perp_observability::{SessionId, StructuredLogger};
use serde::{Deserialize, Serialize};

use crate::entry::WaitlistEntry;
use crate::store::WaitlistStore;

/// Text shown once the store acknowledged the write.
pub const JOINED_MESSAGE: &str = "Thank you for joining our waitlist!";

/// Text shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to join waitlist. Please try again.";

/// Phases of the submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Success,
    Failed,
}

impl SubmissionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Success => "success",
            SubmissionPhase::Failed => "failed",
        }
    }
}

/// In-memory form state for one page session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionState {
    /// Current input value.
    pub email: String,
    /// True strictly between submission start and completion.
    pub is_submitting: bool,
    /// Set once the store acknowledged a write; never reset.
    pub is_submitted: bool,
    /// Message from the last failed attempt.
    pub error: Option<String>,
}

impl SubmissionState {
    /// Derive the state machine phase.
    pub fn phase(&self) -> SubmissionPhase {
        if self.is_submitting {
            SubmissionPhase::Submitting
        } else if self.error.is_some() {
            SubmissionPhase::Failed
        } else if self.is_submitted {
            SubmissionPhase::Success
        } else {
            SubmissionPhase::Idle
        }
    }

    /// Whether the submit control should be enabled.
    pub fn controls_enabled(&self) -> bool {
        !self.is_submitting
    }

    /// User-visible feedback for the current state, if any.
    ///
    /// The error from the latest attempt wins over an earlier success.
    pub fn feedback(&self) -> Option<Feedback> {
        match &self.error {
            Some(message) => Some(Feedback::Error(message.clone())),
            None if self.is_submitted => Some(Feedback::Joined),
            None => None,
        }
    }
}

/// Feedback line shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Joined,
    Error(String),
}

impl Feedback {
    pub fn text(&self) -> &str {
        match self {
            Feedback::Joined => JOINED_MESSAGE,
            Feedback::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// Why a submit call did not dispatch a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The required email field is empty.
    EmptyEmail,
    /// Another submission is still waiting on the store.
    InFlight,
}

/// Result of a single submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store acknowledged the write.
    Joined,
    /// The store failed; the message is what the form now shows.
    Failed(String),
    /// Nothing was sent.
    Skipped(SkipReason),
}

impl SubmitOutcome {
    pub fn is_joined(&self) -> bool {
        matches!(self, SubmitOutcome::Joined)
    }

    /// Whether a write was dispatched for this call.
    pub fn dispatched(&self) -> bool {
        !matches!(self, SubmitOutcome::Skipped(_))
    }
}

/// The waitlist form: input state plus the one side-effecting operation.
///
/// The guard and the transition into `Submitting` happen under the same
/// lock, so two overlapping calls on one form never issue two writes. The
/// lock is released while the store call is pending.
pub struct WaitlistForm {
    store: Arc<dyn WaitlistStore>,
    state: Mutex<SubmissionState>,
    logger: StructuredLogger,
}

impl WaitlistForm {
    /// Create a form for a fresh page session.
    pub fn new(store: Arc<dyn WaitlistStore>) -> Self {
        Self::with_logger(store, StructuredLogger::new(SessionId::generate()))
    }

    /// Create a form that logs through the given logger.
    pub fn with_logger(store: Arc<dyn WaitlistStore>, logger: StructuredLogger) -> Self {
        Self {
            store,
            state: Mutex::new(SubmissionState::default()),
            logger: logger.with_component("waitlist"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SubmissionState {
        self.lock().clone()
    }

    /// Current phase.
    pub fn phase(&self) -> SubmissionPhase {
        self.lock().phase()
    }

    /// Replace the input value (one keystroke).
    pub fn set_email(&self, value: impl Into<String>) {
        self.lock().email = value.into();
    }

    /// Type `email` into the field, then submit it.
    pub async fn submit_email(&self, email: impl Into<String>) -> SubmitOutcome {
        self.set_email(email);
        self.submit().await
    }

    /// Submit the current input value.
    ///
    /// Store failures never escape: they end up in the state's `error`
    /// field and in the returned outcome.
    pub async fn submit(&self) -> SubmitOutcome {
        let email = match self.begin() {
            Ok(email) => email,
            Err(reason) => {
                self.logger
                    .debug_builder("Submission skipped")
                    .field("reason", format!("{:?}", reason))
                    .emit();
                return SubmitOutcome::Skipped(reason);
            }
        };

        let guard = SubmitGuard::new(&self.state);
        let started = Instant::now();
        let result = self.store.insert(&WaitlistEntry::new(email)).await;

        match result {
            Ok(()) => {
                self.logger
                    .info_builder("Joined waitlist")
                    .duration_ms("latency_ms", started.elapsed())
                    .emit();
                guard.finish(|state| {
                    state.is_submitted = true;
                    state.email.clear();
                });
                SubmitOutcome::Joined
            }
            Err(err) => {
                let message = err
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
                self.logger
                    .error_builder("Error adding to waitlist")
                    .field("error", err.to_string())
                    .duration_ms("latency_ms", started.elapsed())
                    .emit();
                guard.finish(|state| state.error = Some(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Guard check and transition into `Submitting`.
    fn begin(&self) -> Result<String, SkipReason> {
        let mut state = self.lock();
        if state.is_submitting {
            return Err(SkipReason::InFlight);
        }
        if state.email.is_empty() {
            return Err(SkipReason::EmptyEmail);
        }
        state.is_submitting = true;
        state.error = None;
        Ok(state.email.clone())
    }
}

/// Marks one dispatched write. Clears `is_submitting` when dropped, so a
/// cancelled or panicking submit never leaves the form locked.
struct SubmitGuard<'a> {
    state: &'a Mutex<SubmissionState>,
    armed: bool,
}

impl<'a> SubmitGuard<'a> {
    fn new(state: &'a Mutex<SubmissionState>) -> Self {
        Self { state, armed: true }
    }

    fn lock(&self) -> MutexGuard<'a, SubmissionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the outcome and leave `Submitting` in one step.
    ///
    /// Disarms the guard: once the lock is released a new submission may
    /// already own `is_submitting`.
    fn finish(mut self, apply: impl FnOnce(&mut SubmissionState)) {
        {
            let mut state = self.lock();
            apply(&mut state);
            state.is_submitting = false;
        }
        self.armed = false;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.lock().is_submitting = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use perp_observability::{CapturedLogs, LogLevel};
    use std::collections::VecDeque;
    use tokio::sync::Notify;

    /// Store that answers from a script and records every entry it saw.
    #[derive(Default)]
    struct ScriptedStore {
        replies: Mutex<VecDeque<Result<(), StoreError>>>,
        seen: Mutex<Vec<WaitlistEntry>>,
    }

    impl ScriptedStore {
        fn replying(replies: Vec<Result<(), StoreError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<WaitlistEntry> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WaitlistStore for ScriptedStore {
        async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError> {
            self.seen.lock().unwrap().push(entry.clone());
            self.replies.lock().unwrap().pop_front().unwrap_or(Ok(()))
        }
    }

    /// Store that parks every insert until released.
    struct GatedStore {
        entered: Notify,
        release: Notify,
        calls: Mutex<usize>,
        reply: Result<(), StoreError>,
    }

    impl GatedStore {
        fn new(reply: Result<(), StoreError>) -> Arc<Self> {
            Arc::new(Self {
                entered: Notify::new(),
                release: Notify::new(),
                calls: Mutex::new(0),
                reply,
            })
        }
    }

    #[async_trait]
    impl WaitlistStore for GatedStore {
        async fn insert(&self, _entry: &WaitlistEntry) -> Result<(), StoreError> {
            *self.calls.lock().unwrap() += 1;
            self.entered.notify_one();
            self.release.notified().await;
            self.reply.clone()
        }
    }

    fn form_with(store: Arc<dyn WaitlistStore>) -> (WaitlistForm, CapturedLogs) {
        let (logger, logs) = StructuredLogger::capturing(SessionId::from_string("test"));
        (WaitlistForm::with_logger(store, logger), logs)
    }

    // === State Tests ===

    #[test]
    fn test_fresh_state_is_idle() {
        let state = SubmissionState::default();
        assert_eq!(state.phase(), SubmissionPhase::Idle);
        assert!(state.controls_enabled());
        assert!(state.feedback().is_none());
    }

    #[test]
    fn test_phase_derivation() {
        let mut state = SubmissionState {
            is_submitting: true,
            ..Default::default()
        };
        assert_eq!(state.phase(), SubmissionPhase::Submitting);
        assert!(!state.controls_enabled());

        state.is_submitting = false;
        state.error = Some("nope".to_string());
        assert_eq!(state.phase(), SubmissionPhase::Failed);
        assert_eq!(state.feedback(), Some(Feedback::Error("nope".to_string())));

        state.error = None;
        state.is_submitted = true;
        assert_eq!(state.phase(), SubmissionPhase::Success);
        assert_eq!(state.feedback().unwrap().text(), JOINED_MESSAGE);
    }

    #[test]
    fn test_set_email_mutates_input() {
        let (form, _) = form_with(ScriptedStore::replying(vec![]));
        form.set_email("a");
        form.set_email("a@");
        assert_eq!(form.snapshot().email, "a@");
        assert_eq!(form.phase(), SubmissionPhase::Idle);
    }

    // === Submit Tests ===

    #[tokio::test]
    async fn test_submit_success() {
        let store = ScriptedStore::replying(vec![Ok(())]);
        let (form, logs) = form_with(store.clone());

        let outcome = form.submit_email("a@b.com").await;

        assert_eq!(outcome, SubmitOutcome::Joined);
        let state = form.snapshot();
        assert!(state.is_submitted);
        assert_eq!(state.email, "");
        assert_eq!(state.error, None);
        assert!(!state.is_submitting);
        assert_eq!(store.seen(), vec![WaitlistEntry::new("a@b.com")]);
        assert_eq!(logs.at_level(LogLevel::Info).len(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_input() {
        let store = ScriptedStore::replying(vec![Err(StoreError::rejected(409, "duplicate email"))]);
        let (form, logs) = form_with(store);

        let outcome = form.submit_email("bad").await;

        assert_eq!(outcome, SubmitOutcome::Failed("duplicate email".to_string()));
        let state = form.snapshot();
        assert!(!state.is_submitted);
        assert_eq!(state.error.as_deref(), Some("duplicate email"));
        assert!(!state.is_submitting);
        assert_eq!(state.email, "bad");
        assert_eq!(form.phase(), SubmissionPhase::Failed);
        assert_eq!(logs.at_level(LogLevel::Error).len(), 1);
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let store = ScriptedStore::replying(vec![Err(StoreError::Transport { message: None })]);
        let (form, _) = form_with(store);

        form.submit_email("a@b.com").await;

        assert_eq!(form.snapshot().error.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_failure_with_blank_message_uses_fallback() {
        let store = ScriptedStore::replying(vec![Err(StoreError::rejected(500, ""))]);
        let (form, _) = form_with(store);

        let outcome = form.submit_email("a@b.com").await;

        assert_eq!(outcome, SubmitOutcome::Failed(FALLBACK_ERROR_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds_and_clears_error() {
        let store = ScriptedStore::replying(vec![
            Err(StoreError::transport("connection refused")),
            Ok(()),
        ]);
        let (form, _) = form_with(store.clone());

        form.submit_email("a@b.com").await;
        assert_eq!(form.phase(), SubmissionPhase::Failed);

        let outcome = form.submit().await;
        assert!(outcome.is_joined());
        let state = form.snapshot();
        assert_eq!(state.error, None);
        assert!(state.is_submitted);
        assert_eq!(store.seen().len(), 2);
    }

    #[tokio::test]
    async fn test_retry_clears_error_at_start() {
        let store = GatedStore::new(Err(StoreError::transport("still down")));
        let (form, _) = form_with(store.clone());
        let form = Arc::new(form);
        {
            let mut state = form.lock();
            state.email = "a@b.com".to_string();
            state.error = Some("previous failure".to_string());
        }

        let task = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        store.entered.notified().await;

        assert_eq!(form.snapshot().error, None);

        store.release.notify_one();
        let outcome = task.await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Failed("still down".to_string()));
    }

    #[tokio::test]
    async fn test_empty_email_is_skipped() {
        let store = ScriptedStore::replying(vec![]);
        let (form, _) = form_with(store.clone());

        let outcome = form.submit().await;

        assert_eq!(outcome, SubmitOutcome::Skipped(SkipReason::EmptyEmail));
        assert!(!outcome.dispatched());
        assert_eq!(form.snapshot(), SubmissionState::default());
        assert!(store.seen().is_empty());
    }

    // === Single-flight Tests ===

    #[tokio::test]
    async fn test_submitting_is_visible_before_store_answers() {
        let store = GatedStore::new(Ok(()));
        let (form, _) = form_with(store.clone());
        let form = Arc::new(form);
        form.set_email("a@b.com");

        let task = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        store.entered.notified().await;

        let state = form.snapshot();
        assert_eq!(state.phase(), SubmissionPhase::Submitting);
        assert!(!state.controls_enabled());
        assert_eq!(state.email, "a@b.com");

        store.release.notify_one();
        assert_eq!(task.await.unwrap(), SubmitOutcome::Joined);
        assert_eq!(form.phase(), SubmissionPhase::Success);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_not_dispatched() {
        let store = GatedStore::new(Ok(()));
        let (form, _) = form_with(store.clone());
        let form = Arc::new(form);
        form.set_email("a@b.com");

        let first = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        store.entered.notified().await;

        let second = form.submit().await;
        assert_eq!(second, SubmitOutcome::Skipped(SkipReason::InFlight));

        store.release.notify_one();
        assert!(first.await.unwrap().is_joined());
        assert_eq!(*store.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_submit_after_success_dispatches_again() {
        let store = ScriptedStore::replying(vec![Ok(()), Ok(())]);
        let (form, _) = form_with(store.clone());

        form.submit_email("a@b.com").await;
        let outcome = form.submit_email("c@d.com").await;

        assert_eq!(outcome, SubmitOutcome::Joined);
        assert!(form.snapshot().controls_enabled());
        assert_eq!(
            store.seen(),
            vec![WaitlistEntry::new("a@b.com"), WaitlistEntry::new("c@d.com")]
        );
        assert_eq!(form.phase(), SubmissionPhase::Success);
    }

    #[tokio::test]
    async fn test_failure_after_success_keeps_joined_flag() {
        let store = ScriptedStore::replying(vec![
            Ok(()),
            Err(StoreError::rejected(409, "duplicate email")),
        ]);
        let (form, _) = form_with(store);

        form.submit_email("a@b.com").await;
        form.submit_email("a@b.com").await;

        let state = form.snapshot();
        assert!(state.is_submitted);
        assert_eq!(state.phase(), SubmissionPhase::Failed);
        assert_eq!(
            state.feedback(),
            Some(Feedback::Error("duplicate email".to_string()))
        );
    }

    // === Cancellation Tests ===

    #[tokio::test]
    async fn test_aborted_submit_releases_the_form() {
        let store = GatedStore::new(Ok(()));
        let (form, _) = form_with(store.clone());
        let form = Arc::new(form);
        form.set_email("a@b.com");

        let task = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        store.entered.notified().await;
        assert_eq!(form.phase(), SubmissionPhase::Submitting);

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        let state = form.snapshot();
        assert!(!state.is_submitting);
        assert!(!state.is_submitted);
        assert_eq!(state.email, "a@b.com");
        assert_eq!(state.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_timed_out_submit_can_be_retried() {
        let store = GatedStore::new(Ok(()));
        let (form, _) = form_with(store.clone());
        form.set_email("a@b.com");

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(20), form.submit()).await;
        assert!(timed_out.is_err());
        assert!(form.snapshot().controls_enabled());

        let retry = tokio::spawn({
            let form = Arc::new(form);
            let store = store.clone();
            async move {
                let outcome = form.submit().await;
                (outcome, form.phase(), *store.calls.lock().unwrap())
            }
        });
        store.release.notify_one();
        let (outcome, phase, calls) = retry.await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Joined);
        assert_eq!(phase, SubmissionPhase::Success);
        assert_eq!(calls, 2);
    }
}
