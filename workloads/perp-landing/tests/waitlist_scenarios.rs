//! End-to-end waitlist scenarios: visitor input through the form to the
//! rendered feedback.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use perp_core::{
    PageConfig, SkipReason, StoreError, SubmissionPhase, SubmitOutcome, WaitlistEntry,
    WaitlistStore, FALLBACK_ERROR_MESSAGE, JOINED_MESSAGE,
};
use perp_landing::LandingSession;
use perp_observability::{LogLevel, SessionId, StructuredLogger};
use tokio::sync::Notify;

/// Store returning one fixed answer and counting the writes it saw.
struct FixedStore {
    reply: Result<(), StoreError>,
    writes: Mutex<Vec<String>>,
}

impl FixedStore {
    fn new(reply: Result<(), StoreError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            writes: Mutex::new(Vec::new()),
        })
    }

    fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl WaitlistStore for FixedStore {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError> {
        self.writes.lock().unwrap().push(entry.email.clone());
        self.reply.clone()
    }
}

/// Store that holds the write open until the test releases it.
struct SlowStore {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl WaitlistStore for SlowStore {
    async fn insert(&self, _entry: &WaitlistEntry) -> Result<(), StoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

fn session(store: Arc<dyn WaitlistStore>) -> LandingSession {
    LandingSession::new(PageConfig::default(), store)
}

#[tokio::test]
async fn test_visitor_joins_waitlist() {
    let store = FixedStore::new(Ok(()));
    let page = session(store.clone());

    page.type_email("a@b.com");
    let outcome = page.click_submit().await;

    assert_eq!(outcome, SubmitOutcome::Joined);
    let html = page.render_waitlist();
    assert!(html.contains(JOINED_MESSAGE));
    assert!(html.contains(r#"value="""#));
    assert_eq!(store.writes(), vec!["a@b.com"]);
}

#[tokio::test]
async fn test_joined_visitor_can_submit_another_address() {
    let store = FixedStore::new(Ok(()));
    let page = session(store.clone());

    page.type_email("a@b.com");
    page.click_submit().await;
    assert!(!page.render_waitlist().contains("disabled"));

    page.type_email("c@d.com");
    assert_eq!(page.click_submit().await, SubmitOutcome::Joined);
    assert_eq!(store.writes(), vec!["a@b.com", "c@d.com"]);
    assert!(page.render_waitlist().contains(JOINED_MESSAGE));
}

#[tokio::test]
async fn test_rejected_email_shows_store_message_and_keeps_input() {
    let store = FixedStore::new(Err(StoreError::rejected(409, "duplicate email")));
    let page = session(store);

    // Direct invocation, past the browser's required/email checks.
    page.type_email("bad");
    page.click_submit().await;

    let html = page.render_waitlist();
    assert!(html.contains(">duplicate email</p>"));
    assert!(html.contains(r#"value="bad""#));
    assert!(!html.contains(JOINED_MESSAGE));
    assert_eq!(page.form().phase(), SubmissionPhase::Failed);
}

#[tokio::test]
async fn test_silent_rejection_shows_fallback() {
    let store = FixedStore::new(Err(StoreError::Rejected {
        status: 500,
        message: None,
    }));
    let page = session(store);

    page.type_email("a@b.com");
    page.click_submit().await;

    assert!(page.render_waitlist().contains(FALLBACK_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_button_disabled_while_joining() {
    let store = Arc::new(SlowStore {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let page = Arc::new(session(store.clone()));
    page.type_email("a@b.com");

    let click = tokio::spawn({
        let page = page.clone();
        async move { page.click_submit().await }
    });
    store.entered.notified().await;

    let html = page.render_waitlist();
    assert!(html.contains("Joining..."));
    assert!(html.contains("<button type=\"submit\" disabled>"));
    assert_eq!(
        page.click_submit().await,
        SubmitOutcome::Skipped(SkipReason::InFlight)
    );

    store.release.notify_one();
    assert_eq!(click.await.unwrap(), SubmitOutcome::Joined);
    assert!(page.render_waitlist().contains(JOINED_MESSAGE));
}

#[tokio::test]
async fn test_failure_is_logged_for_the_session() {
    let (logger, logs) = StructuredLogger::capturing(SessionId::from_string("visitor-1"));
    let store = FixedStore::new(Err(StoreError::transport("connection refused")));
    let page = LandingSession::with_logger(PageConfig::default(), store, logger);

    page.type_email("a@b.com");
    page.click_submit().await;

    let errors = logs.at_level(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].session_id, "visitor-1");
    assert_eq!(errors[0].component.as_deref(), Some("waitlist"));
    assert!(page.render().contains("connection refused"));
}
