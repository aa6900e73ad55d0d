//! REST implementation of the waitlist store.
//!
//! Inserts go to `POST {url}/rest/v1/{table}` on a PostgREST-style backend,
//! authorized with the publishable key in both `apikey` and bearer headers.

use async_trait::async_trait;
use perp_core::{BackendConfig, StoreError, WaitlistEntry, WaitlistStore};

use crate::{ClientRequestBuilder, FetchClient, FetchError, Response};

/// Waitlist store backed by the hosted REST API.
#[derive(Debug, Clone)]
pub struct RestWaitlistStore {
    client: FetchClient,
    table: String,
}

impl RestWaitlistStore {
    /// Build the store from explicit configuration.
    ///
    /// An incomplete config still yields a store; its writes fail with
    /// [`StoreError::Misconfigured`] or a rejection from the backend.
    pub fn new(config: &BackendConfig) -> Self {
        let client = FetchClient::new()
            .with_base_url(config.url.clone())
            .with_default_header("apikey", config.anon_key.clone())
            .with_default_header("Authorization", format!("Bearer {}", config.anon_key));
        Self {
            client,
            table: config.table.clone(),
        }
    }

    /// Path of the collection endpoint.
    pub fn insert_path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    /// Build the insert request for one entry.
    pub fn insert_request(&self, entry: &WaitlistEntry) -> Result<ClientRequestBuilder, FetchError> {
        self.client
            .post(self.insert_path())
            .header("Prefer", "return=minimal")
            .json(&[entry])
    }
}

#[async_trait]
impl WaitlistStore for RestWaitlistStore {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError> {
        let request = self.insert_request(entry).map_err(store_error)?;
        let response = request.send().await.map_err(store_error)?;
        check_insert_response(response)
    }
}

/// Map the backend's answer to an insert onto the store contract.
pub fn check_insert_response(response: Response) -> Result<(), StoreError> {
    response.error_for_status().map(|_| ()).map_err(store_error)
}

fn store_error(err: FetchError) -> StoreError {
    match err {
        FetchError::HttpError { status, message } => StoreError::Rejected { status, message },
        FetchError::InvalidUrl(url) => {
            StoreError::Misconfigured(format!("backend URL is not usable: '{}'", url))
        }
        FetchError::RequestError(message) => StoreError::transport(message),
        other => StoreError::Transport {
            message: Some(other.to_string()),
        },
    }
}
