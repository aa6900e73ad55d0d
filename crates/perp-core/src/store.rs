//! The remote collection seam.

use async_trait::async_trait;

use crate::entry::WaitlistEntry;
use crate::error::StoreError;

/// A remote collection that durably records waitlist entries.
///
/// Logically `INSERT INTO waitlist (email) VALUES (?)`. Implementations are
/// created once at startup from explicit configuration and handed to
/// [`crate::WaitlistForm`]; there is no global client.
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Persist one entry. `Ok` means the store acknowledged the write.
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError>;
}
