//! Core of the Perfx landing page: the waitlist submission flow.
//!
//! This crate provides:
//! - `WaitlistEntry` - The record written to the remote collection
//! - `WaitlistStore` - Seam for the remote collection write
//! - `WaitlistForm` - Submission state machine with a single-flight guard
//! - `BackendConfig` / `LandingConfig` - Environment and file configuration

mod config;
mod entry;
mod error;
mod flow;
mod store;

pub use config::*;
pub use entry::*;
pub use error::*;
pub use flow::*;
pub use store::*;
