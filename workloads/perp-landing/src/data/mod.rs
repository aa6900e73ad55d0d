//! Static page content.

mod content;

pub use content::*;
