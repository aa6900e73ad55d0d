//! Waitlist records.

use serde::{Deserialize, Serialize};

/// A single captured email address.
///
/// Uniqueness is the remote collection's concern; the client sends
/// whatever the visitor typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub email: String,
}

impl WaitlistEntry {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_json_shape() {
        let entry = WaitlistEntry::new("a@b.com");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({ "email": "a@b.com" })
        );
    }
}
