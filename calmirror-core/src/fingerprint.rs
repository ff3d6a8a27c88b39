//! Content fingerprints for change detection.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::event::Event;

/// SHA-256 over summary, start, end, location and description, hex encoded.
///
/// Attendees, organizer, colour and reminders are not part of the digest, so
/// edits to them alone never trigger a re-import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(event: &Event) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(event.summary.as_bytes());
        hasher.update(event.start.to_canonical_string().as_bytes());
        hasher.update(event.end.to_canonical_string().as_bytes());
        hasher.update(event.location.as_deref().unwrap_or_default().as_bytes());
        hasher.update(event.description.as_deref().unwrap_or_default().as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(hex: String) -> Self {
        Fingerprint(hex)
    }
}
