//! Per-run sync options.

use serde::{Deserialize, Serialize};

use crate::change::FingerprintPolicy;
use crate::client::{DEFAULT_MAX_RESULTS, PRIMARY_CALENDAR_ID};
use crate::event::EventColor;

/// Upcoming window scanned on each run, in days. `0` leaves the window open
/// and only `max_results` bounds the listing.
pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 0;

/// Which fields to strip before an event crosses to the other vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionOptions {
    pub redacted_summary: bool,
    pub redacted_description: bool,
    pub redacted_location: bool,
    pub redacted_attendees: bool,
    pub redacted_organizer: bool,
    pub redacted_attachments: bool,
    pub disable_reminders: bool,
    /// Colour applied to every mirrored event; `None` leaves the calendar default
    pub event_color: Option<EventColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncOptions {
    pub two_way_sync: bool,
    #[serde(flatten)]
    pub redaction: RedactionOptions,
    pub fingerprint_policy: FingerprintPolicy,
    pub max_results: usize,
    pub lookahead_days: i64,
    pub calendar_id: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            two_way_sync: false,
            redaction: RedactionOptions::default(),
            fingerprint_policy: FingerprintPolicy::default(),
            max_results: DEFAULT_MAX_RESULTS,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            calendar_id: PRIMARY_CALENDAR_ID.to_string(),
        }
    }
}
