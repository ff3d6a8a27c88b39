//! Provider-neutral event types.
//!
//! Providers convert their API responses into these types and back; the
//! sync engine only ever sees these.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event (provider-neutral)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Vendor-assigned id, unique within a vendor calendar
    pub id: String,
    /// iCalendar UID, required by the destination's import operation
    pub ical_uid: Option<String>,
    /// Set on instances of a recurring series; points at the master event
    pub recurring_event_id: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub status: EventStatus,

    /// RRULE, EXDATE lines for master events
    #[serde(default)]
    pub recurrence: Vec<String>,

    // Meeting Data
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub organizer: Option<Organizer>,

    // Alarms & Presentation
    pub reminders: Option<Reminders>,
    pub color_id: Option<String>,
}

impl Event {
    /// Whether this is one instance of a recurring series rather than a
    /// standalone event or a master.
    pub fn is_recurring_instance(&self) -> bool {
        self.recurring_event_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl EventTime {
    /// Stable textual form: RFC 3339 for timed events, `YYYY-MM-DD` for all-day.
    pub fn to_canonical_string(&self) -> String {
        match self {
            EventTime::DateTime(dt) => dt.to_rfc3339(),
            EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

/// An event attendee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: Option<String>,
    pub email: String,
    /// "accepted", "declined", "tentative", "needsAction"
    pub response_status: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

/// The event organizer. An all-empty organizer means "let the calendar
/// that receives the event decide".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_url: String,
    pub title: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminders {
    /// Whether the calendar's default reminders apply
    pub use_default: bool,
    pub overrides: Vec<Reminder>,
}

impl Reminders {
    /// No reminders at all: no overrides and the calendar default explicitly
    /// switched off. Leaving reminders unset is not equivalent, since the
    /// receiving calendar would then apply its defaults.
    pub fn disabled() -> Self {
        Reminders {
            use_default: false,
            overrides: Vec::new(),
        }
    }
}

/// A reminder/alarm for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// "popup" or "email"
    pub method: String,
    /// Minutes before the event to trigger
    pub minutes: i64,
}

/// Google's fixed event palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Lavender,
    Sage,
    Grape,
    Flamingo,
    Banana,
    Tangerine,
    Peacock,
    Graphite,
    Blueberry,
    Basil,
    Tomato,
}

impl EventColor {
    /// The wire colour id ("1" for Lavender through "11" for Tomato).
    pub fn color_id(self) -> String {
        let n = match self {
            EventColor::Lavender => 1,
            EventColor::Sage => 2,
            EventColor::Grape => 3,
            EventColor::Flamingo => 4,
            EventColor::Banana => 5,
            EventColor::Tangerine => 6,
            EventColor::Peacock => 7,
            EventColor::Graphite => 8,
            EventColor::Blueberry => 9,
            EventColor::Basil => 10,
            EventColor::Tomato => 11,
        };
        n.to_string()
    }
}
