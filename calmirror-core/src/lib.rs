//! Sync engine for calmirror.
//!
//! Mirrors upcoming events from one calendar account to another (optionally
//! both ways) without re-importing unchanged events or events a previous
//! pass created:
//! - `recurrence` collapses recurring instances into their masters
//! - `loop_guard` skips events carrying the other vendor's provenance tag
//! - `change` compares content fingerprints against persisted `state`
//! - `redaction` strips private fields and tags events before import
//! - `sync` sequences a whole run
//!
//! Vendor APIs are reached through the `client::CalendarClient` trait.

pub mod change;
pub mod client;
pub mod error;
pub mod event;
pub mod fingerprint;
pub mod loop_guard;
pub mod options;
pub mod recurrence;
pub mod redaction;
pub mod state;
pub mod sync;
pub mod vendor;

pub use client::{CalendarClient, CalendarMetadata, UpcomingQuery};
pub use error::{SyncError, SyncResult};
pub use event::*;
pub use options::{RedactionOptions, SyncOptions};
pub use state::{StateStore, SyncState};
pub use sync::{SyncEngine, SyncReport};
pub use vendor::{Direction, PerSide, Side, VendorPair};
