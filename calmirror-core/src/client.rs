//! The vendor capability the engine consumes.
//!
//! Implementations wrap a provider API (see `calmirror-provider-google`).
//! Obtaining an authenticated client is the caller's job; the engine only
//! ever receives ready ones.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SyncResult;
use crate::event::Event;

/// Alias for the account's main calendar
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// Hard cap on events returned by one listing query
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// A bounded "upcoming events" query.
///
/// Implementations must expand recurring series into single instances, order
/// by start time and leave out deleted events.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingQuery {
    pub calendar_id: String,
    pub time_min: DateTime<Utc>,
    pub time_max: Option<DateTime<Utc>>,
    pub max_results: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMetadata {
    /// Calendar id; for a primary calendar this is the account's address
    pub id: String,
}

impl CalendarMetadata {
    pub fn primary_address(&self) -> &str {
        &self.id
    }
}

#[async_trait]
pub trait CalendarClient: Send + Sync {
    async fn list_upcoming(&self, query: &UpcomingQuery) -> SyncResult<Vec<Event>>;

    /// `Ok(None)` when the event does not exist.
    async fn get_event(&self, calendar_id: &str, event_id: &str) -> SyncResult<Option<Event>>;

    async fn calendar_metadata(&self, calendar_id: &str) -> SyncResult<CalendarMetadata>;

    async fn import_event(&self, calendar_id: &str, event: &Event) -> SyncResult<()>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory calendar used by the engine tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::error::SyncError;

    #[derive(Default)]
    struct Inner {
        upcoming: Vec<Event>,
        masters: HashMap<String, Event>,
        imported: Vec<Event>,
        get_calls: usize,
        metadata_calls: usize,
        fail_list: bool,
        fail_get: bool,
        fail_import_after: Option<usize>,
    }

    pub(crate) struct FakeCalendar {
        address: String,
        inner: Mutex<Inner>,
    }

    impl FakeCalendar {
        pub(crate) fn new(address: &str) -> Self {
            FakeCalendar {
                address: address.to_string(),
                inner: Mutex::new(Inner::default()),
            }
        }

        pub(crate) fn with_upcoming(self, events: Vec<Event>) -> Self {
            self.inner.lock().unwrap().upcoming = events;
            self
        }

        pub(crate) fn with_master(self, event: Event) -> Self {
            self.inner
                .lock()
                .unwrap()
                .masters
                .insert(event.id.clone(), event);
            self
        }

        pub(crate) fn failing_list(self) -> Self {
            self.inner.lock().unwrap().fail_list = true;
            self
        }

        pub(crate) fn failing_get(self) -> Self {
            self.inner.lock().unwrap().fail_get = true;
            self
        }

        /// Accept `n` imports, then fail every further one.
        pub(crate) fn failing_import_after(self, n: usize) -> Self {
            self.inner.lock().unwrap().fail_import_after = Some(n);
            self
        }

        pub(crate) fn imported(&self) -> Vec<Event> {
            self.inner.lock().unwrap().imported.clone()
        }

        pub(crate) fn get_calls(&self) -> usize {
            self.inner.lock().unwrap().get_calls
        }

        pub(crate) fn metadata_calls(&self) -> usize {
            self.inner.lock().unwrap().metadata_calls
        }
    }

    #[async_trait]
    impl CalendarClient for FakeCalendar {
        async fn list_upcoming(&self, query: &UpcomingQuery) -> SyncResult<Vec<Event>> {
            let inner = self.inner.lock().unwrap();
            if inner.fail_list {
                return Err(SyncError::Remote("list failed".to_string()));
            }
            // Imported events show up in later listings, like a real calendar.
            Ok(inner
                .upcoming
                .iter()
                .chain(inner.imported.iter())
                .take(query.max_results)
                .cloned()
                .collect())
        }

        async fn get_event(&self, _calendar_id: &str, event_id: &str) -> SyncResult<Option<Event>> {
            let mut inner = self.inner.lock().unwrap();
            inner.get_calls += 1;
            if inner.fail_get {
                return Err(SyncError::Remote("get failed".to_string()));
            }
            Ok(inner.masters.get(event_id).cloned())
        }

        async fn calendar_metadata(&self, _calendar_id: &str) -> SyncResult<CalendarMetadata> {
            self.inner.lock().unwrap().metadata_calls += 1;
            Ok(CalendarMetadata {
                id: self.address.clone(),
            })
        }

        async fn import_event(&self, _calendar_id: &str, event: &Event) -> SyncResult<()> {
            let mut inner = self.inner.lock().unwrap();
            if let Some(limit) = inner.fail_import_after {
                if inner.imported.len() >= limit {
                    return Err(SyncError::Remote("import failed".to_string()));
                }
            }
            let mut stored = event.clone();
            stored.id = format!("imported-{}", inner.imported.len() + 1);
            inner.imported.push(stored);
            Ok(())
        }
    }
}
