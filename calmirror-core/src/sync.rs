//! Drives one sync run: fetch, filter, detect changes, redact, import.
//!
//! Everything runs sequentially. Both sides are fetched and filtered before
//! any import happens, then the directions are imported one after the other.
//! Any remote failure aborts the whole run before state is saved.

use chrono::{DateTime, Duration, Utc};

use crate::change::ChangeDetector;
use crate::client::{CalendarClient, UpcomingQuery};
use crate::error::SyncResult;
use crate::event::Event;
use crate::loop_guard::LoopGuard;
use crate::options::SyncOptions;
use crate::recurrence::resolve_recurring;
use crate::redaction::Redactor;
use crate::state::{StateStore, SyncState};
use crate::vendor::{Direction, PerSide, Side, VendorPair};

/// What happened to one side's listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideReport {
    pub fetched: usize,
    /// Excluded because a previous pass created them
    pub mirrored: usize,
    /// Recurring instances folded into an already-listed master
    pub collapsed: usize,
    /// Recurring instances whose master could not be fetched
    pub dropped: usize,
    pub unchanged: usize,
    pub to_import: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionReport {
    pub direction: Direction,
    pub imported: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub sides: PerSide<SideReport>,
    pub directions: Vec<DirectionReport>,
}

impl SyncReport {
    pub fn total_imported(&self) -> usize {
        self.directions.iter().map(|d| d.imported).sum()
    }
}

pub struct SyncEngine<'a> {
    pair: VendorPair,
    clients: PerSide<&'a dyn CalendarClient>,
    options: SyncOptions,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        pair: VendorPair,
        source: &'a dyn CalendarClient,
        destination: &'a dyn CalendarClient,
        options: SyncOptions,
    ) -> Self {
        SyncEngine {
            pair,
            clients: PerSide::new(source, destination),
            options,
        }
    }

    /// Load state, sync, and save state. State is only written when every
    /// step succeeded.
    pub async fn run(&self, store: &StateStore) -> SyncResult<SyncReport> {
        let mut state = store.load();
        tracing::debug!(path = %store.path().display(), entries = state.len(), "loaded sync state");

        let report = self.run_with_state(&mut state, Utc::now()).await?;

        store.save(&state)?;
        Ok(report)
    }

    /// Sync against an in-memory state, mutating it as events are classified.
    pub async fn run_with_state(
        &self,
        state: &mut SyncState,
        now: DateTime<Utc>,
    ) -> SyncResult<SyncReport> {
        let directions = self.pair.directions(self.options.two_way_sync);
        let mut report = SyncReport::default();
        let mut buffers: PerSide<Vec<Event>> = PerSide::default();

        for direction in &directions {
            let side = direction.from;
            let (events, side_report) = self.prepare(side, state, now).await?;
            buffers[side] = events;
            report.sides[side] = side_report;
        }

        for direction in directions {
            let events = std::mem::take(&mut buffers[direction.from]);
            let imported = self.import(direction, events).await?;
            report.directions.push(DirectionReport {
                direction,
                imported,
            });
        }

        Ok(report)
    }

    /// Fetch one side's upcoming events and reduce them to those that need
    /// importing: loop guard, recurrence collapsing, then change detection.
    pub async fn prepare(
        &self,
        side: Side,
        state: &mut SyncState,
        now: DateTime<Utc>,
    ) -> SyncResult<(Vec<Event>, SideReport)> {
        let vendor = self.pair.label(side);
        let client = self.clients[side];
        let mut report = SideReport::default();

        tracing::info!("Getting events for {}", vendor);
        let mut events = client.list_upcoming(&self.upcoming_query(now)).await?;
        report.fetched = events.len();

        if events.is_empty() {
            tracing::info!("No upcoming events found for {}", vendor);
            return Ok((events, report));
        }

        let guard = LoopGuard::for_side(&self.pair, side);
        report.mirrored = guard.retain_originals(&mut events);

        let (mut events, resolve_stats) =
            resolve_recurring(client, &self.options.calendar_id, events).await;
        report.collapsed = resolve_stats.collapsed;
        report.dropped = resolve_stats.dropped;

        report.unchanged = ChangeDetector::new(state, self.options.fingerprint_policy)
            .retain_importable(&mut events);
        report.to_import = events.len();

        tracing::debug!(vendor, ?report, "prepared events");
        Ok((events, report))
    }

    fn upcoming_query(&self, now: DateTime<Utc>) -> UpcomingQuery {
        let time_max = (self.options.lookahead_days > 0)
            .then(|| now + Duration::days(self.options.lookahead_days));

        UpcomingQuery {
            calendar_id: self.options.calendar_id.clone(),
            time_min: now,
            time_max,
            max_results: self.options.max_results,
        }
    }

    /// Redact and import events in their listed order. The first failed
    /// import aborts the rest.
    async fn import(&self, direction: Direction, events: Vec<Event>) -> SyncResult<usize> {
        let from = self.pair.label(direction.from);
        let to = self.pair.label(direction.to);

        if events.is_empty() {
            tracing::info!("No events to import from {} to {}", from, to);
            return Ok(0);
        }

        tracing::info!("[{}] => [{}] Importing {} events", from, to, events.len());

        let client = self.clients[direction.to];
        let calendar_id = &self.options.calendar_id;
        let metadata = client.calendar_metadata(calendar_id).await?;
        let redactor = Redactor::new(
            &self.options.redaction,
            from,
            metadata.primary_address(),
        );

        let mut imported = 0;
        for mut event in events {
            let id = event.id.clone();
            redactor.apply(&mut event);
            client.import_event(calendar_id, &event).await?;
            tracing::debug!(%id, summary = %event.summary, "imported event");
            imported += 1;
        }

        Ok(imported)
    }
}
