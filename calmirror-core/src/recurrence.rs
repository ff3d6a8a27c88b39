//! Collapses recurring-event instances into their master events.
//!
//! A single-events listing returns every occurrence of a series as its own
//! instance. Mirroring instances one by one would flood the destination, so
//! each series is replaced by its master, which carries the recurrence rule.

use std::collections::HashSet;

use crate::client::CalendarClient;
use crate::event::Event;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveStats {
    /// Instances replaced by an already-emitted master
    pub collapsed: usize,
    /// Instances whose master could not be fetched
    pub dropped: usize,
}

/// Replace recurring instances with their masters, keeping first-seen order.
///
/// Master lookups are best-effort: a failed or empty lookup drops that
/// instance and the run carries on.
pub async fn resolve_recurring(
    client: &dyn CalendarClient,
    calendar_id: &str,
    events: Vec<Event>,
) -> (Vec<Event>, ResolveStats) {
    let mut resolved = Vec::with_capacity(events.len());
    let mut emitted_masters = HashSet::new();
    let mut stats = ResolveStats::default();

    for event in events {
        if !event.is_recurring_instance() {
            resolved.push(event);
            continue;
        }
        let master_id = event.recurring_event_id.clone().unwrap_or_default();

        if emitted_masters.contains(&master_id) {
            stats.collapsed += 1;
            continue;
        }

        match client.get_event(calendar_id, &master_id).await {
            Ok(Some(master)) => {
                if emitted_masters.insert(master.id.clone()) {
                    resolved.push(master);
                } else {
                    stats.collapsed += 1;
                }
            }
            Ok(None) => {
                tracing::warn!(instance = %event.id, master = %master_id, "recurring master not found, skipping instance");
                stats.dropped += 1;
            }
            Err(e) => {
                tracing::warn!(instance = %event.id, master = %master_id, %e, "failed to fetch recurring master, skipping instance");
                stats.dropped += 1;
            }
        }
    }

    (resolved, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeCalendar;
    use crate::event::tests::make_test_event;

    fn instance(id: &str, master: &str) -> Event {
        let mut event = make_test_event(id, "Weekly sync");
        event.recurring_event_id = Some(master.to_string());
        event
    }

    #[tokio::test]
    async fn test_instances_collapse_to_one_master() {
        let mut master = make_test_event("m1", "Weekly sync");
        master.recurrence = vec!["RRULE:FREQ=WEEKLY".to_string()];
        let client = FakeCalendar::new("me@example.com").with_master(master);

        let events = vec![
            instance("m1_20250320", "m1"),
            make_test_event("e1", "Lunch"),
            instance("m1_20250327", "m1"),
            instance("m1_20250403", "m1"),
        ];

        let (resolved, stats) = resolve_recurring(&client, "primary", events).await;

        let ids: Vec<_> = resolved.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "e1"]);
        assert_eq!(resolved[0].recurrence, vec!["RRULE:FREQ=WEEKLY".to_string()]);
        assert_eq!(stats.collapsed, 2);
        // Later instances of an emitted series need no lookup
        assert_eq!(client.get_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_reference_passes_through() {
        let client = FakeCalendar::new("me@example.com");
        let mut event = make_test_event("e1", "Lunch");
        event.recurring_event_id = Some(String::new());

        let (resolved, stats) = resolve_recurring(&client, "primary", vec![event]).await;

        assert_eq!(resolved.len(), 1);
        assert_eq!(stats, ResolveStats::default());
        assert_eq!(client.get_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_master_drops_instance() {
        let client = FakeCalendar::new("me@example.com");
        let events = vec![instance("x_1", "gone"), make_test_event("e1", "Lunch")];

        let (resolved, stats) = resolve_recurring(&client, "primary", events).await;

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "e1");
        assert_eq!(stats.dropped, 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_not_fatal() {
        let client = FakeCalendar::new("me@example.com").failing_get();
        let events = vec![instance("x_1", "m1"), make_test_event("e1", "Lunch")];

        let (resolved, stats) = resolve_recurring(&client, "primary", events).await;

        assert_eq!(resolved.len(), 1);
        assert_eq!(stats.dropped, 1);
    }
}
