//! Classifies candidate events against the persisted fingerprints.

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::fingerprint::Fingerprint;
use crate::state::SyncState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Never seen before
    New,
    /// Same fingerprint as last recorded
    Unchanged,
    /// Seen before, content differs
    Changed,
}

impl Classification {
    pub fn should_import(self) -> bool {
        !matches!(self, Classification::Unchanged)
    }
}

/// What to do with the stored fingerprint when a known event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintPolicy {
    /// Leave the old fingerprint in place. A changed event is then imported
    /// again on every later run, as long as it differs from what was first
    /// recorded.
    #[default]
    KeepStored,
    /// Record the new fingerprint, so a changed event is imported once.
    RefreshOnChange,
}

pub struct ChangeDetector<'a> {
    state: &'a mut SyncState,
    policy: FingerprintPolicy,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(state: &'a mut SyncState, policy: FingerprintPolicy) -> Self {
        ChangeDetector { state, policy }
    }

    /// Classify one event, updating the state as a side effect.
    pub fn classify(&mut self, event: &Event) -> Classification {
        let fingerprint = Fingerprint::of(event);

        let classification = match self.state.get(&event.id) {
            None => Classification::New,
            Some(stored) if *stored == fingerprint => Classification::Unchanged,
            Some(_) => Classification::Changed,
        };

        match classification {
            Classification::New => self.state.insert(event.id.clone(), fingerprint),
            Classification::Changed if self.policy == FingerprintPolicy::RefreshOnChange => {
                self.state.insert(event.id.clone(), fingerprint)
            }
            _ => {}
        }

        tracing::debug!(id = %event.id, ?classification, "classified event");
        classification
    }

    /// Keep only events that need importing, preserving order. Returns the
    /// number of unchanged events removed.
    pub fn retain_importable(&mut self, events: &mut Vec<Event>) -> usize {
        let before = events.len();
        events.retain(|event| self.classify(event).should_import());
        before - events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::make_test_event;

    #[test]
    fn test_new_event_is_recorded() {
        let mut state = SyncState::default();
        let event = make_test_event("e1", "Standup");

        let class = ChangeDetector::new(&mut state, FingerprintPolicy::KeepStored).classify(&event);

        assert_eq!(class, Classification::New);
        assert_eq!(state.get("e1"), Some(&Fingerprint::of(&event)));
    }

    #[test]
    fn test_unchanged_event_is_skipped() {
        let event = make_test_event("e1", "Standup");
        let mut state = SyncState::default();
        state.insert("e1", Fingerprint::of(&event));

        let mut events = vec![event, make_test_event("e2", "Lunch")];
        let skipped = ChangeDetector::new(&mut state, FingerprintPolicy::KeepStored)
            .retain_importable(&mut events);

        assert_eq!(skipped, 1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e2");
    }

    #[test]
    fn test_changed_event_keeps_stored_fingerprint_by_default() {
        let original = make_test_event("e1", "Standup");
        let mut state = SyncState::default();
        state.insert("e1", Fingerprint::of(&original));

        let mut edited = original.clone();
        edited.summary = "Standup (moved)".to_string();

        let mut detector = ChangeDetector::new(&mut state, FingerprintPolicy::KeepStored);
        assert_eq!(detector.classify(&edited), Classification::Changed);
        // Still differs on the next run, so it is imported again
        assert_eq!(detector.classify(&edited), Classification::Changed);
        assert_eq!(state.get("e1"), Some(&Fingerprint::of(&original)));
    }

    #[test]
    fn test_changed_event_refreshes_when_configured() {
        let original = make_test_event("e1", "Standup");
        let mut state = SyncState::default();
        state.insert("e1", Fingerprint::of(&original));

        let mut edited = original.clone();
        edited.location = Some("Room 4".to_string());

        let mut detector = ChangeDetector::new(&mut state, FingerprintPolicy::RefreshOnChange);
        assert_eq!(detector.classify(&edited), Classification::Changed);
        assert_eq!(detector.classify(&edited), Classification::Unchanged);
    }
}
