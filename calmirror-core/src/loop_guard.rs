//! Keeps mirrored events from being mirrored back.
//!
//! Every imported event gets a `"[<vendor>] "` provenance tag in front of its
//! summary. When scanning one side, events tagged with the *other* side's
//! label were produced by an earlier pass and must never count as source
//! material.

use crate::event::Event;
use crate::vendor::{Side, VendorPair};

/// The summary prefix marking an event as mirrored from `vendor`.
pub fn provenance_tag(vendor: &str) -> String {
    format!("[{}] ", vendor)
}

/// Prepend the provenance tag for `vendor` to `summary`.
pub fn tag_summary(vendor: &str, summary: &str) -> String {
    format!("{}{}", provenance_tag(vendor), summary)
}

pub struct LoopGuard {
    skip_prefix: String,
}

impl LoopGuard {
    /// Guard for events listed on `scanned`.
    pub fn for_side(pair: &VendorPair, scanned: Side) -> Self {
        LoopGuard {
            skip_prefix: provenance_tag(pair.label(scanned.other())),
        }
    }

    pub fn is_mirrored(&self, event: &Event) -> bool {
        event.summary.starts_with(&self.skip_prefix)
    }

    /// Drop mirrored events, returning how many were removed.
    pub fn retain_originals(&self, events: &mut Vec<Event>) -> usize {
        let before = events.len();
        events.retain(|event| {
            let mirrored = self.is_mirrored(event);
            if mirrored {
                tracing::debug!(id = %event.id, summary = %event.summary, "skipping mirrored event");
            }
            !mirrored
        });
        before - events.len()
    }
}
