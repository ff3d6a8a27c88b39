//! Privacy redaction and provenance tagging applied before import.

use crate::event::{Event, Organizer, Reminders};
use crate::loop_guard::tag_summary;
use crate::options::RedactionOptions;

/// Replacement text for redacted fields
pub const REDACTED: &str = "Redacted";

/// Applies one direction's redaction rules.
///
/// Built once per direction: the organizer address is looked up a single
/// time per run, not per event.
pub struct Redactor<'a> {
    options: &'a RedactionOptions,
    source_label: &'a str,
    destination_address: &'a str,
}

impl<'a> Redactor<'a> {
    pub fn new(
        options: &'a RedactionOptions,
        source_label: &'a str,
        destination_address: &'a str,
    ) -> Self {
        Redactor {
            options,
            source_label,
            destination_address,
        }
    }

    pub fn apply(&self, event: &mut Event) {
        let opts = self.options;

        // Redact before tagging so the tag itself survives
        if opts.redacted_summary {
            event.summary = REDACTED.to_string();
        }
        event.summary = tag_summary(self.source_label, &event.summary);

        if opts.redacted_description {
            event.description = Some(REDACTED.to_string());
        }

        if opts.disable_reminders {
            event.reminders = Some(Reminders::disabled());
        }

        if opts.redacted_location {
            event.location = Some(REDACTED.to_string());
        }

        if opts.redacted_attendees {
            event.attendees.clear();
        }

        if opts.redacted_attachments {
            event.attachments.clear();
        }

        // The receiving account becomes the organizer on import
        event.organizer = Some(Organizer::default());

        event.color_id = opts.event_color.map(|color| color.color_id());

        if opts.redacted_organizer {
            event.organizer = Some(Organizer {
                display_name: Some(self.source_label.to_string()),
                email: Some(self.destination_address.to_string()),
            });
        }
    }
}
