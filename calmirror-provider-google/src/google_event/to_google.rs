use calmirror_core::event::{Attachment, Attendee, Event, EventStatus, EventTime, Organizer};
use google_calendar::types::EventDateTime;

pub trait ToGoogle {
    fn to_google(&self) -> google_calendar::types::Event;
}

impl ToGoogle for Event {
    fn to_google(&self) -> google_calendar::types::Event {
        let status = match self.status {
            EventStatus::Confirmed => "confirmed".to_string(),
            EventStatus::Tentative => "tentative".to_string(),
            EventStatus::Cancelled => "cancelled".to_string(),
        };

        // An explicit structure is sent even when empty: with no reminders
        // block at all, Google falls back to the calendar defaults.
        let reminders = self
            .reminders
            .as_ref()
            .map(|rem| google_calendar::types::Reminders {
                overrides: rem
                    .overrides
                    .iter()
                    .map(|r| google_calendar::types::EventReminder {
                        method: r.method.clone(),
                        minutes: r.minutes,
                    })
                    .collect(),
                use_default: rem.use_default,
            });

        google_calendar::types::Event {
            i_cal_uid: self.ical_uid.clone().unwrap_or_default(),
            summary: self.summary.clone(),
            description: self.description.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            start: Some(event_time_to_google(&self.start)),
            end: Some(event_time_to_google(&self.end)),
            status,
            recurrence: self.recurrence.clone(),
            attendees: self.attendees.iter().map(attendee_to_google).collect(),
            attachments: self.attachments.iter().map(attachment_to_google).collect(),
            organizer: self.organizer.as_ref().map(organizer_to_google),
            reminders,
            color_id: self.color_id.clone().unwrap_or_default(),
            // Google assigns ids on import
            ..Default::default()
        }
    }
}

fn event_time_to_google(time: &EventTime) -> EventDateTime {
    match time {
        EventTime::DateTime(dt) => EventDateTime {
            date: None,
            date_time: Some(*dt),
            time_zone: String::new(),
        },
        EventTime::Date(d) => EventDateTime {
            date: Some(*d),
            date_time: None,
            time_zone: String::new(),
        },
    }
}

fn attendee_to_google(attendee: &Attendee) -> google_calendar::types::EventAttendee {
    google_calendar::types::EventAttendee {
        additional_guests: 0,
        comment: String::new(),
        display_name: attendee.name.clone().unwrap_or_default(),
        email: attendee.email.clone(),
        id: String::new(),
        optional: attendee.optional,
        organizer: false,
        resource: false,
        response_status: attendee.response_status.clone().unwrap_or_default(),
        self_: false,
    }
}

fn attachment_to_google(attachment: &Attachment) -> google_calendar::types::EventAttachment {
    google_calendar::types::EventAttachment {
        file_id: String::new(),
        file_url: attachment.file_url.clone(),
        icon_link: String::new(),
        mime_type: attachment.mime_type.clone().unwrap_or_default(),
        title: attachment.title.clone().unwrap_or_default(),
    }
}

fn organizer_to_google(organizer: &Organizer) -> google_calendar::types::Organizer {
    google_calendar::types::Organizer {
        display_name: organizer.display_name.clone().unwrap_or_default(),
        email: organizer.email.clone().unwrap_or_default(),
        id: String::new(),
        self_: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calmirror_core::event::Reminders;
    use chrono::{TimeZone, Utc};

    fn make_event() -> Event {
        Event {
            id: "e1".to_string(),
            ical_uid: Some("e1@google.com".to_string()),
            recurring_event_id: None,
            summary: "[work] Redacted".to_string(),
            description: None,
            location: Some("Redacted".to_string()),
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(2025, 3, 20, 9, 30, 0).unwrap()),
            status: EventStatus::Confirmed,
            recurrence: vec!["RRULE:FREQ=DAILY".to_string()],
            attendees: vec![],
            attachments: vec![],
            organizer: Some(Organizer::default()),
            reminders: Some(Reminders::disabled()),
            color_id: Some("7".to_string()),
        }
    }

    #[test]
    fn test_to_google_leaves_id_to_google() {
        let google = make_event().to_google();

        assert!(google.id.is_empty());
        assert_eq!(google.i_cal_uid, "e1@google.com");
        assert_eq!(google.summary, "[work] Redacted");
        assert_eq!(google.recurrence, vec!["RRULE:FREQ=DAILY".to_string()]);
        assert_eq!(google.color_id, "7");
    }

    #[test]
    fn test_disabled_reminders_are_explicit() {
        let google = make_event().to_google();
        let reminders = google.reminders.expect("reminders block must be sent");

        assert!(!reminders.use_default);
        assert!(reminders.overrides.is_empty());
    }

    #[test]
    fn test_empty_organizer_is_sent_blank() {
        let google = make_event().to_google();
        let organizer = google.organizer.unwrap();

        assert!(organizer.email.is_empty());
        assert!(organizer.display_name.is_empty());
    }

    #[test]
    fn test_attendees_and_attachments_are_converted() {
        let mut event = make_event();
        event.attendees = vec![Attendee {
            name: Some("Alice".to_string()),
            email: "alice@example.com".to_string(),
            response_status: None,
            optional: true,
        }];
        event.attachments = vec![Attachment {
            file_url: "https://drive.example.com/deck".to_string(),
            title: Some("Deck".to_string()),
            mime_type: None,
        }];

        let google = event.to_google();

        let attendee = &google.attendees[0];
        assert_eq!(attendee.email, "alice@example.com");
        assert_eq!(attendee.display_name, "Alice");
        assert!(attendee.response_status.is_empty());
        assert!(attendee.optional);
        assert!(!attendee.organizer);

        let attachment = &google.attachments[0];
        assert_eq!(attachment.file_url, "https://drive.example.com/deck");
        assert_eq!(attachment.title, "Deck");
        assert!(attachment.file_id.is_empty());
    }
}
