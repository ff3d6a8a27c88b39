use anyhow::{Result, bail};
use calmirror_core::event::{
    Attachment, Attendee, Event, EventStatus, EventTime, Organizer, Reminder, Reminders,
};
use google_calendar::types::EventDateTime;

pub trait FromGoogle {
    fn from_google(event: google_calendar::types::Event) -> Result<Self>
    where
        Self: Sized;
}

impl FromGoogle for Event {
    fn from_google(event: google_calendar::types::Event) -> Result<Self> {
        let Some(start) = event.start.as_ref().and_then(event_time_from_google) else {
            bail!("Event {} has no start time", event.id);
        };

        let Some(end) = event.end.as_ref().and_then(event_time_from_google) else {
            bail!("Event {} has no end time", event.id);
        };

        let status = match event.status.as_str() {
            "tentative" => EventStatus::Tentative,
            "cancelled" => EventStatus::Cancelled,
            _ => EventStatus::Confirmed,
        };

        let reminders = event.reminders.as_ref().map(|rem| Reminders {
            use_default: rem.use_default,
            overrides: rem
                .overrides
                .iter()
                .map(|r| Reminder {
                    method: r.method.clone(),
                    minutes: r.minutes,
                })
                .collect(),
        });

        let organizer = event.organizer.as_ref().map(|o| Organizer {
            display_name: non_empty(&o.display_name),
            email: non_empty(&o.email),
        });

        let attendees = event
            .attendees
            .iter()
            .map(|a| Attendee {
                name: non_empty(&a.display_name),
                email: a.email.clone(),
                response_status: non_empty(&a.response_status),
                optional: a.optional,
            })
            .collect();

        let attachments = event
            .attachments
            .iter()
            .map(|a| Attachment {
                file_url: a.file_url.clone(),
                title: non_empty(&a.title),
                mime_type: non_empty(&a.mime_type),
            })
            .collect();

        Ok(Event {
            ical_uid: non_empty(&event.i_cal_uid),
            recurring_event_id: non_empty(&event.recurring_event_id),
            description: non_empty(&event.description),
            location: non_empty(&event.location),
            color_id: non_empty(&event.color_id),
            id: event.id,
            summary: event.summary,
            start,
            end,
            status,
            recurrence: event.recurrence,
            attendees,
            attachments,
            organizer,
            reminders,
        })
    }
}

fn event_time_from_google(time: &EventDateTime) -> Option<EventTime> {
    if let Some(dt) = time.date_time {
        Some(EventTime::DateTime(dt))
    } else {
        time.date.map(EventTime::Date)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
