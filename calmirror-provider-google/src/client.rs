//! `CalendarClient` implementation backed by the Google Calendar API.

use async_trait::async_trait;
use calmirror_core::client::{CalendarClient, CalendarMetadata, UpcomingQuery};
use calmirror_core::error::{SyncError, SyncResult};
use calmirror_core::event::Event;
use google_calendar::Client;
use google_calendar::types::OrderBy;

use crate::google_event::{FromGoogle, ToGoogle};

pub struct GoogleCalendarClient {
    client: Client,
}

impl GoogleCalendarClient {
    pub fn new(client: Client) -> Self {
        GoogleCalendarClient { client }
    }
}

/// Largest page Google accepts for an events listing
const MAX_PAGE_SIZE: usize = 2500;

fn page_size(query: &UpcomingQuery) -> i64 {
    query.max_results.clamp(1, MAX_PAGE_SIZE) as i64
}

/// Convert one listing page, skipping deleted and unreadable entries.
fn events_from_page(page: Vec<google_calendar::types::Event>, max_results: usize) -> Vec<Event> {
    let mut events = Vec::new();
    for google_event in page {
        if events.len() >= max_results {
            break;
        }
        if google_event.status == "cancelled" || google_event.id.is_empty() {
            continue;
        }

        match Event::from_google(google_event) {
            Ok(event) => events.push(event),
            Err(e) => tracing::warn!("Skipping event: {:#}", e),
        }
    }
    events
}

fn is_not_found(err: &impl std::fmt::Display) -> bool {
    let message = err.to_string();
    message.contains("404") || message.contains("Not Found") || message.contains("410")
}

#[async_trait]
impl CalendarClient for GoogleCalendarClient {
    async fn list_upcoming(&self, query: &UpcomingQuery) -> SyncResult<Vec<Event>> {
        let time_min = query.time_min.to_rfc3339();
        let time_max = query
            .time_max
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();

        // One page, capped server-side. Nothing past the cap is fetched.
        let response = self
            .client
            .events()
            .list(
                &query.calendar_id,
                "",                     // i_cal_uid
                0,                      // max_attendees
                page_size(query),       // max_results
                OrderBy::StartTime,     // order_by
                "",                     // page_token
                &[],                    // private_extended_property
                "",                     // q (search query)
                &[],                    // shared_extended_property
                false,                  // show_deleted
                false,                  // show_hidden_invitations
                true,                   // single_events: expand recurring series into instances
                &time_max,              // time_max
                &time_min,              // time_min
                "",                     // time_zone
                "",                     // updated_min
            )
            .await
            .map_err(|e| SyncError::remote("Unable to retrieve upcoming events", e))?;

        Ok(events_from_page(response.body, query.max_results))
    }

    async fn get_event(&self, calendar_id: &str, event_id: &str) -> SyncResult<Option<Event>> {
        let result = self
            .client
            .events()
            .get(calendar_id, event_id, 0, "")
            .await;

        match result {
            Ok(response) => Event::from_google(response.body)
                .map(Some)
                .map_err(|e| SyncError::remote("Unable to read event", format!("{:#}", e))),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(SyncError::remote(
                &format!("Unable to retrieve event {}", event_id),
                e,
            )),
        }
    }

    async fn calendar_metadata(&self, calendar_id: &str) -> SyncResult<CalendarMetadata> {
        let response = self
            .client
            .calendars()
            .get(calendar_id)
            .await
            .map_err(|e| SyncError::remote("Unable to retrieve calendar", e))?;

        Ok(CalendarMetadata {
            id: response.body.id,
        })
    }

    async fn import_event(&self, calendar_id: &str, event: &Event) -> SyncResult<()> {
        let google_event = event.to_google();

        self.client
            .events()
            .import(
                calendar_id,
                0,                              // conference_data_version
                !event.attachments.is_empty(), // supports_attachments
                &google_event,
            )
            .await
            .map_err(|e| SyncError::remote("Unable to add event to calendar", e))?;

        Ok(())
    }
}
