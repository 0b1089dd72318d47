//! Wire schema for the scheduling service API.
//!
//! The fetch layer deserializes raw JSON into these types and converts them
//! into validated core types before anything downstream sees them. Unknown
//! enum strings degrade to safe defaults; a violated time invariant rejects
//! the record.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{UpNextError, UpNextResult};
use crate::event::{Event, EventCategory, RsvpStatus};
use crate::moment::Moment;

/// An event record as returned by the events endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub id: String,
    pub title: String,
    /// Title from the source calendar system (present when the query asks
    /// for source details)
    #[serde(default)]
    pub source_title: Option<String>,
    pub event_start: DateTime<Utc>,
    pub event_end: DateTime<Utc>,
    #[serde(default)]
    pub rsvp_status: Option<RsvpStatus>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub color: Option<String>,
}

/// The "what's next" endpoint payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMoment {
    #[serde(default)]
    pub event: Option<ApiEvent>,
    #[serde(default)]
    pub next_event: Option<ApiEvent>,
}

impl TryFrom<ApiEvent> for Event {
    type Error = UpNextError;

    fn try_from(raw: ApiEvent) -> UpNextResult<Self> {
        if raw.event_end < raw.event_start {
            return Err(UpNextError::InvalidEvent {
                id: raw.id,
                reason: format!(
                    "end {} precedes start {}",
                    raw.event_end, raw.event_start
                ),
            });
        }

        Ok(Event {
            id: raw.id,
            title: raw.title,
            source_title: raw.source_title,
            start: raw.event_start,
            end: raw.event_end,
            rsvp: raw.rsvp_status.unwrap_or(RsvpStatus::NotResponded),
            category: raw.category.unwrap_or(EventCategory::Standard),
            color: raw.color,
        })
    }
}

impl TryFrom<ApiMoment> for Moment {
    type Error = UpNextError;

    fn try_from(raw: ApiMoment) -> UpNextResult<Self> {
        Ok(Moment {
            current: raw.event.map(Event::try_from).transpose()?,
            next: raw.next_event.map(Event::try_from).transpose()?,
        })
    }
}

/// Convert a fetched event list, dropping records that fail validation.
///
/// A single bad record must not blank the whole menu; the caller logs how
/// many were dropped.
pub fn into_events(raw: Vec<ApiEvent>) -> (Vec<Event>, usize) {
    let total = raw.len();
    let events: Vec<Event> = raw.into_iter().filter_map(|r| Event::try_from(r).ok()).collect();
    let dropped = total - events.len();
    (events, dropped)
}
