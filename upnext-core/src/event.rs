//! Service-neutral event types.
//!
//! These types represent calendar events in a provider-agnostic way. The
//! fetch layer converts API responses into these types, and all reconciling,
//! bucketing, and title composition works exclusively with them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event (service-neutral)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Service-assigned event identifier. Sync-mirror copies encode the
    /// original event's id here, see [`Event::synced_original_id`].
    pub id: String,
    /// Event title/summary
    pub title: String,
    /// Title override from the source calendar system, preferred over
    /// `title` for display when present
    pub source_title: Option<String>,
    /// Start instant
    pub start: DateTime<Utc>,
    /// End instant (always >= start; enforced at the wire boundary)
    pub end: DateTime<Utc>,
    /// The user's response to the invitation
    pub rsvp: RsvpStatus,
    /// Distinguishes real meetings from system-inserted buffers
    pub category: EventCategory,
    /// Color/category key from the service (display passthrough)
    pub color: Option<String>,
}

/// The user's response state to an event invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsvpStatus {
    Accepted,
    Declined,
    Tentative,
    #[serde(other)]
    NotResponded,
}

/// Event category as reported by the scheduling service.
///
/// Buffer categories are scheduling artifacts (pre-meeting prep, travel
/// time) and are never shown as real meetings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    ConferenceBuffer,
    TravelBuffer,
    #[serde(other)]
    Standard,
}

impl Event {
    /// Title to display, preferring the source-system override.
    pub fn display_title(&self) -> &str {
        self.source_title.as_deref().unwrap_or(&self.title)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether this is a system-inserted buffer rather than a real meeting.
    pub fn is_buffer(&self) -> bool {
        matches!(
            self.category,
            EventCategory::ConferenceBuffer | EventCategory::TravelBuffer
        )
    }

    /// Whether `now` falls within the event window (inclusive on both ends).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }

    /// If this event is a sync-mirror of an event from another connected
    /// calendar, return the original event's id.
    ///
    /// Mirror ids are encoded as `sync:{original_id}:{source_calendar}`.
    /// Both segments must be non-empty for the reference to count; anything
    /// else is treated as a plain event (malformed ids are not an error).
    pub fn synced_original_id(&self) -> Option<&str> {
        let rest = self.id.strip_prefix("sync:")?;
        let (original, source) = rest.split_once(':')?;
        if original.is_empty() || source.is_empty() {
            return None;
        }
        Some(original)
    }
}
