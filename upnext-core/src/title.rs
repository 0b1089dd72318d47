//! Headline composition from the reconciled moment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::moment::Moment;
use crate::text::{compact_distance, humanize_until, strip_emoji, truncate, SHORT_TITLE_GRAPHEMES};

/// Fallback headline when the moment is empty.
pub const NO_EVENTS_TITLE: &str = "No upcoming events";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleStatus {
    /// Headline event is in progress
    Now,
    /// Headline event is upcoming
    Next,
    /// No headline event
    None,
}

/// The derived headline: chosen event, status, and the two renderings.
///
/// `short` respects the status bar's grapheme budget; `long` is shown as the
/// expanded/alternate line in the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleInfo {
    pub event: Option<Event>,
    pub status: TitleStatus,
    pub long: String,
    pub short: String,
}

impl TitleInfo {
    fn none() -> Self {
        TitleInfo {
            event: None,
            status: TitleStatus::None,
            long: NO_EVENTS_TITLE.to_string(),
            short: NO_EVENTS_TITLE.to_string(),
        }
    }
}

/// Compose the status-bar headline from a reconciled moment.
///
/// Prefers the current event over the next one. The headline is judged by
/// its own times, not by which slot it arrived in: if the chosen event's
/// window contains `now` it renders as "Now:", otherwise as "Next:" with a
/// compact relative distance. Always succeeds; an empty moment yields the
/// fixed fallback text.
pub fn compose_title(moment: &Moment, now: DateTime<Utc>) -> TitleInfo {
    let event = match moment.current.as_ref().or(moment.next.as_ref()) {
        Some(event) => event,
        None => return TitleInfo::none(),
    };

    let title = strip_emoji(event.display_title());
    let short_title = truncate(&title, SHORT_TITLE_GRAPHEMES);

    if event.is_active_at(now) {
        TitleInfo {
            event: Some(event.clone()),
            status: TitleStatus::Now,
            long: format!("Now: {}", title),
            short: format!("Now: {}", short_title),
        }
    } else {
        let distance = compact_distance(&humanize_until(now, event.start));
        TitleInfo {
            event: Some(event.clone()),
            status: TitleStatus::Next,
            long: format!("Next: {} {}", title, distance),
            short: format!("Next: {} {}", short_title, distance),
        }
    }
}
