//! Bucketing of reconciled events into display sections.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{Event, RsvpStatus};

/// Display settings supplied by the host's preference layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Maximum number of events shown in the TODAY section
    pub upcoming_count: usize,
    /// Show events the user declined or never responded to
    pub include_declined: bool,
}

pub const DEFAULT_UPCOMING_COUNT: usize = 5;

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            upcoming_count: DEFAULT_UPCOMING_COUNT,
            include_declined: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// Events in progress right now
    Now,
    /// Events starting later today
    Today,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Now => "NOW",
            SectionKind::Today => "TODAY",
        }
    }
}

/// A named, ordered run of events. Pure view artifact, recomputed on every
/// refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub events: Vec<Event>,
}

/// Events spanning a full day or more are calendar furniture, not meetings.
const LONG_EVENT_CUTOFF_HOURS: i64 = 24;

/// Classify reconciled events into NOW and TODAY sections.
///
/// `now` carries the timezone whose calendar day bounds the TODAY bucket;
/// the binary passes the local clock, tests pass a fixed zone. Sections that
/// end up empty are omitted entirely. Fetch order (assumed chronological) is
/// preserved within each section.
pub fn bucket_events<Tz: TimeZone>(
    events: &[Event],
    now: DateTime<Tz>,
    settings: &DisplaySettings,
) -> Vec<Section> {
    let now_utc = now.with_timezone(&Utc);
    let end_of_day = end_of_day_utc(&now);

    let visible: Vec<&Event> = events
        .iter()
        .filter(|e| {
            settings.include_declined
                || !matches!(e.rsvp, RsvpStatus::Declined | RsvpStatus::NotResponded)
        })
        .filter(|e| !e.is_buffer())
        .filter(|e| e.duration() < Duration::hours(LONG_EVENT_CUTOFF_HOURS))
        .collect();

    let now_events: Vec<Event> = visible
        .iter()
        .filter(|e| e.is_active_at(now_utc))
        .map(|e| (*e).clone())
        .collect();

    let today_events: Vec<Event> = visible
        .iter()
        .filter(|e| e.start >= now_utc && e.start <= end_of_day)
        .take(settings.upcoming_count)
        .map(|e| (*e).clone())
        .collect();

    let mut sections = Vec::new();
    if !now_events.is_empty() {
        sections.push(Section {
            kind: SectionKind::Now,
            events: now_events,
        });
    }
    if !today_events.is_empty() {
        sections.push(Section {
            kind: SectionKind::Today,
            events: today_events,
        });
    }
    sections
}

/// Last second of `now`'s calendar day, as a UTC instant.
fn end_of_day_utc<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(23, 59, 59)
        .expect("23:59:59 is a valid time")
        .and_local_timezone(now.timezone())
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // A DST gap at end of day cannot push past the next midnight
        .unwrap_or_else(|| now.with_timezone(&Utc) + Duration::hours(24))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
    }

    fn event_at(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            source_title: None,
            start,
            end,
            rsvp: RsvpStatus::Accepted,
            category: EventCategory::Standard,
            color: None,
        }
    }

    fn upcoming(id: &str, minutes_from_now: i64) -> Event {
        let start = now() + Duration::minutes(minutes_from_now);
        event_at(id, start, start + Duration::minutes(30))
    }

    fn kinds(sections: &[Section]) -> Vec<SectionKind> {
        sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_active_event_lands_in_now_bucket() {
        let events = vec![event_at(
            "e1",
            now() - Duration::minutes(10),
            now() + Duration::minutes(20),
        )];

        let sections = bucket_events(&events, now(), &DisplaySettings::default());
        assert_eq!(kinds(&sections), vec![SectionKind::Now]);
        assert_eq!(sections[0].events[0].id, "e1");
    }

    #[test]
    fn test_now_bucket_boundaries_are_inclusive() {
        let starting = event_at("starts", now(), now() + Duration::minutes(30));
        let ending = event_at("ends", now() - Duration::minutes(30), now());

        let sections = bucket_events(
            &[starting, ending],
            now(),
            &DisplaySettings::default(),
        );
        let now_section = &sections[0];
        assert_eq!(now_section.kind, SectionKind::Now);
        assert_eq!(now_section.events.len(), 2);
    }

    #[test]
    fn test_declined_and_not_responded_hidden_by_default() {
        let mut declined = upcoming("declined", 60);
        declined.rsvp = RsvpStatus::Declined;
        let mut silent = upcoming("silent", 90);
        silent.rsvp = RsvpStatus::NotResponded;
        let mut tentative = upcoming("tentative", 120);
        tentative.rsvp = RsvpStatus::Tentative;

        let events = vec![declined, silent, tentative];

        let sections = bucket_events(&events, now(), &DisplaySettings::default());
        let ids: Vec<&str> = sections[0].events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["tentative"]);

        let settings = DisplaySettings {
            include_declined: true,
            ..Default::default()
        };
        let sections = bucket_events(&events, now(), &settings);
        assert_eq!(sections[0].events.len(), 3);
    }

    #[test]
    fn test_buffer_events_always_excluded() {
        let mut travel = upcoming("travel", 30);
        travel.category = EventCategory::TravelBuffer;
        let mut prep = event_at(
            "prep",
            now() - Duration::minutes(5),
            now() + Duration::minutes(5),
        );
        prep.category = EventCategory::ConferenceBuffer;

        let settings = DisplaySettings {
            include_declined: true,
            ..Default::default()
        };
        let sections = bucket_events(&[travel, prep], now(), &settings);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_long_event_duration_boundary() {
        let all_day = event_at("allday", now() - Duration::hours(1), now() + Duration::hours(23));
        assert_eq!(all_day.duration(), Duration::hours(24));
        let long_meeting = event_at(
            "long",
            now() - Duration::minutes(1),
            now() + Duration::hours(23) + Duration::minutes(58),
        );
        assert_eq!(
            long_meeting.duration(),
            Duration::hours(23) + Duration::minutes(59)
        );

        let sections = bucket_events(&[all_day, long_meeting], now(), &DisplaySettings::default());
        let ids: Vec<&str> = sections[0].events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["long"]);
    }

    #[test]
    fn test_today_bucket_capped_in_fetch_order() {
        let events: Vec<Event> = (0..10)
            .map(|i| upcoming(&format!("e{}", i), 10 + i * 10))
            .collect();

        let sections = bucket_events(&events, now(), &DisplaySettings::default());
        assert_eq!(kinds(&sections), vec![SectionKind::Today]);
        let ids: Vec<&str> = sections[0].events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e0", "e1", "e2", "e3", "e4"]);
    }

    #[test]
    fn test_tomorrow_events_not_in_today_bucket() {
        let tomorrow = upcoming("tomorrow", 13 * 60); // 01:00 next day UTC
        let tonight = upcoming("tonight", 11 * 60); // 23:00 today UTC

        let sections = bucket_events(&[tomorrow, tonight], now(), &DisplaySettings::default());
        let ids: Vec<&str> = sections[0].events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["tonight"]);
    }

    #[test]
    fn test_end_of_day_follows_now_timezone() {
        // 23:00 UTC is already tomorrow in UTC+2, so an event at 23:30 UTC
        // falls out of "today" for that observer.
        let tz = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let local_now = now().with_timezone(&tz); // 14:00 local
        let late = upcoming("late", 11 * 60 + 30); // 23:30 UTC, 01:30 local next day

        let sections = bucket_events(&[late.clone()], local_now, &DisplaySettings::default());
        assert!(sections.is_empty());

        let sections = bucket_events(&[late], now(), &DisplaySettings::default());
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_empty_sections_omitted() {
        let sections = bucket_events(&[], now(), &DisplaySettings::default());
        assert!(sections.is_empty());

        // Only a NOW event: no TODAY entry at all
        let active = event_at("e1", now() - Duration::minutes(5), now() + Duration::minutes(5));
        let sections = bucket_events(&[active], now(), &DisplaySettings::default());
        assert_eq!(kinds(&sections), vec![SectionKind::Now]);
    }
}
