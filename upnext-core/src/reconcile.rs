//! Reconciliation of sync-mirror events.
//!
//! When the service is connected to several calendar sources, the same
//! occurrence can show up twice: once as the original record and once as a
//! sync-mirror imported from another source. This module collapses those
//! duplicates and resolves mirror pointers back to their originating record.

use std::collections::HashSet;

use crate::event::Event;
use crate::moment::Moment;

/// Remove redundant sync-mirrors from a fetched event list.
///
/// A mirror is dropped when the event it references is itself present in the
/// list, so only the original record survives. Mirrors whose reference points
/// at nothing stay in the list — they are the only copy we have. First-seen
/// order is preserved.
///
/// Idempotent: running the result through again removes nothing.
pub fn dedupe_synced(events: Vec<Event>) -> Vec<Event> {
    let ids: HashSet<&str> = events.iter().map(|e| e.id.as_str()).collect();

    let keep: Vec<bool> = events
        .iter()
        .map(|event| match event.synced_original_id() {
            Some(original_id) => !ids.contains(original_id),
            None => true,
        })
        .collect();

    events
        .into_iter()
        .zip(keep)
        .filter_map(|(event, keep)| keep.then_some(event))
        .collect()
}

/// Resolve a possibly-mirror event back to its original record.
///
/// Returns the original when `event` is a sync-mirror and its original exists
/// in `events`; otherwise the input unchanged. Events without an extractable
/// reference pass through untouched.
pub fn resolve_original<'a>(event: &'a Event, events: &'a [Event]) -> &'a Event {
    match event.synced_original_id() {
        Some(original_id) => events
            .iter()
            .find(|candidate| candidate.id == original_id)
            .unwrap_or(event),
        None => event,
    }
}

/// Resolve both pointers of a moment against the event list.
pub fn resolve_moment(moment: Moment, events: &[Event]) -> Moment {
    Moment {
        current: moment
            .current
            .map(|e| resolve_original(&e, events).clone()),
        next: moment.next.map(|e| resolve_original(&e, events).clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventCategory, RsvpStatus};
    use chrono::{TimeZone, Utc};

    fn event(id: &str, title: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            source_title: None,
            start: Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 3, 20, 16, 0, 0).unwrap(),
            rsvp: RsvpStatus::Accepted,
            category: EventCategory::Standard,
            color: None,
        }
    }

    #[test]
    fn test_dedupe_drops_mirror_when_original_present() {
        let events = vec![
            event("e1", "Team Sync"),
            event("sync:e1:work", "Team Sync"),
            event("e2", "1:1"),
        ];

        let deduped = dedupe_synced(events);

        let ids: Vec<&str> = deduped.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_dedupe_keeps_mirror_without_original() {
        let events = vec![event("sync:gone:work", "Orphan"), event("e2", "1:1")];

        let deduped = dedupe_synced(events);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_dedupe_preserves_order() {
        let events = vec![
            event("e3", "c"),
            event("sync:e3:work", "c copy"),
            event("e1", "a"),
            event("e2", "b"),
        ];

        let ids: Vec<String> = dedupe_synced(events).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e3", "e1", "e2"]);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let events = vec![
            event("e1", "Team Sync"),
            event("sync:e1:work", "Team Sync"),
            event("sync:gone:home", "Orphan"),
        ];

        let once = dedupe_synced(events);
        let twice = dedupe_synced(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolve_original_finds_match() {
        let events = vec![event("e1", "Team Sync"), event("e2", "1:1")];
        let mirror = event("sync:e1:work", "Team Sync (copy)");

        let resolved = resolve_original(&mirror, &events);
        assert_eq!(resolved.id, "e1");
        assert_eq!(resolved.title, "Team Sync");
    }

    #[test]
    fn test_resolve_original_passes_through_without_match_or_reference() {
        let events = vec![event("e1", "Team Sync")];

        let orphan = event("sync:missing:work", "Orphan");
        assert_eq!(resolve_original(&orphan, &events), &orphan);

        let plain = event("e9", "Plain");
        assert_eq!(resolve_original(&plain, &events), &plain);
    }

    #[test]
    fn test_resolve_moment_resolves_both_pointers() {
        let events = vec![event("e1", "Team Sync"), event("e2", "1:1")];
        let moment = Moment {
            current: Some(event("sync:e1:work", "copy")),
            next: Some(event("sync:e2:work", "copy")),
        };

        let resolved = resolve_moment(moment, &events);
        assert_eq!(resolved.current.unwrap().title, "Team Sync");
        assert_eq!(resolved.next.unwrap().title, "1:1");
    }
}
