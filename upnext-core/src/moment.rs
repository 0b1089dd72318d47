//! The "what's happening right now or next" snapshot.

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// A snapshot of the user's immediate schedule state: at most one event in
/// progress and at most one upcoming event.
///
/// Either pointer may arrive from the service as a sync-mirror record; callers
/// resolve them against the full event list with
/// [`crate::reconcile::resolve_moment`] before composing a title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    /// Event in progress right now, if any
    pub current: Option<Event>,
    /// Next upcoming event, if any
    pub next: Option<Event>,
}

impl Moment {
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.next.is_none()
    }
}
