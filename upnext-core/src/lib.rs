//! Core types and pure scheduling logic for the upnext widget.
//!
//! This crate owns everything between the two raw API fetches and the
//! rendered menu:
//! - `event` / `moment` for the validated data model
//! - `wire` for the API boundary schema
//! - `reconcile` for sync-mirror de-duplication
//! - `sections` for the NOW/TODAY display buckets
//! - `title` / `text` for headline composition
//!
//! Everything here is pure and synchronous; fetching, preferences, and
//! rendering live in the CLI crate.

pub mod error;
pub mod event;
pub mod moment;
pub mod reconcile;
pub mod sections;
pub mod text;
pub mod title;
pub mod wire;

pub use error::{UpNextError, UpNextResult};
pub use event::{Event, EventCategory, RsvpStatus};
pub use moment::Moment;
pub use sections::{DisplaySettings, Section, SectionKind, DEFAULT_UPCOMING_COUNT};
pub use title::{TitleInfo, TitleStatus, NO_EVENTS_TITLE};
