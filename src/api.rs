//! Fetch layer for the scheduling service API.
//!
//! Two resources, fetched independently on every poll cycle: the date-ranged
//! event list and the "what's next" moment pointer. Either fetch may fail or
//! return garbage without taking the widget down — `fetch_snapshot` degrades
//! that side to empty data and the menu renders what it has.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::{debug, warn};

use upnext_core::wire::{self, ApiEvent, ApiMoment};
use upnext_core::{Event, Moment};

use crate::config::Config;

/// Client for the scheduling service's REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// One poll cycle's worth of raw inputs, after boundary validation.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub events: Vec<Event>,
    pub moment: Moment,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .context("api_token contains characters not valid in a header")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ApiClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the event list for a calendar-date range, including events from
    /// all connected calendar sources with their source metadata.
    pub async fn list_events(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>> {
        let url = format!("{}/events", self.base_url);
        debug!(%url, %start, %end, "fetching events");

        let raw: Vec<ApiEvent> = self
            .http
            .get(&url)
            .query(&[
                ("start", start.format("%Y-%m-%d").to_string()),
                ("end", end.format("%Y-%m-%d").to_string()),
                ("allConnected", "true".to_string()),
                ("sourceDetails", "true".to_string()),
            ])
            .send()
            .await
            .context("Events request failed")?
            .error_for_status()
            .context("Events request returned an error status")?
            .json()
            .await
            .context("Failed to decode events response")?;

        let (events, dropped) = wire::into_events(raw);
        if dropped > 0 {
            warn!(dropped, "dropped invalid event records from response");
        }
        debug!(count = events.len(), "fetched events");
        Ok(events)
    }

    /// Fetch the current/next moment pointer.
    pub async fn next_moment(&self) -> Result<Moment> {
        let url = format!("{}/moment/next", self.base_url);
        debug!(%url, "fetching moment");

        let raw: ApiMoment = self
            .http
            .get(&url)
            .send()
            .await
            .context("Moment request failed")?
            .error_for_status()
            .context("Moment request returned an error status")?
            .json()
            .await
            .context("Failed to decode moment response")?;

        Moment::try_from(raw).context("Moment response failed validation")
    }

    /// Fetch both resources concurrently for one poll cycle.
    ///
    /// A failed fetch degrades to empty data for that side only; the other
    /// side still renders.
    pub async fn fetch_snapshot(&self, today: NaiveDate) -> Snapshot {
        let (events, moment) = tokio::join!(self.list_events(today, today), self.next_moment());

        Snapshot {
            events: events.unwrap_or_else(|err| {
                warn!(error = %err, "event list unavailable, rendering without it");
                Vec::new()
            }),
            moment: moment.unwrap_or_else(|err| {
                warn!(error = %err, "moment unavailable, rendering without it");
                Moment::default()
            }),
        }
    }
}
