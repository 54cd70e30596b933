//! Loaded earthquake data and the selection logic built on top of it.
//!
//! A [`Dataset`] is rebuilt wholesale on every load and never mutated
//! afterwards; selections only borrow it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::bounds::compute_bounds;
use crate::country::{CountryCount, CountryIndex, UNKNOWN_COUNTRY};
use crate::error::Result;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::model::{Bounds, EarthquakeEvent};
use crate::normalize::normalize_feed;
use crate::parser::{RawFeed, parse_feed};
use crate::view::{Marker, Viewport};

/// Selector entry shown for events without a country token.
pub const UNKNOWN_OPTION_LABEL: &str = "Unknown/Ocean";
/// Placeholder entry meaning "no country selected".
pub const PLACEHOLDER_OPTION_LABEL: &str = "Select a country";

/// Normalized events plus their per-country tally.
#[derive(Debug, Clone)]
pub struct Dataset {
    events: Vec<EarthquakeEvent>,
    index: CountryIndex,
    skipped: usize,
    fetched_at: DateTime<Utc>,
}

impl Dataset {
    /// Normalizes `feed` and tallies the result. The raw feed is dropped.
    pub fn from_feed(feed: RawFeed) -> Self {
        let normalized = normalize_feed(feed);
        let mut dataset = Self::from_events(normalized.events);
        dataset.skipped = normalized.skipped;
        dataset
    }

    pub fn from_events(events: Vec<EarthquakeEvent>) -> Self {
        let index = CountryIndex::from_events(&events);
        Self {
            events,
            index,
            skipped: 0,
            fetched_at: Utc::now(),
        }
    }

    /// Parses and normalizes a feed body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_feed(parse_feed(bytes)?))
    }

    pub fn events(&self) -> &[EarthquakeEvent] {
        &self.events
    }

    pub fn index(&self) -> &CountryIndex {
        &self.index
    }

    /// Feed records dropped during normalization.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Sidebar tally, including the `Unknown` bucket.
    pub fn tally(&self) -> Vec<CountryCount> {
        self.index.sorted()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.events.iter().map(Marker::from_event).collect()
    }

    /// Entries for the country selector: the placeholder, every known
    /// label alphabetically, then `Unknown` under [`UNKNOWN_OPTION_LABEL`].
    ///
    /// The `Unknown` entry is always offered, even when no event falls in
    /// that bucket.
    pub fn selector_options(&self) -> Vec<SelectorOption> {
        let mut options = vec![SelectorOption {
            value: String::new(),
            label: PLACEHOLDER_OPTION_LABEL.to_string(),
        }];
        options.extend(
            self.index
                .labels()
                .into_iter()
                .filter(|c| *c != UNKNOWN_COUNTRY)
                .map(|c| SelectorOption {
                    value: c.to_string(),
                    label: c.to_string(),
                }),
        );
        options.push(SelectorOption {
            value: UNKNOWN_COUNTRY.to_string(),
            label: UNKNOWN_OPTION_LABEL.to_string(),
        });
        options
    }

    /// Count and viewport for `country`. An empty string clears the
    /// selection; a label with no events is a valid, empty result.
    pub fn select(&self, country: &str) -> Selection {
        Selection {
            country: country.to_string(),
            count: self.index.count(country),
            bounds: compute_bounds(&self.events, country),
        }
    }
}

/// One `<option>` of the country selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
}

/// Outcome of choosing a country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub country: String,
    pub count: usize,
    /// `None` means the map keeps its current viewport.
    pub bounds: Option<Bounds>,
}

impl Selection {
    pub fn is_cleared(&self) -> bool {
        self.country.is_empty()
    }

    /// Viewport change to apply, if any.
    pub fn viewport(&self) -> Option<Viewport> {
        self.bounds.map(Viewport::fit)
    }

    /// Sidebar sentence for the selection; `None` when nothing is selected.
    pub fn message(&self) -> Option<String> {
        if self.is_cleared() {
            return None;
        }
        Some(match self.count {
            0 => format!("{} has no earthquakes found.", self.country),
            n => format!("{} has {} earthquake(s).", self.country, n),
        })
    }
}

/// Lifecycle of the single feed load.
///
/// Starts in `Loading` and moves exactly once to `Ready` or `Failed`.
/// `Failed` is terminal: nothing retries until the next full reload.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Dataset),
    Failed(String),
}

impl LoadState {
    /// Fetches `url` once and builds the resulting state. Never returns an
    /// error; failures become [`LoadState::Failed`].
    #[tracing::instrument(skip(client))]
    pub async fn load<C: HttpClient>(client: &C, url: &str) -> Self {
        let loaded = match fetch_bytes(client, url).await {
            Ok(bytes) => Dataset::from_bytes(&bytes),
            Err(e) => Err(e),
        };
        Self::from_result(loaded)
    }

    pub fn from_result(result: Result<Dataset>) -> Self {
        match result {
            Ok(dataset) => {
                info!(
                    events = dataset.events().len(),
                    skipped = dataset.skipped(),
                    countries = dataset.index().len(),
                    "Earthquake feed loaded"
                );
                LoadState::Ready(dataset)
            }
            Err(e) => {
                error!(error = %e, "Earthquake feed load failed");
                LoadState::Failed(e.to_string())
            }
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            LoadState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
