//! Country labels and the per-country tally.

use serde::Serialize;
use std::collections::HashMap;

use crate::model::EarthquakeEvent;

/// Label used when a place string yields no country token.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Derives the grouping label from a place string such as
/// `"10km N of Tokyo, Japan"`: the text after the last comma, trimmed.
///
/// This is a free-text token, not a validated country name. A missing
/// place, or one whose trailing token trims to nothing, yields
/// [`UNKNOWN_COUNTRY`].
pub fn country_label(place: Option<&str>) -> &str {
    let token = place
        .and_then(|p| p.rsplit(',').next())
        .map(str::trim)
        .unwrap_or_default();

    if token.is_empty() { UNKNOWN_COUNTRY } else { token }
}

/// Convenience over [`country_label`] for an event.
pub fn event_country(event: &EarthquakeEvent) -> &str {
    country_label(event.place.as_deref())
}

/// One row of the sorted tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Number of events per country label.
///
/// Storage order is unspecified; use [`CountryIndex::sorted`] for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountryIndex {
    counts: HashMap<String, usize>,
}

impl CountryIndex {
    /// Tallies `events` in one pass.
    pub fn from_events(events: &[EarthquakeEvent]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for event in events {
            let label = event_country(event);
            match counts.get_mut(label) {
                Some(n) => *n += 1,
                None => {
                    counts.insert(label.to_string(), 1);
                }
            }
        }
        Self { counts }
    }

    /// Count for `country`, zero when the label never occurred.
    pub fn count(&self, country: &str) -> usize {
        self.counts.get(country).copied().unwrap_or(0)
    }

    /// Sum of all buckets; equals the number of tallied events.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Rows ordered by count descending, ties broken by label ascending.
    pub fn sorted(&self) -> Vec<CountryCount> {
        let mut rows: Vec<CountryCount> = self
            .iter()
            .map(|(country, count)| CountryCount {
                country: country.to_string(),
                count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));
        rows
    }

    /// Labels in alphabetical order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}
