//! Turns raw feed features into [`EarthquakeEvent`] values.
//!
//! Partial success: a record that cannot be decoded or has no usable
//! coordinates is skipped and counted, the rest of the batch goes through.

use tracing::debug;

use crate::model::EarthquakeEvent;
use crate::parser::{RawFeature, RawFeed};

/// Result of normalizing one feed document.
#[derive(Debug, Default)]
pub struct Normalized {
    pub events: Vec<EarthquakeEvent>,
    /// Records dropped as malformed.
    pub skipped: usize,
}

/// Normalizes every feature of `feed`, consuming it.
pub fn normalize_feed(feed: RawFeed) -> Normalized {
    normalize_features(feed.into_features())
}

pub fn normalize_features(features: Vec<serde_json::Value>) -> Normalized {
    let mut out = Normalized {
        events: Vec::with_capacity(features.len()),
        skipped: 0,
    };

    for (index, value) in features.into_iter().enumerate() {
        let raw: RawFeature = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(index, error = %e, "Skipping undecodable feed record");
                out.skipped += 1;
                continue;
            }
        };

        match normalize_feature(raw, index) {
            Some(event) => out.events.push(event),
            None => {
                debug!(index, "Skipping feed record without valid coordinates");
                out.skipped += 1;
            }
        }
    }

    out
}

/// Validates a single record. `index` names records that carry no id.
fn normalize_feature(raw: RawFeature, index: usize) -> Option<EarthquakeEvent> {
    let coords = raw.geometry?.coordinates?;
    // [lon, lat] or [lon, lat, depth]
    if !(2..=3).contains(&coords.len()) {
        return None;
    }
    let longitude = coords[0]?;
    let latitude = coords[1]?;
    if !valid_lon_lat(longitude, latitude) {
        return None;
    }

    let props = raw.properties.unwrap_or_default();

    Some(EarthquakeEvent {
        id: raw.id.unwrap_or_else(|| format!("feature-{index}")),
        longitude,
        latitude,
        magnitude: props.mag.filter(|m| m.is_finite()),
        place: props.place,
        time_millis: props.time,
    })
}

fn valid_lon_lat(lon: f64, lat: f64) -> bool {
    lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat)
}
