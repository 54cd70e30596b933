//! View models handed to whatever draws the map.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;

use crate::bounds::FIT_PADDING_PX;
use crate::model::{Bounds, EarthquakeEvent, LatLng};
use crate::severity::{SeverityTier, classify_severity};

/// Initial map center before any country is selected.
pub const DEFAULT_CENTER: LatLng = LatLng { lat: 20.0, lng: 0.0 };
pub const DEFAULT_ZOOM: u8 = 2;

/// A viewport change requested from the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Viewport {
    /// Whole-world view used on first render.
    World { center: LatLng, zoom: u8 },
    /// Fit `bounds` with `padding_px` on every side.
    Fit { bounds: Bounds, padding_px: u32 },
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::World {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Viewport {
    pub fn fit(bounds: Bounds) -> Self {
        Viewport::Fit {
            bounds,
            padding_px: FIT_PADDING_PX,
        }
    }
}

/// Popup content for one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub place: String,
    pub magnitude: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

impl Popup {
    /// Renders the popup with the event time shown in `tz`.
    pub fn render<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let magnitude = self
            .magnitude
            .map_or_else(|| "unknown".to_string(), |m| m.to_string());
        let time = self.time.map_or_else(
            || "unknown".to_string(),
            |t| t.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        format!("{}\nMagnitude: {}\nTime: {}", self.place, magnitude, time)
    }
}

/// One map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub position: LatLng,
    pub tier: SeverityTier,
    pub icon_url: &'static str,
    pub popup: Popup,
}

impl Marker {
    pub fn from_event(event: &EarthquakeEvent) -> Self {
        let tier = classify_severity(event.magnitude);
        Self {
            id: event.id.clone(),
            position: event.position(),
            tier,
            icon_url: tier.icon_url(),
            popup: Popup {
                place: event.place.clone().unwrap_or_default(),
                magnitude: event.magnitude,
                time: event.time_millis.and_then(DateTime::<Utc>::from_timestamp_millis),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> EarthquakeEvent {
        EarthquakeEvent {
            id: "us7000abcd".to_string(),
            longitude: 139.69,
            latitude: 35.69,
            magnitude: Some(5.2),
            place: Some("10km N of Tokyo, Japan".to_string()),
            time_millis: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn test_marker_from_event() {
        let marker = Marker::from_event(&event());

        assert_eq!(marker.position, LatLng { lat: 35.69, lng: 139.69 });
        assert_eq!(marker.tier, SeverityTier::High);
        assert!(marker.icon_url.ends_with("red-dot.png"));
    }

    #[test]
    fn test_popup_render_in_utc() {
        let marker = Marker::from_event(&event());

        assert_eq!(
            marker.popup.render(&Utc),
            "10km N of Tokyo, Japan\nMagnitude: 5.2\nTime: 2023-11-14 22:13:20"
        );
    }

    #[test]
    fn test_popup_render_missing_fields() {
        let mut e = event();
        e.magnitude = None;
        e.place = None;
        e.time_millis = None;

        let marker = Marker::from_event(&e);

        assert_eq!(marker.tier, SeverityTier::Low);
        assert_eq!(
            marker.popup.render(&Utc),
            "\nMagnitude: unknown\nTime: unknown"
        );
    }

    #[test]
    fn test_default_viewport_is_world() {
        assert_eq!(
            Viewport::default(),
            Viewport::World {
                center: LatLng { lat: 20.0, lng: 0.0 },
                zoom: 2
            }
        );
    }
}
