//! Normalized earthquake events and map geometry.

use serde::Serialize;

/// One earthquake from the feed, after validation.
///
/// Coordinates are always finite and inside the valid degree ranges;
/// [`crate::normalize`] drops any record that would break that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeEvent {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
    pub magnitude: Option<f64>,
    pub place: Option<String>,
    pub time_millis: Option<i64>,
}

impl EarthquakeEvent {
    pub fn position(&self) -> LatLng {
        LatLng {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

/// A point in degrees, latitude first as map libraries expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Minimal axis-aligned box covering a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south_west: p,
            north_east: p,
        }
    }

    /// Grows the box so it also covers `p`.
    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }

    /// True when the box has zero area in both axes (a single point).
    pub fn is_point(&self) -> bool {
        self.south_west == self.north_east
    }

    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south_west.lat + self.north_east.lat) / 2.0,
            lng: (self.south_west.lng + self.north_east.lng) / 2.0,
        }
    }
}
