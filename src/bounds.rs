//! Fits the map viewport to the events of one country.

use crate::country::event_country;
use crate::model::{Bounds, EarthquakeEvent};

/// Pixel margin the map applies on every side when fitting a [`Bounds`].
/// A single-event country yields a zero-area box; the padding is what keeps
/// the resulting viewport valid.
pub const FIT_PADDING_PX: u32 = 50;

/// Bounding box of every event whose country label equals `country`.
///
/// Returns `None` (leave the viewport alone) when `country` is empty or
/// nothing matches.
pub fn compute_bounds(events: &[EarthquakeEvent], country: &str) -> Option<Bounds> {
    if country.is_empty() {
        return None;
    }

    events
        .iter()
        .filter(|e| event_country(e) == country)
        .fold(None, |acc: Option<Bounds>, e| match acc {
            Some(mut b) => {
                b.extend(e.position());
                Some(b)
            }
            None => Some(Bounds::from_point(e.position())),
        })
}
