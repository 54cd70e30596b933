pub mod atlas;
pub mod bounds;
pub mod country;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod severity;
pub mod view;

pub use atlas::{Dataset, LoadState, Selection};
pub use bounds::compute_bounds;
pub use country::{CountryIndex, country_label};
pub use error::FeedError;
pub use model::{Bounds, EarthquakeEvent, LatLng};
pub use severity::{SeverityTier, classify_severity};
