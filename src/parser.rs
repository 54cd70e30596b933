//! JSON parser for the GeoJSON earthquake feed.
//!
//! Only the outer document is decoded strictly. Features stay as raw JSON
//! values here and are decoded one at a time by the normalizer, so a
//! single malformed record cannot reject the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Top-level feed document. Everything except `features` is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RawFeed {
    #[serde(default)]
    features: Option<Vec<Value>>,
}

impl RawFeed {
    /// Consumes the document, yielding its features. Missing or `null`
    /// `features` yield an empty list.
    pub fn into_features(self) -> Vec<Value> {
        self.features.unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.features.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One feed record, with every field optional. Validated by
/// [`crate::normalize`].
///
/// Only `geometry` is decoded strictly. Every other field falls back to
/// `None` on a type mismatch, so a record with usable coordinates is
/// never dropped over its metadata.
#[derive(Debug, Default, Deserialize)]
pub struct RawFeature {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<RawProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawGeometry {
    #[serde(default)]
    pub coordinates: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawProperties {
    #[serde(default, deserialize_with = "lenient_number")]
    pub mag: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub place: Option<String>,
    #[serde(default, deserialize_with = "lenient_millis")]
    pub time: Option<i64>,
}

/// Decodes `T`, or `None` when the value is null or of another type.
fn lenient<'de, D, T>(d: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// GeoJSON ids may be strings or numbers.
fn lenient_id<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A finite number, either as a JSON number or a numeric string.
fn lenient_number<'de, D>(d: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// Epoch milliseconds; fractional values are truncated.
fn lenient_millis<'de, D>(d: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = lenient_number(d)?;
    Ok(millis
        .filter(|m| (i64::MIN as f64..=i64::MAX as f64).contains(m))
        .map(|m| m.trunc() as i64))
}

/// Decodes the feed document from raw bytes.
///
/// # Errors
///
/// Returns [`crate::error::FeedError::Decode`] if the bytes are not a JSON
/// object.
pub fn parse_feed(bytes: &[u8]) -> Result<RawFeed> {
    let value: Value = serde_json::from_slice(bytes)?;
    if !value.is_object() {
        let err = <serde_json::Error as serde::de::Error>::custom(
            "feed document must be a JSON object",
        );
        return Err(err.into());
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feed_with_features() {
        let feed = parse_feed(br#"{"type":"FeatureCollection","features":[{},{}]}"#).unwrap();
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_parse_missing_features_is_empty() {
        let feed = parse_feed(br#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(feed.is_empty());

        let feed = parse_feed(br#"{"features":null}"#).unwrap();
        assert!(feed.into_features().is_empty());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        assert!(parse_feed(b"<html>502 Bad Gateway</html>").is_err());
        assert!(parse_feed(&[]).is_err());
    }

    #[test]
    fn test_parse_non_object_document() {
        assert!(parse_feed(b"[1, 2, 3]").is_err());
    }

    #[test]
    fn test_raw_feature_numeric_id() {
        let feature: RawFeature = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(feature.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_raw_properties_lenient_types() {
        let props: RawProperties =
            serde_json::from_str(r#"{"mag":"4.0","place":17,"time":1.7e12}"#).unwrap();

        assert_eq!(props.mag, Some(4.0));
        assert_eq!(props.place, None);
        assert_eq!(props.time, Some(1_700_000_000_000));

        let props: RawProperties =
            serde_json::from_str(r#"{"mag":"strong","time":"yesterday"}"#).unwrap();
        assert_eq!(props.mag, None);
        assert_eq!(props.time, None);
    }

    #[test]
    fn test_non_object_properties_become_none() {
        let feature: RawFeature =
            serde_json::from_str(r#"{"geometry":{"coordinates":[1.0,2.0]},"properties":"n/a"}"#)
                .unwrap();
        assert!(feature.properties.is_none());
        assert!(feature.geometry.is_some());
    }

    #[test]
    fn test_raw_feature_tolerates_nulls() {
        let feature: RawFeature = serde_json::from_str(
            r#"{"id":"x","geometry":{"coordinates":[1.0,2.0,null]},"properties":{"mag":null,"place":null}}"#,
        )
        .unwrap();

        let props = feature.properties.unwrap();
        assert_eq!(props.mag, None);
        assert_eq!(props.place, None);
        assert_eq!(
            feature.geometry.unwrap().coordinates.unwrap(),
            vec![Some(1.0), Some(2.0), None]
        );
    }
}
