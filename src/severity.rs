use serde::Serialize;

/// Discrete marker severity derived from magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    High,
    Medium,
    Low,
}

impl SeverityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityTier::High => "high",
            SeverityTier::Medium => "medium",
            SeverityTier::Low => "low",
        }
    }

    /// Marker icon drawn for this tier.
    pub fn icon_url(self) -> &'static str {
        match self {
            SeverityTier::High => "https://maps.gstatic.com/mapfiles/ms2/micons/red-dot.png",
            SeverityTier::Medium => "https://maps.gstatic.com/mapfiles/ms2/micons/orange-dot.png",
            SeverityTier::Low => "https://maps.gstatic.com/mapfiles/ms2/micons/yellow-dot.png",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classifies a magnitude into a [`SeverityTier`].
///
/// | Magnitude   | Tier   |
/// |-------------|--------|
/// | >= 5.0      | high   |
/// | >= 3.0      | medium |
/// | < 3.0       | low    |
/// | missing/NaN | low    |
pub fn classify_severity(magnitude: Option<f64>) -> SeverityTier {
    match magnitude {
        Some(m) if m >= 5.0 => SeverityTier::High,
        Some(m) if m >= 3.0 => SeverityTier::Medium,
        _ => SeverityTier::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(classify_severity(Some(7.8)), SeverityTier::High);
        assert_eq!(classify_severity(Some(5.0)), SeverityTier::High);
        assert_eq!(classify_severity(Some(4.999)), SeverityTier::Medium);
        assert_eq!(classify_severity(Some(3.0)), SeverityTier::Medium);
        assert_eq!(classify_severity(Some(2.999)), SeverityTier::Low);
        assert_eq!(classify_severity(Some(-0.5)), SeverityTier::Low);
        assert_eq!(classify_severity(None), SeverityTier::Low);
        assert_eq!(classify_severity(Some(f64::NAN)), SeverityTier::Low);
    }

    #[test]
    fn test_icon_per_tier() {
        assert!(SeverityTier::High.icon_url().ends_with("red-dot.png"));
        assert!(SeverityTier::Medium.icon_url().ends_with("orange-dot.png"));
        assert!(SeverityTier::Low.icon_url().ends_with("yellow-dot.png"));
        assert_eq!(SeverityTier::Medium.to_string(), "medium");
    }
}
