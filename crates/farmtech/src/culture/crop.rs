//! Crop types and the plot shape each one implies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FarmTechError;

use super::shape::ShapeKind;

/// Crop grown on a culture plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    /// Soy, planted in rectangular fields.
    Soy,
    /// Coffee, planted in circular (center-pivot) plots.
    Coffee,
}

impl CropType {
    /// Every crop type, in menu order.
    pub const ALL: &'static [CropType] = &[CropType::Soy, CropType::Coffee];

    /// Shape of the plot for this crop. Not independently settable.
    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            CropType::Soy => ShapeKind::Rectangle,
            CropType::Coffee => ShapeKind::Circle,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CropType::Soy => "Soy",
            CropType::Coffee => "Coffee",
        }
    }

    /// Identifier used in storage and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Soy => "soy",
            CropType::Coffee => "coffee",
        }
    }
}

impl FromStr for CropType {
    type Err = FarmTechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soy" | "soja" => Ok(CropType::Soy),
            "coffee" | "café" | "cafe" => Ok(CropType::Coffee),
            _ => Err(FarmTechError::InvalidCropType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crop_type() {
        assert_eq!("soy".parse::<CropType>().unwrap(), CropType::Soy);
        assert_eq!("  Soja ".parse::<CropType>().unwrap(), CropType::Soy);
        assert_eq!("COFFEE".parse::<CropType>().unwrap(), CropType::Coffee);
        assert_eq!("café".parse::<CropType>().unwrap(), CropType::Coffee);
        assert_eq!("Café".parse::<CropType>().unwrap(), CropType::Coffee);
    }

    #[test]
    fn test_parse_rejects_unknown_crop() {
        let err = "corn".parse::<CropType>().unwrap_err();
        assert!(matches!(err, FarmTechError::InvalidCropType(ref s) if s == "corn"));
        assert!("".parse::<CropType>().is_err());
    }

    #[test]
    fn test_shape_follows_crop() {
        assert_eq!(CropType::Soy.shape_kind(), ShapeKind::Rectangle);
        assert_eq!(CropType::Coffee.shape_kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&CropType::Coffee).unwrap(), "\"coffee\"");
        let crop: CropType = serde_json::from_str("\"soy\"").unwrap();
        assert_eq!(crop, CropType::Soy);
    }
}
