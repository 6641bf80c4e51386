//! Plot geometry and area calculation.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FarmTechError, Result};

/// Geometric category of a culture's area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
        }
    }

    /// Dimension fields the shape is defined by, in prompt order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ShapeKind::Rectangle => &["length", "width"],
            ShapeKind::Circle => &["radius"],
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Dimensions of a plot, in meters. The variant is the shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Dimensions {
    Rectangle { length: f64, width: f64 },
    Circle { radius: f64 },
}

impl Dimensions {
    /// Rectangle dimensions.
    pub fn rectangle(length: f64, width: f64) -> Self {
        Dimensions::Rectangle { length, width }
    }

    /// Circle dimensions.
    pub fn circle(radius: f64) -> Self {
        Dimensions::Circle { radius }
    }

    /// Shape these dimensions describe.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Dimensions::Rectangle { .. } => ShapeKind::Rectangle,
            Dimensions::Circle { .. } => ShapeKind::Circle,
        }
    }

    /// Check every value is a finite number greater than zero.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Dimensions::Rectangle { length, width } => {
                check_positive("length", length)?;
                check_positive("width", width)
            }
            Dimensions::Circle { radius } => check_positive("radius", radius),
        }
    }

    /// Area in square meters, rounded to 2 decimal places.
    ///
    /// Fails when the dimensions are valid but their area does not fit in
    /// an `f64`.
    pub fn area(&self) -> Result<f64> {
        let raw = match *self {
            Dimensions::Rectangle { length, width } => length * width,
            Dimensions::Circle { radius } => PI * radius * radius,
        };
        let area = round2(raw);
        if !area.is_finite() {
            return Err(FarmTechError::invalid_dimension(
                "area",
                format!("{} plot is too large to compute", self.kind().label().to_lowercase()),
            ));
        }
        Ok(area)
    }

    /// Apply a partial change set.
    ///
    /// Every supplied field is checked before anything is applied, so an
    /// invalid value leaves the caller with its current dimensions.
    pub fn with_update(&self, update: &DimensionUpdate) -> Result<Dimensions> {
        let kind = self.kind();
        for (field, value) in update.supplied() {
            if !kind.fields().contains(&field) {
                return Err(FarmTechError::invalid_dimension(
                    field,
                    format!("does not apply to a {} plot", kind.label().to_lowercase()),
                ));
            }
            check_positive(field, value)?;
        }

        Ok(match *self {
            Dimensions::Rectangle { length, width } => Dimensions::Rectangle {
                length: update.length.unwrap_or(length),
                width: update.width.unwrap_or(width),
            },
            Dimensions::Circle { radius } => Dimensions::Circle {
                radius: update.radius.unwrap_or(radius),
            },
        })
    }

    /// Value of a named field, if the shape has it.
    pub fn get(&self, field: &str) -> Option<f64> {
        match (*self, field) {
            (Dimensions::Rectangle { length, .. }, "length") => Some(length),
            (Dimensions::Rectangle { width, .. }, "width") => Some(width),
            (Dimensions::Circle { radius }, "radius") => Some(radius),
            _ => None,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimensions::Rectangle { length, width } => {
                write!(f, "Rectangle (length: {}m, width: {}m)", length, width)
            }
            Dimensions::Circle { radius } => write!(f, "Circle (radius: {}m)", radius),
        }
    }
}

/// Partial dimension changes. `None` leaves a field unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl DimensionUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Set a new width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set a new radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Set a field by name.
    pub fn set(&mut self, field: &str, value: f64) -> Result<()> {
        match field {
            "length" => self.length = Some(value),
            "width" => self.width = Some(value),
            "radius" => self.radius = Some(value),
            other => {
                return Err(FarmTechError::invalid_dimension(other, "unknown dimension"));
            }
        }
        Ok(())
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.supplied().is_empty()
    }

    fn supplied(&self) -> Vec<(&'static str, f64)> {
        [
            ("length", self.length),
            ("width", self.width),
            ("radius", self.radius),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse an operator-entered dimension.
///
/// Accepts `,` as the decimal separator.
pub fn parse_dimension(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FarmTechError::invalid_dimension(field, "a value is required"));
    }

    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| {
            FarmTechError::invalid_dimension(field, format!("'{}' is not a number", trimmed))
        })?;

    check_positive(field, value)?;
    Ok(value)
}

fn check_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(FarmTechError::invalid_dimension(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(FarmTechError::invalid_dimension(
            field,
            format!("must be greater than zero (got {})", value),
        ));
    }
    Ok(())
}
