//! Material inputs (insumos) attached to a culture.

use serde::{Deserialize, Serialize};

use crate::error::{FarmTechError, Result};

use super::shape::round2;

/// A material requirement for a culture, e.g. fertilizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    /// Product name. Not required to be unique within a culture.
    pub name: String,

    /// Quantity required per square meter.
    pub rate_per_area: f64,

    /// `area * rate_per_area`, rounded to 2 decimal places.
    pub total_required: f64,
}

impl Input {
    /// Create an input for a plot of the given area.
    pub fn new(name: impl Into<String>, rate_per_area: f64, area: f64) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(FarmTechError::EmptyInputName);
        }
        validate_rate(rate_per_area)?;

        Ok(Self {
            name,
            rate_per_area,
            total_required: required_total(rate_per_area, area)?,
        })
    }

    /// Re-derive the total for a new plot area. The input is unchanged on
    /// error.
    pub fn recompute(&mut self, area: f64) -> Result<()> {
        self.total_required = required_total(self.rate_per_area, area)?;
        Ok(())
    }

    /// Change the rate and re-derive the total.
    pub(crate) fn set_rate(&mut self, rate_per_area: f64, area: f64) -> Result<()> {
        validate_rate(rate_per_area)?;
        self.total_required = required_total(rate_per_area, area)?;
        self.rate_per_area = rate_per_area;
        Ok(())
    }
}

/// `area * rate_per_area`, rounded to 2 decimal places.
///
/// Fails if the product does not fit in an `f64`.
pub fn required_total(rate_per_area: f64, area: f64) -> Result<f64> {
    let total = round2(area * rate_per_area);
    if !total.is_finite() {
        return Err(FarmTechError::InvalidRate(
            "total requirement is too large to compute".to_string(),
        ));
    }
    Ok(total)
}

/// Check a rate per area is a finite number greater than zero.
pub fn validate_rate(rate_per_area: f64) -> Result<()> {
    if !rate_per_area.is_finite() {
        return Err(FarmTechError::InvalidRate("must be a finite number".to_string()));
    }
    if rate_per_area <= 0.0 {
        return Err(FarmTechError::InvalidRate(format!(
            "must be greater than zero (got {})",
            rate_per_area
        )));
    }
    Ok(())
}

/// Parse an operator-entered rate per area.
///
/// Accepts `,` as the decimal separator.
pub fn parse_rate(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FarmTechError::InvalidRate("a value is required".to_string()));
    }

    let rate: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| FarmTechError::InvalidRate(format!("'{}' is not a number", trimmed)))?;

    validate_rate(rate)?;
    Ok(rate)
}
