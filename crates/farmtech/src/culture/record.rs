//! The culture record and the invariants tying its derived fields together.

use serde::{Deserialize, Serialize};

use crate::error::{FarmTechError, Result};

use super::crop::CropType;
use super::input::{required_total, Input};
use super::shape::{DimensionUpdate, Dimensions, ShapeKind};

/// One cultivated plot.
///
/// `area` and every input's `total_required` are derived. They are only
/// written by the methods below, which recompute them whenever the values
/// they depend on change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Culture {
    /// Unique identifier, never reused.
    pub id: u64,

    /// Crop grown on the plot.
    pub crop_type: CropType,

    /// Plot dimensions. The variant always matches `crop_type.shape_kind()`.
    pub dimensions: Dimensions,

    /// Area in square meters, rounded to 2 decimal places.
    pub area: f64,

    /// Material inputs, in insertion order.
    #[serde(default)]
    pub inputs: Vec<Input>,
}

impl Culture {
    /// Create a culture with no inputs.
    pub fn new(id: u64, crop_type: CropType, dimensions: Dimensions) -> Result<Self> {
        check_shape(crop_type, &dimensions)?;
        dimensions.validate()?;

        Ok(Self {
            id,
            crop_type,
            dimensions,
            area: dimensions.area()?,
            inputs: Vec::new(),
        })
    }

    /// Shape of the plot, derived from the crop type.
    pub fn shape(&self) -> ShapeKind {
        self.crop_type.shape_kind()
    }

    /// Apply a partial dimension change, then recompute the area and every
    /// input total. Nothing changes if any supplied value is invalid.
    pub fn update_dimensions(&mut self, update: &DimensionUpdate) -> Result<()> {
        let dimensions = self.dimensions.with_update(update)?;
        let (area, totals) = derive(&dimensions, &self.inputs)?;
        self.dimensions = dimensions;
        self.apply_derived(area, totals);
        Ok(())
    }

    /// Append a new input and return it.
    pub fn add_input(&mut self, name: impl Into<String>, rate_per_area: f64) -> Result<&Input> {
        let input = Input::new(name, rate_per_area, self.area)?;
        self.inputs.push(input);
        Ok(&self.inputs[self.inputs.len() - 1])
    }

    /// Remove the input at a 1-based position. Later entries shift down.
    pub fn remove_input(&mut self, position: usize) -> Result<Input> {
        let index = self.input_index(position)?;
        Ok(self.inputs.remove(index))
    }

    /// Change the rate of the input at a 1-based position.
    pub fn update_input_rate(&mut self, position: usize, rate_per_area: f64) -> Result<&Input> {
        let index = self.input_index(position)?;
        let area = self.area;
        self.inputs[index].set_rate(rate_per_area, area)?;
        Ok(&self.inputs[index])
    }

    /// Input at a 1-based position.
    pub fn input(&self, position: usize) -> Option<&Input> {
        position.checked_sub(1).and_then(|i| self.inputs.get(i))
    }

    /// Sum of every input's total requirement.
    pub fn total_input_required(&self) -> f64 {
        self.inputs.iter().map(|i| i.total_required).sum()
    }

    /// Re-check a record read from storage and re-derive its computed fields.
    pub fn refresh_derived(&mut self) -> Result<()> {
        if self.id == 0 || self.id > MAX_ID {
            return Err(FarmTechError::Persistence(format!(
                "culture id must be between 1 and {}",
                MAX_ID
            )));
        }
        check_shape(self.crop_type, &self.dimensions)?;
        self.dimensions.validate()?;

        for input in &self.inputs {
            if input.name.trim().is_empty() {
                return Err(FarmTechError::EmptyInputName);
            }
            super::input::validate_rate(input.rate_per_area)?;
        }

        let (area, totals) = derive(&self.dimensions, &self.inputs)?;
        self.apply_derived(area, totals);
        Ok(())
    }

    fn apply_derived(&mut self, area: f64, totals: Vec<f64>) {
        self.area = area;
        for (input, total) in self.inputs.iter_mut().zip(totals) {
            input.total_required = total;
        }
    }

    fn input_index(&self, position: usize) -> Result<usize> {
        let len = self.inputs.len();
        if position == 0 || position > len {
            return Err(FarmTechError::IndexOutOfRange { position, len });
        }
        Ok(position - 1)
    }
}

/// Largest id a culture may carry. One past it is kept free so the
/// allocator never overflows.
pub const MAX_ID: u64 = u64::MAX - 1;

// Cascade: area first, then every dependent input total. Nothing is
// assigned, so a failure leaves the record as it was.
fn derive(dimensions: &Dimensions, inputs: &[Input]) -> Result<(f64, Vec<f64>)> {
    let area = dimensions.area()?;
    let totals = inputs
        .iter()
        .map(|input| required_total(input.rate_per_area, area))
        .collect::<Result<Vec<_>>>()?;
    Ok((area, totals))
}

fn check_shape(crop_type: CropType, dimensions: &Dimensions) -> Result<()> {
    let expected = crop_type.shape_kind();
    if dimensions.kind() == expected {
        return Ok(());
    }

    // Report the first field the crop's shape needs but did not get.
    let missing = expected
        .fields()
        .iter()
        .find(|field| dimensions.get(field).is_none())
        .copied()
        .unwrap_or("shape");

    Err(FarmTechError::invalid_dimension(
        missing,
        format!(
            "{} plots are {} and need {}",
            crop_type.label(),
            expected.label().to_lowercase(),
            expected.fields().join(" and ")
        ),
    ))
}
