//! The record store: an ordered collection of cultures plus an id allocator.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::culture::{round2, CropType, Culture, DimensionUpdate, Dimensions, Input, MAX_ID};
use crate::error::{FarmTechError, Result};

/// In-memory culture records.
///
/// Owned by the controller and passed by reference into every operation.
/// Does no I/O; callers persist after a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    records: Vec<Culture>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create an empty store. The first id allocated is 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Adopt previously persisted records.
    ///
    /// The id allocator resumes past the highest existing id.
    pub fn from_records(records: Vec<Culture>) -> Self {
        let next_id = records
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self { records, next_id }
    }

    /// Register a new culture.
    ///
    /// Dimensions are validated before an id is allocated, so a rejected
    /// culture leaves the store unchanged.
    pub fn create(&mut self, crop_type: CropType, dimensions: Dimensions) -> Result<&Culture> {
        if self.next_id > MAX_ID {
            return Err(FarmTechError::IdsExhausted);
        }
        let culture = Culture::new(self.next_id, crop_type, dimensions)?;
        self.next_id += 1;

        debug!(
            "Created culture {} ({}, area {} m²)",
            culture.id, culture.crop_type, culture.area
        );

        self.records.push(culture);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Register a new culture from operator-entered crop text.
    pub fn create_from_text(
        &mut self,
        crop_type: &str,
        dimensions: Dimensions,
    ) -> Result<&Culture> {
        let crop_type: CropType = crop_type.parse()?;
        self.create(crop_type, dimensions)
    }

    /// Find a culture by id.
    pub fn find(&self, id: u64) -> Option<&Culture> {
        self.records.iter().find(|c| c.id == id)
    }

    /// Find a culture by id, failing with [`FarmTechError::NotFound`].
    pub fn get(&self, id: u64) -> Result<&Culture> {
        self.find(id).ok_or(FarmTechError::NotFound { id })
    }

    /// All cultures, in insertion order.
    pub fn list(&self) -> &[Culture] {
        &self.records
    }

    /// Apply a partial dimension change to a culture.
    ///
    /// The area and every input total are recomputed. Nothing changes if
    /// any supplied value is invalid.
    pub fn update_dimensions(&mut self, id: u64, update: &DimensionUpdate) -> Result<&Culture> {
        let culture = self.find_mut(id)?;
        culture.update_dimensions(update)?;
        debug!("Updated culture {} dimensions, area now {} m²", id, culture.area);
        Ok(culture)
    }

    /// Remove a culture. Its id is never reused.
    pub fn delete(&mut self, id: u64) -> Result<Culture> {
        let index = self
            .records
            .iter()
            .position(|c| c.id == id)
            .ok_or(FarmTechError::NotFound { id })?;

        debug!("Deleted culture {}", id);
        Ok(self.records.remove(index))
    }

    /// Attach a material input to a culture.
    pub fn add_input(&mut self, id: u64, name: &str, rate_per_area: f64) -> Result<&Input> {
        let culture = self.find_mut(id)?;
        let input = culture.add_input(name, rate_per_area)?;
        debug!(
            "Added input '{}' to culture {} ({} required)",
            input.name, id, input.total_required
        );
        Ok(input)
    }

    /// Remove the input at a 1-based position from a culture.
    pub fn remove_input(&mut self, id: u64, position: usize) -> Result<Input> {
        let culture = self.find_mut(id)?;
        let removed = culture.remove_input(position)?;
        debug!("Removed input '{}' from culture {}", removed.name, id);
        Ok(removed)
    }

    /// Change the rate of the input at a 1-based position.
    pub fn update_input_rate(
        &mut self,
        id: u64,
        position: usize,
        rate_per_area: f64,
    ) -> Result<&Input> {
        let culture = self.find_mut(id)?;
        culture.update_input_rate(position, rate_per_area)
    }

    /// Id the next created culture will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Number of cultures.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no cultures.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate figures across every culture.
    pub fn summary(&self) -> StoreSummary {
        let mut area_by_crop = BTreeMap::new();
        for culture in &self.records {
            *area_by_crop.entry(culture.crop_type.as_str().to_string()).or_insert(0.0) +=
                culture.area;
        }
        for area in area_by_crop.values_mut() {
            *area = round2(*area);
        }

        StoreSummary {
            total_cultures: self.records.len(),
            total_area: round2(self.records.iter().map(|c| c.area).sum()),
            area_by_crop,
            total_inputs: self.records.iter().map(|c| c.inputs.len()).sum(),
        }
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Culture> {
        self.records
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(FarmTechError::NotFound { id })
    }
}

/// Aggregate figures across a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    /// Number of cultures.
    pub total_cultures: usize,
    /// Sum of every culture's area, in square meters.
    pub total_area: f64,
    /// Area per crop type.
    pub area_by_crop: BTreeMap<String, f64>,
    /// Number of input entries across all cultures.
    pub total_inputs: usize,
}
