//! Persistence for culture records - a JSON document plus a CSV export.
//!
//! The JSON document is the source of truth. The CSV file (`id`,
//! `crop_type`, `area`) is regenerated on every save and never read back.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::culture::Culture;
use crate::error::{FarmTechError, Result};

/// Current version of the storage document format.
pub const FORMAT_VERSION: &str = "1.0.0";

/// Header of the CSV export.
pub const CSV_HEADER: [&str; 3] = ["id", "crop_type", "area"];

/// On-disk JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageDocument {
    /// Version of the document format.
    pub format_version: String,

    /// When the document was written.
    pub saved_at: DateTime<Utc>,

    /// Every culture, in store order.
    pub cultures: Vec<Culture>,
}

/// What `load` found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Records were read; holds their count.
    Loaded(usize),
    /// No data file exists yet.
    Missing,
    /// The data file exists but holds nothing.
    Empty,
    /// The data file could not be parsed; holds the reason.
    Corrupt(String),
}

/// Result of a lenient load.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Loaded cultures. Empty unless `status` is `Loaded`.
    pub cultures: Vec<Culture>,
    /// What was found.
    pub status: LoadStatus,
}

/// JSON + CSV storage for culture records.
#[derive(Debug, Clone)]
pub struct Storage {
    json_path: PathBuf,
    csv_path: PathBuf,
}

impl Storage {
    /// Create storage at the configured location.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            json_path: config.json_path(),
            csv_path: config.csv_path(),
        }
    }

    /// Path of the JSON document.
    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    /// Path of the CSV export.
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Load every culture, never failing.
    ///
    /// A missing, empty, or malformed document yields no cultures; the
    /// status says which. Corruption is logged.
    pub fn load(&self) -> LoadOutcome {
        if !self.json_path.exists() {
            info!("No data file at {}", self.json_path.display());
            return LoadOutcome {
                cultures: Vec::new(),
                status: LoadStatus::Missing,
            };
        }

        match self.try_load() {
            Ok(cultures) if cultures.is_empty() => LoadOutcome {
                cultures,
                status: LoadStatus::Empty,
            },
            Ok(cultures) => {
                info!(
                    "Loaded {} cultures from {}",
                    cultures.len(),
                    self.json_path.display()
                );
                LoadOutcome {
                    status: LoadStatus::Loaded(cultures.len()),
                    cultures,
                }
            }
            Err(e) => {
                warn!("Ignoring unreadable data file: {}", e);
                LoadOutcome {
                    cultures: Vec::new(),
                    status: LoadStatus::Corrupt(e.to_string()),
                }
            }
        }
    }

    /// Load every culture, failing on malformed data.
    ///
    /// A missing or blank document is not an error and yields no cultures.
    pub fn try_load(&self) -> Result<Vec<Culture>> {
        if !self.json_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.json_path).map_err(|e| FarmTechError::Io {
            path: self.json_path.clone(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut cultures = parse_cultures(&content).map_err(|e| {
            FarmTechError::Persistence(format!(
                "Failed to parse data file '{}': {}",
                self.json_path.display(),
                e
            ))
        })?;

        let mut seen = std::collections::HashSet::new();
        for culture in &mut cultures {
            if !seen.insert(culture.id) {
                return Err(FarmTechError::Persistence(format!(
                    "Duplicate culture id {} in '{}'",
                    culture.id,
                    self.json_path.display()
                )));
            }
            culture.refresh_derived().map_err(|e| {
                FarmTechError::Persistence(format!("Culture {} is invalid: {}", culture.id, e))
            })?;
        }

        Ok(cultures)
    }

    /// Overwrite storage with the full record set, then regenerate the CSV
    /// export.
    pub fn save(&self, cultures: &[Culture]) -> Result<()> {
        ensure_parent_dir(&self.json_path)?;

        let doc = StorageDocument {
            format_version: FORMAT_VERSION.to_string(),
            saved_at: Utc::now(),
            cultures: cultures.to_vec(),
        };

        // Write a sibling file and rename so a failed write never truncates
        // the previous document.
        let tmp_path = self.json_path.with_extension("json.tmp");
        let file = File::create(&tmp_path).map_err(|e| {
            FarmTechError::Persistence(format!(
                "Failed to create file '{}': {}",
                tmp_path.display(),
                e
            ))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &doc)?;
        writer.flush().map_err(|e| FarmTechError::Io {
            path: tmp_path.clone(),
            source: e,
        })?;
        drop(writer);

        fs::rename(&tmp_path, &self.json_path).map_err(|e| {
            FarmTechError::Persistence(format!(
                "Failed to replace '{}': {}",
                self.json_path.display(),
                e
            ))
        })?;

        debug!(
            "Saved {} cultures to {}",
            cultures.len(),
            self.json_path.display()
        );

        self.export_csv(cultures)
    }

    /// Write the tabular projection of the record set.
    pub fn export_csv(&self, cultures: &[Culture]) -> Result<()> {
        ensure_parent_dir(&self.csv_path)?;

        let mut writer = csv::Writer::from_path(&self.csv_path)?;
        writer.write_record(CSV_HEADER)?;
        for culture in cultures {
            writer.write_record([
                culture.id.to_string(),
                culture.crop_type.as_str().to_string(),
                culture.area.to_string(),
            ])?;
        }
        writer.flush().map_err(|e| FarmTechError::Io {
            path: self.csv_path.clone(),
            source: e,
        })?;

        debug!("Exported {} rows to {}", cultures.len(), self.csv_path.display());
        Ok(())
    }
}

// Documents written before the envelope existed are a bare array.
fn parse_cultures(content: &str) -> serde_json::Result<Vec<Culture>> {
    if content.trim_start().starts_with('[') {
        serde_json::from_str(content)
    } else {
        serde_json::from_str::<StorageDocument>(content).map(|doc| doc.cultures)
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                FarmTechError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
