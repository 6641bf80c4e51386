//! FarmTech: culture plot registry with area and input tracking.
//!
//! Registers agricultural plots ("cultures"), computes their area from
//! their dimensions, and tracks the material inputs each plot needs in
//! proportion to that area.
//!
//! # Core Principles
//!
//! - **Derived values stay derived**: area and input totals are recomputed
//!   whenever what they depend on changes, never set directly
//! - **Validate, then mutate**: a rejected operation leaves the store as it was
//! - **No I/O in the store**: persistence is a separate collaborator
//!
//! # Example
//!
//! ```no_run
//! use farmtech::{CropType, DimensionUpdate, Dimensions, RecordStore, Storage, StorageConfig};
//!
//! let storage = Storage::new(&StorageConfig::resolve(None));
//! let mut store = RecordStore::from_records(storage.load().cultures);
//!
//! let id = store.create(CropType::Soy, Dimensions::rectangle(100.0, 50.0))?.id;
//! store.add_input(id, "fertilizer", 2.5)?;
//! store.update_dimensions(id, &DimensionUpdate::new().with_width(25.0))?;
//!
//! storage.save(store.list())?;
//! # Ok::<(), farmtech::FarmTechError>(())
//! ```

pub mod config;
pub mod culture;
pub mod error;
pub mod persistence;
pub mod store;

pub use config::StorageConfig;
pub use culture::{
    parse_dimension, parse_rate, CropType, Culture, DimensionUpdate, Dimensions, Input, ShapeKind,
};
pub use error::{FarmTechError, Result};
pub use persistence::{LoadOutcome, LoadStatus, Storage};
pub use store::{RecordStore, StoreSummary};
