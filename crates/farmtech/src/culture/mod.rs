//! Culture records: crop types, plot geometry, and material inputs.
//!
//! A [`Culture`] carries two kinds of derived value: its `area`, computed
//! from its [`Dimensions`], and each [`Input`]'s `total_required`, computed
//! from that area. Any change to the dimensions recomputes both.

mod crop;
mod input;
mod record;
mod shape;

pub use crop::CropType;
pub use input::{parse_rate, required_total, validate_rate, Input};
pub use record::{Culture, MAX_ID};
pub use shape::{parse_dimension, round2, DimensionUpdate, Dimensions, ShapeKind};
