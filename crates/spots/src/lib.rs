//! Normalization, region resolution and upsert of fishing spots.
//!
//! Raw rows from any source are turned into [`RawRecord`]s and handed to an
//! [`Ingestor`], which cleans every field, maps category labels, resolves the
//! region and stores the result by name.

pub mod backfill;
pub mod database;
pub mod mapping;
pub mod memory;
pub mod normalize;
pub mod pipeline;
pub mod region;
pub mod report;
pub mod upsert;

pub use pipeline::{Ingestor, RawRecord, SpotField};
