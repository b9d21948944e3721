//! Memoscope Core - record model and content identity
//!
//! This crate provides the data layer shared by the pipeline and the CLI:
//! - Record and record-set types (with set identity)
//! - BLAKE3 content hashing
//! - Deterministic synthetic data generation

pub mod generate;
pub mod hash;
pub mod record;

// Re-export main types for convenience
pub use generate::{generate_records, GeneratorConfig, DEPARTMENTS};
pub use hash::{ContentHash, IncrementalHasher};
pub use record::{Record, RecordId, RecordSet, RecordSetId};
