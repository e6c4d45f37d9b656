//! # gc-protocol
//!
//! Schema types for the per-project generation config file (`gen.yaml`).
//!
//! This crate defines the data model that is persisted to disk and handed to
//! language generators:
//! - The root document with its version and provenance metadata
//! - Project-wide generation settings
//! - Per-language settings with an opaque payload
//!
//! ## Modules
//!
//! - [`config_models`]: Root document, generation settings and management block
//! - [`language_models`]: Per-language config and the "never generated" sentinel
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, serde_yaml and ts-rs
//! - TypeScript generation: All types derive `TS` for generator tooling
//! - No I/O: loading, migration and persistence live in `gc-core`

pub mod config_models;
pub mod language_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use language_models::*;
