//! # gc-core
//!
//! Loader and schema migrator for the per-project generation config.
//!
//! This crate provides:
//! - Upward search for `gen.yaml` from a working directory
//! - Migration of older config schemas to the current version
//! - Pluggable upgrade hooks for per-language payloads
//! - Merging of newly requested languages and writing the result back
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading, migration and persistence
//!
//! Schema types live in `gc-protocol` and are re-exported here.

pub mod config;

pub use gc_protocol as protocol;
