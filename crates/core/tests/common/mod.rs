//! Common test utilities and helpers for loader integration tests.
//!
//! This module provides shared functionality across all integration tests including:
//! - Fixture files and temp project setup
//! - Expected documents for the shipped fixtures

pub mod fixtures;

pub use fixtures::*;
