//! Per-language configuration models for the `languages` block of `gen.yaml`.
//!
//! The payload of each language is opaque to this crate. Only the language
//! generators (and the upgrade hooks they supply) know what keys it holds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Version recorded for a language that has never been generated.
///
/// Real generator versions start above this value, so a language carrying it
/// is known to be freshly requested.
pub const UNGENERATED_LANGUAGE_VERSION: &str = "0.0.1";

/// Settings for a single target language.
///
/// # Example
///
/// ```yaml
/// languages:
///   go:
///     version: 1.3.0
///     cfg:
///       packageName: github.com/acme/acme-sdk-go
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct LanguageConfig {
    /// Version of the generated SDK for this language.
    pub version: String,

    /// Language-specific settings, interpreted only by that language's generator.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[ts(type = "Record<string, unknown>")]
    pub cfg: BTreeMap<String, serde_yaml::Value>,
}

impl LanguageConfig {
    /// Creates an entry for a language that has been requested but not yet generated.
    pub fn ungenerated() -> Self {
        Self {
            version: UNGENERATED_LANGUAGE_VERSION.to_string(),
            cfg: BTreeMap::new(),
        }
    }

    /// Returns true if this language has never been generated.
    pub fn is_ungenerated(&self) -> bool {
        self.version == UNGENERATED_LANGUAGE_VERSION
    }
}
