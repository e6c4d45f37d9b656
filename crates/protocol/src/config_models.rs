//! Root document models for `gen.yaml`.
//!
//! This module defines the structure of the generation config file that
//! controls how SDKs are generated for a project.

use crate::language_models::LanguageConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Schema version written by this release.
pub const CONFIG_VERSION: &str = "2.0.0";

/// Canonical name of the config file.
pub const CONFIG_FILE_NAME: &str = "gen.yaml";

/// SDK class name used when none is configured.
pub const DEFAULT_SDK_CLASS_NAME: &str = "SDK";

/// The full generation config document.
///
/// # Example
///
/// ```yaml
/// # gen.yaml
/// configVersion: 2.0.0
/// management:
///   docChecksum: 2bba3b8f9d211b02569b3f9aff0d34b4
///   docVersion: 0.3.0
///   speakeasyVersion: 1.3.1
/// languages:
///   go:
///     version: 1.3.0
///     cfg:
///       packageName: github.com/acme/acme-sdk-go
/// generation:
///   comments:
///     disableComments: false
///     omitDescriptionIfSummaryPresent: true
///   sdkClassName: acme
///   singleTagPerOp: false
///   tagNamespacingDisabled: false
///   maintainOpenApiOrder: true
/// features:
///   go:
///     core: 2.90.0
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Schema version of this document.
    pub config_version: String,

    /// Provenance of the last generation run. Absent until the first run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<Management>,

    /// Settings per target language, keyed by language identifier.
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,

    /// Project-wide generation settings.
    #[serde(default)]
    pub generation: Generation,

    /// Feature versions reported by the last generation run, per language.
    #[serde(default)]
    pub features: BTreeMap<String, BTreeMap<String, String>>,

    /// Languages added by the load that produced this value.
    ///
    /// Never persisted: a language is only "new" for the load call that added it.
    #[serde(skip)]
    pub new: BTreeMap<String, bool>,
}

impl ConfigDocument {
    /// Creates the document used when a project has no config file yet.
    pub fn new(config_version: impl Into<String>) -> Self {
        Self {
            config_version: config_version.into(),
            management: None,
            languages: BTreeMap::new(),
            generation: Generation::fresh(),
            features: BTreeMap::new(),
            new: BTreeMap::new(),
        }
    }

    /// Returns true if `language` was added by the load that produced this document.
    pub fn is_new(&self, language: &str) -> bool {
        self.new.get(language).copied().unwrap_or(false)
    }
}

/// Provenance of the source document the SDKs were last generated from.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Management {
    /// Checksum of the source document.
    #[serde(default)]
    pub doc_checksum: String,

    /// Version declared by the source document.
    #[serde(default)]
    pub doc_version: String,

    /// Version of the generator that performed the run.
    #[serde(default)]
    pub speakeasy_version: String,
}

/// Project-wide generation settings.
///
/// [`Default`] yields the values an existing project had before each field
/// existed. New projects start from [`Generation::fresh`] instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Comments>,

    /// Name of the generated SDK's entry class.
    #[serde(default = "default_sdk_class_name")]
    pub sdk_class_name: String,

    #[serde(default)]
    pub single_tag_per_op: bool,

    #[serde(default)]
    pub tag_namespacing_disabled: bool,

    /// Emit operations and models in source document order rather than sorted.
    #[serde(default)]
    pub maintain_open_api_order: bool,

    /// Server URL baked into the SDK when the source document has none.
    #[serde(
        default,
        rename = "baseServerURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_server_url: Option<String>,
}

impl Generation {
    /// Settings for a project that is being configured for the first time.
    pub fn fresh() -> Self {
        Self {
            comments: Some(Comments::default()),
            sdk_class_name: DEFAULT_SDK_CLASS_NAME.to_string(),
            single_tag_per_op: false,
            tag_namespacing_disabled: false,
            maintain_open_api_order: true,
            base_server_url: None,
        }
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self {
            comments: None,
            sdk_class_name: DEFAULT_SDK_CLASS_NAME.to_string(),
            single_tag_per_op: false,
            tag_namespacing_disabled: false,
            maintain_open_api_order: false,
            base_server_url: None,
        }
    }
}

fn default_sdk_class_name() -> String {
    DEFAULT_SDK_CLASS_NAME.to_string()
}

/// Controls for doc comments in generated code.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Comments {
    #[serde(default)]
    pub disable_comments: bool,

    #[serde(default)]
    pub omit_description_if_summary_present: bool,
}
