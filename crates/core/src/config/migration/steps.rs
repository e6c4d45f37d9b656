//! Version-to-version schema transformations.
//!
//! Each step takes the raw document shaped for its `from` version and returns
//! it shaped for its `to` version. Steps never touch `configVersion`; the
//! engine relabels the document after each step.

use super::MigrationStep;
use crate::config::error::MigrationError;
use gc_protocol::{DEFAULT_SDK_CLASS_NAME, UNGENERATED_LANGUAGE_VERSION};
use semver::Version;
use serde_yaml::{Mapping, Value};

/// Top-level keys that never name a language.
const RESERVED_KEYS: &[&str] = &[
    "configVersion",
    "management",
    "generation",
    "features",
    "languages",
];

/// The shipped migration chain, ordered by `from`.
pub fn default_steps() -> Vec<MigrationStep> {
    vec![
        MigrationStep::new(Version::new(0, 0, 0), Version::new(1, 0, 0), pre_v1_to_v1),
        MigrationStep::new(Version::new(1, 0, 0), Version::new(2, 0, 0), v1_to_v2),
    ]
}

/// Replaces the flat `generate` block with the structured `generation` block.
///
/// `sdkFlattening`, `telemetryEnabled` and any other unrecognised `generate`
/// keys are dropped here. Languages stay as top-level blocks.
pub fn pre_v1_to_v1(mut doc: Mapping) -> Result<Mapping, MigrationError> {
    let generate = take_mapping(&mut doc, "generate")?;

    let mut comments = Mapping::new();
    comments.insert(
        "disableComments".into(),
        bool_field(&generate, "generate", "disableComments")?
            .unwrap_or(false)
            .into(),
    );
    comments.insert(
        "omitDescriptionIfSummaryPresent".into(),
        bool_field(&generate, "generate", "omitDescriptionIfSummaryPresent")?
            .unwrap_or(false)
            .into(),
    );

    let mut generation = Mapping::new();
    generation.insert("comments".into(), Value::Mapping(comments));
    generation.insert(
        "sdkClassName".into(),
        string_field(&generate, "generate", "sdkClassName")?
            .unwrap_or_else(|| DEFAULT_SDK_CLASS_NAME.to_string())
            .into(),
    );
    generation.insert(
        "singleTagPerOp".into(),
        bool_field(&generate, "generate", "singleTagPerOp")?
            .unwrap_or(false)
            .into(),
    );
    generation.insert(
        "tagNamespacingDisabled".into(),
        bool_field(&generate, "generate", "tagNamespacingDisabled")?
            .unwrap_or(false)
            .into(),
    );
    if let Some(url) = string_field(&generate, "generate", "baseServerUrl")? {
        generation.insert("baseServerURL".into(), url.into());
    }

    doc.insert("generation".into(), Value::Mapping(generation));
    Ok(doc)
}

/// Nests top-level language blocks under `languages` and fills in the
/// fields introduced by 2.0.0.
///
/// Existing projects keep `maintainOpenApiOrder: false`, the ordering they
/// were generated with before the setting existed.
pub fn v1_to_v2(mut doc: Mapping) -> Result<Mapping, MigrationError> {
    let mut languages = take_mapping(&mut doc, "languages")?;

    let language_keys: Vec<Value> = doc
        .keys()
        .filter(|key| !matches!(key.as_str(), Some(k) if RESERVED_KEYS.contains(&k)))
        .cloned()
        .collect();

    for key in language_keys {
        let name = match key.as_str() {
            Some(name) => name.to_string(),
            None => {
                return Err(MigrationError::malformed(
                    format!("{key:?}"),
                    "language name must be a string",
                ))
            }
        };

        let mut block = match doc.remove(&key) {
            None | Some(Value::Null) => Mapping::new(),
            Some(Value::Mapping(block)) => block,
            Some(_) => return Err(MigrationError::malformed(name, "expected a mapping")),
        };

        let version = match block.remove("version") {
            None | Some(Value::Null) => UNGENERATED_LANGUAGE_VERSION.to_string(),
            Some(Value::String(version)) => version,
            Some(Value::Number(version)) => version.to_string(),
            Some(_) => {
                return Err(MigrationError::malformed(
                    format!("{name}.version"),
                    "expected a version string",
                ))
            }
        };

        let mut language = Mapping::new();
        language.insert("version".into(), version.into());
        if !block.is_empty() {
            language.insert("cfg".into(), Value::Mapping(block));
        }
        languages.insert(name.into(), Value::Mapping(language));
    }
    doc.insert("languages".into(), Value::Mapping(languages));

    let mut generation = take_mapping(&mut doc, "generation")?;
    for field in ["maintainOpenApiOrder", "tagNamespacingDisabled"] {
        if !generation.contains_key(field) {
            generation.insert(field.into(), false.into());
        }
    }
    doc.insert("generation".into(), Value::Mapping(generation));

    let features = take_mapping(&mut doc, "features")?;
    doc.insert("features".into(), Value::Mapping(features));

    Ok(doc)
}

/// Removes `key` from `doc`, treating a missing or null value as empty.
fn take_mapping(doc: &mut Mapping, key: &str) -> Result<Mapping, MigrationError> {
    match doc.remove(key) {
        None | Some(Value::Null) => Ok(Mapping::new()),
        Some(Value::Mapping(mapping)) => Ok(mapping),
        Some(_) => Err(MigrationError::malformed(key, "expected a mapping")),
    }
}

fn bool_field(map: &Mapping, parent: &str, key: &str) -> Result<Option<bool>, MigrationError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(_) => Err(MigrationError::malformed(
            format!("{parent}.{key}"),
            "expected a boolean",
        )),
    }
}

fn string_field(map: &Mapping, parent: &str, key: &str) -> Result<Option<String>, MigrationError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(_) => Err(MigrationError::malformed(
            format!("{parent}.{key}"),
            "expected a string",
        )),
    }
}
