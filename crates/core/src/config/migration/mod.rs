//! Schema migration from any supported `configVersion` to the current one.
//!
//! # Pipeline
//!
//! ```text
//! raw YAML value ──► declared version ──► step 0.0.0→1.0.0 ──► step 1.0.0→2.0.0 ──► typed ConfigDocument
//!                          │                                                              │
//!                   (absent ⇒ 0.0.0)                                        LanguageUpgrader per language
//! ```
//!
//! Steps operate on the untyped [`serde_yaml::Mapping`] because older schemas
//! do not fit the current types. The document is only deserialized into
//! [`ConfigDocument`] once it has reached the target version.

mod steps;

pub use steps::{default_steps, pre_v1_to_v1, v1_to_v2};

use crate::config::error::{ConfigError, ConfigResult, MigrationError};
use crate::config::upgrade::LanguageUpgrader;
use gc_protocol::{ConfigDocument, CONFIG_VERSION};
use semver::Version;
use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

/// Version assumed for documents written before `configVersion` existed.
pub const PRE_V1_VERSION: Version = Version::new(0, 0, 0);

const VERSION_KEY: &str = "configVersion";

/// Signature of a single migration step.
pub type StepFn = fn(Mapping) -> Result<Mapping, MigrationError>;

/// One edge of the migration chain.
#[derive(Debug, Clone)]
pub struct MigrationStep {
    /// Lowest version this step accepts.
    pub from: Version,
    /// Version the document has after this step.
    pub to: Version,
    pub apply: StepFn,
}

impl MigrationStep {
    pub fn new(from: Version, to: Version, apply: StepFn) -> Self {
        Self { from, to, apply }
    }

    fn accepts(&self, version: &Version, target: &Version) -> bool {
        self.from <= *version && *version < self.to && self.to <= *target
    }
}

/// Upgrades raw documents to a fixed target version.
///
/// # Example
///
/// ```ignore
/// use gc_core::config::{MigrationEngine, NoOpUpgrader};
///
/// let engine = MigrationEngine::new(semver::Version::new(2, 0, 0));
/// let raw: serde_yaml::Value = serde_yaml::from_str(&contents)?;
/// let document = engine.migrate(Some(raw), &NoOpUpgrader)?;
/// assert_eq!(document.config_version, "2.0.0");
/// ```
#[derive(Debug, Clone)]
pub struct MigrationEngine {
    target: Version,
    steps: Vec<MigrationStep>,
}

impl MigrationEngine {
    /// Creates an engine that migrates to `target` using the shipped chain.
    pub fn new(target: Version) -> Self {
        Self {
            target,
            steps: default_steps(),
        }
    }

    /// Replaces the migration chain.
    #[must_use]
    pub fn with_steps(mut self, mut steps: Vec<MigrationStep>) -> Self {
        steps.sort_by(|a, b| a.from.cmp(&b.from));
        self.steps = steps;
        self
    }

    /// Version every migrated document ends at.
    pub fn target(&self) -> &Version {
        &self.target
    }

    /// Builds the document for a project with no config file.
    pub fn default_document(&self) -> ConfigDocument {
        ConfigDocument::new(self.target.to_string())
    }

    /// Migrates `raw` to the target version and runs `upgrader` over every language.
    ///
    /// `None` means no document exists and yields [`Self::default_document`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MalformedVersion`] if `configVersion` is not a semantic version
    /// - [`ConfigError::UnsupportedVersion`] if it is newer than the target
    /// - [`ConfigError::Migration`] if a step finds an unusable structure
    /// - [`ConfigError::MalformedDocument`] if the result does not match the schema
    /// - [`ConfigError::LanguageUpgrade`] if the upgrader fails
    pub fn migrate(
        &self,
        raw: Option<Value>,
        upgrader: &dyn LanguageUpgrader,
    ) -> ConfigResult<ConfigDocument> {
        let mapping = match raw {
            None | Some(Value::Null) => return Ok(self.default_document()),
            Some(Value::Mapping(mapping)) => mapping,
            Some(_) => {
                return Err(ConfigError::malformed_document(
                    "top level of the config must be a mapping",
                ))
            }
        };

        let declared = declared_version(&mapping)?;
        let migrated = self.migrate_mapping(mapping, &declared)?;

        let mut document: ConfigDocument = serde_yaml::from_value(Value::Mapping(migrated))
            .map_err(|e| ConfigError::malformed_document(e.to_string()))?;

        let languages = std::mem::take(&mut document.languages);
        for (language, config) in languages {
            let upgraded = upgrader
                .upgrade(&language, &declared, config)
                .map_err(|source| ConfigError::LanguageUpgrade {
                    language: language.clone(),
                    from: declared.clone(),
                    source,
                })?;
            document.languages.insert(language, upgraded);
        }

        document.config_version = self.target.to_string();
        Ok(document)
    }

    /// Applies the structural steps between `declared` and the target.
    ///
    /// The returned mapping carries `configVersion` equal to the target.
    pub fn migrate_mapping(&self, mut mapping: Mapping, declared: &Version) -> ConfigResult<Mapping> {
        if *declared > self.target {
            return Err(ConfigError::UnsupportedVersion {
                found: declared.clone(),
                supported: self.target.clone(),
            });
        }

        let mut version = declared.clone();
        while version < self.target {
            let Some(step) = self
                .steps
                .iter()
                .find(|step| step.accepts(&version, &self.target))
            else {
                break;
            };

            debug!(from = %step.from, to = %step.to, "Applying config migration step");
            mapping = (step.apply)(mapping).map_err(|source| ConfigError::Migration {
                from: step.from.clone(),
                to: step.to.clone(),
                source,
            })?;
            version = step.to.clone();
            mapping.insert(VERSION_KEY.into(), version.to_string().into());
        }

        if *declared != self.target {
            info!(from = %declared, to = %self.target, "Migrated config");
        }
        mapping.insert(VERSION_KEY.into(), self.target.to_string().into());
        Ok(mapping)
    }
}

impl Default for MigrationEngine {
    fn default() -> Self {
        let target = Version::parse(CONFIG_VERSION).unwrap_or(Version::new(2, 0, 0));
        Self::new(target)
    }
}

/// Reads the version a raw document declares.
///
/// Documents without `configVersion` predate the field and are [`PRE_V1_VERSION`].
pub fn declared_version(mapping: &Mapping) -> ConfigResult<Version> {
    match mapping.get(VERSION_KEY) {
        None | Some(Value::Null) => Ok(PRE_V1_VERSION),
        Some(Value::String(version)) => parse_version(version),
        Some(Value::Number(version)) => parse_version(&version.to_string()),
        Some(other) => Err(ConfigError::malformed_version(
            format!("{other:?}"),
            "expected a version string",
        )),
    }
}

fn parse_version(version: &str) -> ConfigResult<Version> {
    Version::parse(version.trim())
        .map_err(|e| ConfigError::malformed_version(version, e.to_string()))
}
