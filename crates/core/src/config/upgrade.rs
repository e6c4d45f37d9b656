//! Language upgrade hooks.
//!
//! The migration engine restructures the document but knows nothing about
//! what each language keeps in its `cfg` payload. Generators plug in a
//! [`LanguageUpgrader`] to rewrite that payload for their current version.
//!
//! # Example
//!
//! ```ignore
//! use gc_core::config::{ConfigLoader, LanguageUpgrader};
//!
//! let config = ConfigLoader::new()
//!     .with_language("go")
//!     .with_upgrader(|lang: &str, from: &semver::Version, mut cfg: LanguageConfig| {
//!         if lang == "go" && from.major < 1 {
//!             cfg.cfg.remove("legacyFlag");
//!         }
//!         Ok::<_, gc_core::config::UpgradeError>(cfg)
//!     })
//!     .load("/path/to/project")?;
//! ```

use crate::config::error::UpgradeError;
use gc_protocol::LanguageConfig;
use semver::Version;

/// Rewrites a language's payload during a load.
pub trait LanguageUpgrader {
    /// Upgrades `config` for `language`.
    ///
    /// `from` is the version the document declared before migration.
    fn upgrade(
        &self,
        language: &str,
        from: &Version,
        config: LanguageConfig,
    ) -> Result<LanguageConfig, UpgradeError>;
}

impl<F> LanguageUpgrader for F
where
    F: Fn(&str, &Version, LanguageConfig) -> Result<LanguageConfig, UpgradeError>,
{
    fn upgrade(
        &self,
        language: &str,
        from: &Version,
        config: LanguageConfig,
    ) -> Result<LanguageConfig, UpgradeError> {
        self(language, from, config)
    }
}

/// Upgrader that returns every payload unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpUpgrader;

impl LanguageUpgrader for NoOpUpgrader {
    fn upgrade(
        &self,
        _language: &str,
        _from: &Version,
        config: LanguageConfig,
    ) -> Result<LanguageConfig, UpgradeError> {
        Ok(config)
    }
}
