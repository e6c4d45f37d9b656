//! Config loader that ties resolution, migration, merging and persistence together.
//!
//! # Load Order
//!
//! 1. Resolve the config directory (nearest ancestor holding `gen.yaml`, else the start directory)
//! 2. Read and parse the file, if any
//! 3. Migrate to the target version and run the language upgrader
//! 4. Add requested languages that are missing
//! 5. Write the result back to the resolved path
//!
//! Every successful load writes the file, even when nothing changed.

use crate::config::error::ConfigResult;
use crate::config::merge::merge_languages;
use crate::config::migration::MigrationEngine;
use crate::config::persist::{read_document, write_document};
use crate::config::resolver::resolve_config_dir;
use crate::config::upgrade::{LanguageUpgrader, NoOpUpgrader};
use gc_protocol::{ConfigDocument, CONFIG_FILE_NAME};
use semver::Version;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```rust,no_run
/// use gc_core::config::ConfigLoader;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ConfigLoader::new()
///     .with_languages(["go", "typescript"])
///     .load("/path/to/project")?;
///
/// for (language, settings) in &config.languages {
///     println!("{language} {} (new: {})", settings.version, config.is_new(language));
/// }
/// # Ok(())
/// # }
/// ```
pub struct ConfigLoader {
    /// Languages that must be present after loading.
    languages: Vec<String>,

    /// Hook that rewrites each language's payload during migration.
    upgrader: Box<dyn LanguageUpgrader>,

    engine: MigrationEngine,

    /// Name of the config file searched for and written.
    file_name: String,
}

impl ConfigLoader {
    /// Creates a loader targeting the current schema version with no languages requested.
    #[must_use]
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
            upgrader: Box::new(NoOpUpgrader),
            engine: MigrationEngine::default(),
            file_name: CONFIG_FILE_NAME.to_string(),
        }
    }

    /// Requests a language. It is added with an ungenerated entry if missing.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    /// Requests several languages.
    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages.extend(languages.into_iter().map(Into::into));
        self
    }

    /// Sets the hook that upgrades each language's payload.
    #[must_use]
    pub fn with_upgrader(mut self, upgrader: impl LanguageUpgrader + 'static) -> Self {
        self.upgrader = Box::new(upgrader);
        self
    }

    /// Pins the schema version documents are migrated to.
    ///
    /// Useful for testing against a fixed version.
    #[must_use]
    pub fn with_target_version(mut self, version: Version) -> Self {
        self.engine = MigrationEngine::new(version);
        self
    }

    /// Replaces the migration engine, including its step chain.
    #[must_use]
    pub fn with_engine(mut self, engine: MigrationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Overrides the config file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Returns the path of the config file a load from `start` would read and write.
    ///
    /// Nothing is read or written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`](crate::config::ConfigError::Io) if `start`
    /// is relative and the working directory cannot be determined.
    pub fn locate(&self, start: impl AsRef<Path>) -> ConfigResult<PathBuf> {
        let start = absolute(start.as_ref())?;
        Ok(resolve_config_dir(&start, &self.file_name).join(&self.file_name))
    }

    /// Loads, migrates and merges the config for `start`, then writes it back.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::config::ConfigError) if:
    /// - The file exists but cannot be read, or the result cannot be written
    /// - The file is not valid YAML or does not match the schema
    /// - `configVersion` is malformed or newer than the target version
    /// - A migration step or the language upgrader fails
    ///
    /// Nothing is written when an error is returned.
    pub fn load(&self, start: impl AsRef<Path>) -> ConfigResult<ConfigDocument> {
        let path = self.locate(start)?;
        debug!(path = %path.display(), "Loading config");

        let raw = read_document(&path)?;
        if raw.is_none() {
            info!(path = %path.display(), "No config found, creating default");
        }

        let mut document = self.engine.migrate(raw, self.upgrader.as_ref())?;
        merge_languages(&mut document, &self.languages);

        write_document(&path, &document)?;
        Ok(document)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("languages", &self.languages)
            .field("engine", &self.engine)
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

/// Loads the config for `start` with the given languages and default settings.
///
/// # Example
///
/// ```rust,no_run
/// use gc_core::config::load_config;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(".", ["go"])?;
/// println!("config version {}", config.config_version);
/// # Ok(())
/// # }
/// ```
pub fn load_config<I, S>(start: impl AsRef<Path>, languages: I) -> ConfigResult<ConfigDocument>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ConfigLoader::new().with_languages(languages).load(start)
}

/// Writes `document` to the canonical config file in `dir`.
///
/// Use this after a generation run updates `management` or `features`.
pub fn save_config(dir: impl AsRef<Path>, document: &ConfigDocument) -> ConfigResult<()> {
    write_document(&dir.as_ref().join(CONFIG_FILE_NAME), document)
}

fn absolute(start: &Path) -> ConfigResult<PathBuf> {
    if start.is_absolute() {
        Ok(start.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(start))
    }
}
