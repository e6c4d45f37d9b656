//! Loading, migrating and persisting the generation config (`gen.yaml`).
//!
//! # Architecture
//!
//! ```text
//! ConfigLoader.load(start_dir)
//!     │
//!     ├── resolver    find gen.yaml in start_dir or an ancestor
//!     ├── persist     read + parse (missing/empty ⇒ no document)
//!     ├── migration   0.0.0 → 1.0.0 → 2.0.0, then LanguageUpgrader per language
//!     ├── merge       add requested languages, record them in `new`
//!     └── persist     write the document back
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use gc_core::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .with_languages(["go", "typescript"])
//!     .load("/path/to/project/sdks/go")?;
//!
//! if config.is_new("typescript") {
//!     println!("typescript will be generated for the first time");
//! }
//! ```

pub mod error;
pub mod loader;
pub mod merge;
pub mod migration;
pub mod persist;
pub mod resolver;
pub mod upgrade;

pub use error::{ConfigError, ConfigResult, MigrationError, UpgradeError};
pub use loader::{load_config, save_config, ConfigLoader};
pub use merge::merge_languages;
pub use migration::{declared_version, MigrationEngine, MigrationStep, PRE_V1_VERSION};
pub use resolver::{find_config_dir, resolve_config_dir};
pub use upgrade::{LanguageUpgrader, NoOpUpgrader};
