//! Reading and writing the config file.

use crate::config::error::{ConfigError, ConfigResult};
use gc_protocol::ConfigDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads and parses the config file at `path`.
///
/// Returns `Ok(None)` when the file does not exist or holds no document
/// (empty, whitespace, comments only or an explicit `null`).
///
/// # Errors
///
/// - [`ConfigError::Io`] if the file exists but cannot be read
/// - [`ConfigError::MalformedDocument`] if the contents are not valid YAML
pub fn read_document(path: &Path) -> ConfigResult<Option<serde_yaml::Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if !has_content(&content) {
        debug!(path = %path.display(), "Config file is empty");
        return Ok(None);
    }

    let value: serde_yaml::Value = serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::malformed_document(format!("{}: {e}", path.display())))?;

    Ok(match value {
        serde_yaml::Value::Null => None,
        value => Some(value),
    })
}

/// Returns true if `content` holds anything besides blank lines and comments.
fn has_content(content: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}

/// Serializes `document` to `path`, creating parent directories as needed.
///
/// Any existing file is overwritten. The transient `new` map is not written.
///
/// # Errors
///
/// - [`ConfigError::Serialize`] if the document cannot be encoded
/// - [`ConfigError::Io`] if a directory or the file cannot be written
pub fn write_document(path: &Path, document: &ConfigDocument) -> ConfigResult<()> {
    let content = serde_yaml::to_string(document).map_err(ConfigError::Serialize)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    debug!(path = %path.display(), "Wrote config file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_protocol::{LanguageConfig, CONFIG_VERSION};
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempdir().expect("Failed to create temp dir");
        let result = read_document(&dir.path().join("gen.yaml")).expect("read should succeed");
        assert!(result.is_none());
    }

    #[test]
    fn blank_and_comment_only_files_read_as_none() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("gen.yaml");

        for content in ["", "  \n\n", "# nothing here\n", "~\n"] {
            fs::write(&path, content).expect("Failed to write config");
            assert!(
                read_document(&path).expect("read should succeed").is_none(),
                "content {content:?} should read as no document"
            );
        }
    }

    #[test]
    fn invalid_yaml_is_malformed() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("gen.yaml");
        fs::write(&path, "configVersion: 2.0.0\n  invalid: [yaml").expect("Failed to write config");

        let err = read_document(&path).unwrap_err();
        match err {
            ConfigError::MalformedDocument { reason } => assert!(reason.contains("gen.yaml")),
            other => panic!("Expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn directory_at_config_path_is_an_io_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("gen.yaml");
        fs::create_dir(&path).expect("Failed to create decoy dir");

        assert!(matches!(read_document(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn write_creates_missing_directories_and_overwrites() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("a/b/gen.yaml");

        let mut document = ConfigDocument::new(CONFIG_VERSION);
        write_document(&path, &document).expect("first write should succeed");
        assert!(path.is_file());

        document
            .languages
            .insert("go".to_string(), LanguageConfig::ungenerated());
        document.new.insert("go".to_string(), true);
        write_document(&path, &document).expect("second write should succeed");

        let written = fs::read_to_string(&path).expect("Failed to read config");
        assert!(written.contains("go:"));
        assert!(!written.contains("new"));
    }

    #[test]
    fn written_document_reads_back() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("gen.yaml");
        let document = ConfigDocument::new(CONFIG_VERSION);

        write_document(&path, &document).expect("write should succeed");
        let raw = read_document(&path)
            .expect("read should succeed")
            .expect("document should exist");
        let reloaded: ConfigDocument = serde_yaml::from_value(raw).expect("Failed to deserialize");

        assert_eq!(reloaded, document);
    }
}
