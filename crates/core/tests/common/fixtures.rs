//! Test fixtures for creating sample projects and expected documents.

use gc_protocol::{Comments, ConfigDocument, Generation, LanguageConfig, Management, CONFIG_VERSION};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Read a fixture from `tests/fixtures/`.
pub fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()))
}

/// Create a temporary project with `gen.yaml` at `relative_dir`.
///
/// Empty `contents` creates the directory without a config file.
/// Returns the TempDir (keep it alive) and the absolute directory path.
pub fn create_project(relative_dir: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let dir = temp_dir.path().join(relative_dir);
    std::fs::create_dir_all(&dir).expect("Failed to create project dir");

    if !contents.is_empty() {
        std::fs::write(dir.join("gen.yaml"), contents).expect("Failed to write gen.yaml");
    }

    (temp_dir, dir)
}

fn management() -> Management {
    Management {
        doc_checksum: "2bba3b8f9d211b02569b3f9aff0d34b4".to_string(),
        doc_version: "0.3.0".to_string(),
        speakeasy_version: "1.3.1".to_string(),
    }
}

fn go_language() -> LanguageConfig {
    let mut cfg = BTreeMap::new();
    cfg.insert(
        "packageName".to_string(),
        serde_yaml::Value::from("github.com/speakeasy-api/speakeasy-client-sdk-go"),
    );
    LanguageConfig {
        version: "1.3.0".to_string(),
        cfg,
    }
}

fn legacy_generation() -> Generation {
    Generation {
        comments: Some(Comments {
            disable_comments: false,
            omit_description_if_summary_present: true,
        }),
        sdk_class_name: "speakeasy".to_string(),
        single_tag_per_op: false,
        tag_namespacing_disabled: false,
        maintain_open_api_order: false,
        base_server_url: Some("https://api.prod.speakeasyapi.dev".to_string()),
    }
}

/// Document expected from loading `pre-v100-gen.yaml` with only `go` requested.
pub fn expected_from_pre_v1() -> ConfigDocument {
    let mut doc = ConfigDocument::new(CONFIG_VERSION);
    doc.management = Some(management());
    doc.languages.insert("go".to_string(), go_language());
    doc.generation = legacy_generation();
    doc
}

/// Document expected from loading `current-gen.yaml` (or `v100-gen.yaml`) with only `go` requested.
pub fn expected_from_current() -> ConfigDocument {
    let mut doc = expected_from_pre_v1();
    let mut go_features = BTreeMap::new();
    go_features.insert("core".to_string(), "2.90.0".to_string());
    doc.features.insert("go".to_string(), go_features);
    doc
}
