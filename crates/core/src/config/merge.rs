//! Adds requested languages that the document does not have yet.

use gc_protocol::{ConfigDocument, LanguageConfig};
use tracing::info;

/// Inserts an ungenerated entry for every requested language missing from `document`.
///
/// Each inserted language is recorded in `document.new`. Languages already
/// present are left untouched and never marked new.
pub fn merge_languages<I, S>(document: &mut ConfigDocument, requested: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for language in requested {
        let language = language.as_ref();
        if document.languages.contains_key(language) {
            continue;
        }

        info!(language, "Adding language to config");
        document
            .languages
            .insert(language.to_string(), LanguageConfig::ungenerated());
        document.new.insert(language.to_string(), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_protocol::CONFIG_VERSION;
    use std::collections::BTreeSet;

    fn document_with(languages: &[&str]) -> ConfigDocument {
        let mut doc = ConfigDocument::new(CONFIG_VERSION);
        for lang in languages {
            let mut config = LanguageConfig::ungenerated();
            config.version = "1.3.0".to_string();
            doc.languages.insert(lang.to_string(), config);
        }
        doc
    }

    #[test]
    fn new_map_is_requested_minus_existing() {
        let cases: &[(&[&str], &[&str])] = &[
            (&[], &[]),
            (&["go"], &[]),
            (&[], &["go"]),
            (&["go", "typescript"], &["go"]),
            (&["go", "python", "java"], &["python", "terraform"]),
        ];

        for (requested, existing) in cases {
            let mut doc = document_with(existing);
            merge_languages(&mut doc, requested.iter());

            let expected: BTreeSet<&str> = requested
                .iter()
                .filter(|lang| !existing.contains(*lang))
                .copied()
                .collect();
            let actual: BTreeSet<&str> = doc.new.keys().map(String::as_str).collect();

            assert_eq!(actual, expected, "requested={requested:?} existing={existing:?}");
            assert!(doc.new.values().all(|v| *v));
            for lang in requested.iter().chain(existing.iter()) {
                assert!(doc.languages.contains_key(*lang));
            }
        }
    }

    #[test]
    fn existing_languages_are_untouched() {
        let mut doc = document_with(&["go"]);
        let before = doc.languages["go"].clone();

        merge_languages(&mut doc, ["go", "typescript"]);

        assert_eq!(doc.languages["go"], before);
        assert!(doc.languages["typescript"].is_ungenerated());
        assert!(!doc.is_new("go"));
    }

    #[test]
    fn request_order_does_not_matter() {
        let mut forward = document_with(&["go"]);
        let mut backward = document_with(&["go"]);

        merge_languages(&mut forward, ["python", "typescript", "go"]);
        merge_languages(&mut backward, ["go", "typescript", "python"]);

        assert_eq!(forward, backward);
    }

    #[test]
    fn duplicate_requests_add_once() {
        let mut doc = document_with(&[]);
        merge_languages(&mut doc, vec!["go".to_string(), "go".to_string()]);

        assert_eq!(doc.languages.len(), 1);
        assert_eq!(doc.new.len(), 1);
    }
}
