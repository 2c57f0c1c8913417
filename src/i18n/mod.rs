//! Localized labels

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Key of the label used for posts without a category
pub const UNCATEGORIZED: &str = "uncategorized";

/// Language used when a label is missing for the configured one
const FALLBACK_LANGUAGE: &str = "en";

/// Built-in labels: (language, key, text)
const BUILTIN: &[(&str, &str, &str)] = &[
    ("en", UNCATEGORIZED, "Uncategorized"),
    ("ja", UNCATEGORIZED, "未分類"),
    ("zh_CN", UNCATEGORIZED, "未分类"),
    ("zh_TW", UNCATEGORIZED, "未分類"),
    ("ko", UNCATEGORIZED, "미분류"),
    ("es", UNCATEGORIZED, "Sin categoría"),
];

/// Labels for the configured site language
pub struct I18n {
    language: String,
    /// lang -> key -> label
    labels: HashMap<String, HashMap<String, String>>,
}

impl I18n {
    /// Create a handler preloaded with the built-in labels
    pub fn with_defaults(language: &str) -> Self {
        let mut labels: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (lang, key, text) in BUILTIN {
            labels
                .entry(lang.to_string())
                .or_default()
                .insert(key.to_string(), text.to_string());
        }
        Self {
            language: language.to_string(),
            labels,
        }
    }

    /// Load `<lang>.yml`, `<lang>.yaml` or `<lang>.json` label files
    ///
    /// Labels found in files override the built-in ones. Files that do not
    /// parse as a flat key/label map are skipped with a warning.
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if !path.is_file() || !matches!(ext, Some("yml" | "yaml" | "json")) {
                continue;
            }
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            let parsed: Result<HashMap<String, String>, String> = if ext == Some("json") {
                serde_json::from_str(&content).map_err(|e| e.to_string())
            } else {
                serde_yaml::from_str(&content).map_err(|e| e.to_string())
            };

            match parsed {
                Ok(labels) => {
                    tracing::debug!("Loaded {} labels from {:?}", labels.len(), path);
                    self.labels.entry(lang.to_string()).or_default().extend(labels);
                }
                Err(e) => tracing::warn!("Failed to parse language file {:?}: {}", path, e),
            }
        }

        Ok(())
    }

    /// Label for posts without a category
    pub fn uncategorized(&self) -> String {
        self.label(UNCATEGORIZED)
    }

    fn label(&self, key: &str) -> String {
        [self.language.as_str(), FALLBACK_LANGUAGE]
            .iter()
            .find_map(|lang| self.labels.get(*lang)?.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::with_defaults(FALLBACK_LANGUAGE)
    }
}
