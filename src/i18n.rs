//! String catalog for UI labels
//!
//! Keys look like `grid.item.install`. Values may contain `{{name}}`
//! placeholders filled from the arguments passed to [`Catalog::t`].

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Built-in English strings
const EN: &[(&str, &str)] = &[
    ("grid.item.open", "Open"),
    ("grid.item.launch", "Launch"),
    ("grid.item.running", "Running"),
    ("grid.item.installing", "Installing"),
    ("grid.item.uninstalling", "Uninstalling"),
    ("grid.item.downloading", "Downloading"),
    ("grid.item.finalize_installation", "Finalize installation"),
    ("grid.item.queued", "Queued"),
    ("grid.item.install", "Install"),
    ("grid.item.review", "Review"),
    ("grid.item.buy_now", "Buy now"),
    ("grid.item.report_problem", "Report problem"),
    (
        "grid.item.not_platform_compatible",
        "Not available for {{platform}}",
    ),
    ("sidebar.library", "Library"),
    ("sidebar.downloads", "Downloads"),
    ("status.downloads.paused", "Downloads paused"),
    ("status.downloads.empty", "No downloads in progress"),
];

/// Translations for the active locale
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    strings: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Catalog {
    /// Catalog holding only the built-in English strings
    pub fn english() -> Self {
        Self {
            locale: "en".to_string(),
            strings: EN
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Active locale code
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Layer strings from a flat TOML table (`"grid.item.install" = "..."`)
    /// on top of the current ones
    pub fn with_overrides(mut self, locale: &str, toml_src: &str) -> Result<Self> {
        let table: BTreeMap<String, String> =
            toml::from_str(toml_src).context("Failed to parse string catalog")?;
        self.locale = locale.to_string();
        self.strings.extend(table);
        Ok(self)
    }

    /// Load the catalog for a locale, layering an optional override file
    pub fn load(locale: &str, path: Option<&Path>) -> Result<Self> {
        let catalog = Self::english();
        let Some(path) = path else {
            if locale != "en" {
                tracing::warn!("No catalog for locale {:?}, falling back to English", locale);
            }
            return Ok(catalog);
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        tracing::info!("Loaded {} strings from {:?}", locale, path);
        catalog.with_overrides(locale, &content)
    }

    /// Translate a key. Unknown keys come back verbatim.
    pub fn t(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.strings.get(key) else {
            tracing::debug!("Missing string {:?}", key);
            return key.to_string();
        };

        let mut out = template.clone();
        for (name, value) in args {
            out = out.replace(&format!("{{{{{}}}}}", name), value);
        }
        out
    }
}
