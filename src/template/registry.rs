//! Named templates read from a JSON file
//!
//! ```json
//! {
//!   "react-ts": { "url": "https://github.com/acme/react-ts.git", "branch": "main" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::template::error::TemplateError;

/// One entry of the template registry
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TemplateEntry {
    pub url: String,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Template name to source mapping, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateEntry>,
}

impl TemplateRegistry {
    /// Templates available without a `templates.json`
    pub fn builtin() -> Self {
        let entries = [
            (
                "react-ts",
                "https://github.com/scaffold-templates/react-ts.git",
                "React + TypeScript + Vite",
            ),
            (
                "vue-ts",
                "https://github.com/scaffold-templates/vue-ts.git",
                "Vue 3 + TypeScript + Vite",
            ),
            (
                "node-api",
                "https://github.com/scaffold-templates/node-api.git",
                "Node.js REST API with Express",
            ),
            (
                "vue-admin",
                "https://gitee.com/scaffold-templates/vue-admin.git",
                "Vue 3 admin dashboard",
            ),
        ];

        Self {
            templates: entries
                .into_iter()
                .map(|(name, url, description)| {
                    (
                        name.to_string(),
                        TemplateEntry {
                            url: url.to_string(),
                            branch: None,
                            description: Some(description.to_string()),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Parses a registry from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            templates: serde_json::from_str(json)?,
        })
    }

    /// Loads a registry from a `templates.json` file
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        debug!("Loading templates from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, name: &str) -> Option<&TemplateEntry> {
        self.templates.get(name)
    }

    /// All templates sorted by name
    pub fn list(&self) -> impl Iterator<Item = (&str, &TemplateEntry)> {
        self.templates
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
