//! The customization blob stored on each portfolio.
//!
//! Stored as JSONB, but always read and written through this schema. Unknown
//! top-level keys are rejected so the shape cannot drift silently. `layout` and
//! `animations` are owned by the editor widgets and pass through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::FieldErrors;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Customization {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPalette>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontSettings>,
    #[serde(default)]
    pub scripts: Vec<ScriptBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<Value>,
}

/// Hex color strings. Malformed values are stored as given; scoring reads them as black.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColorPalette {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FontSettings {
    pub heading: Option<String>,
    pub body: Option<String>,
}

/// A custom `<script>` block injected into the published page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScriptBlock {
    #[serde(default)]
    pub name: Option<String>,
    pub source: String,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            colors: None,
            fonts: None,
            scripts: Vec::new(),
            layout: None,
            animations: None,
        }
    }
}

impl Customization {
    /// Primary and background colors, when both are set and non-blank.
    pub fn contrast_pair(&self) -> Option<(&str, &str)> {
        let colors = self.colors.as_ref()?;
        let primary = colors.primary.as_deref().filter(|c| !c.trim().is_empty())?;
        let background = colors
            .background
            .as_deref()
            .filter(|c| !c.trim().is_empty())?;
        Some((primary, background))
    }

    pub fn validate(&self, errors: &mut FieldErrors) {
        if self.schema_version != CURRENT_SCHEMA_VERSION {
            errors.push(
                "customization.schemaVersion",
                format!("unsupported schema version {}", self.schema_version),
            );
        }
        for (i, script) in self.scripts.iter().enumerate() {
            if script.source.trim().is_empty() {
                errors.push(
                    &format!("customization.scripts[{i}].source"),
                    "must not be empty",
                );
            }
        }
    }
}
