//! Extraction of technology fields from a feature's plan document.
//!
//! The plan is authored by hand (or by an agent); we only ever read it.
//! Fields live on `**Label**: value` lines. A missing field is normal
//! and means "no update", which is different from an empty string.

use std::path::Path;

use crate::error::Result;

/// Placeholder token plan templates use for undecided fields.
pub const UNRESOLVED_MARKER: &str = "NEEDS CLARIFICATION";

const LANGUAGE_LABEL: &str = "Language/Version";
const DEPENDENCIES_LABEL: &str = "Primary Dependencies";
const STORAGE_LABEL: &str = "Storage";
const PROJECT_TYPE_LABEL: &str = "Project Type";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFields {
    pub language: Option<String>,
    pub primary_dependencies: Option<String>,
    pub storage: Option<String>,
    pub project_type: Option<String>,
}

impl PlanFields {
    /// Reads `path` once and extracts all known fields.
    pub fn extract(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_document(&content))
    }

    pub fn from_document(content: &str) -> Self {
        Self {
            language: field(content, LANGUAGE_LABEL),
            primary_dependencies: field(content, DEPENDENCIES_LABEL),
            storage: field(content, STORAGE_LABEL),
            project_type: field(content, PROJECT_TYPE_LABEL),
        }
    }

    /// Display string for the stack: `lang + deps`, or whichever of the
    /// two exists.
    pub fn tech_stack(&self) -> Option<String> {
        match (&self.language, &self.primary_dependencies) {
            (Some(lang), Some(deps)) => Some(format!("{lang} + {deps}")),
            (Some(lang), None) => Some(lang.clone()),
            (None, Some(deps)) => Some(deps.clone()),
            (None, None) => None,
        }
    }
}

/// Value of the first `**<label>**: <value>` line. Only the first
/// occurrence counts: an empty, `N/A`, or placeholder value leaves the
/// field absent rather than falling through to later lines.
fn field(content: &str, label: &str) -> Option<String> {
    let needle = format!("**{label}**:");
    for line in content.lines() {
        let Some(idx) = line.find(&needle) else {
            continue;
        };
        let value = line[idx + needle.len()..].trim();
        if value.is_empty() || value == "N/A" || value.contains(UNRESOLVED_MARKER) {
            return None;
        }
        return Some(value.to_string());
    }
    None
}
