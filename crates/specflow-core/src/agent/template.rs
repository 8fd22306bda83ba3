//! First-run instantiation of an agent context document.
//!
//! Fills the agent file template's placeholders from the project name,
//! the current date, and the extracted plan fields. Subsequent runs go
//! through the merge in [`super::document`] instead.

use crate::plan::PlanFields;

use super::document::ContextUpdate;

const PROJECT_NAME_PLACEHOLDER: &str = "[PROJECT NAME]";
const DATE_PLACEHOLDER: &str = "[DATE]";
const TECH_PLACEHOLDER: &str = "[EXTRACTED FROM ALL PLAN.MD FILES]";
const STRUCTURE_PLACEHOLDER: &str = "[ACTUAL STRUCTURE FROM PLANS]";
const COMMANDS_PLACEHOLDER: &str = "[ONLY COMMANDS FOR ACTIVE TECHNOLOGIES]";
const CODE_STYLE_PLACEHOLDER: &str = "[LANGUAGE-SPECIFIC, ONLY FOR LANGUAGES IN USE]";
const CHANGES_PLACEHOLDER: &str = "[LAST 3 FEATURES AND WHAT THEY ADDED]";

/// Renders the agent file template into a ready-to-write document.
pub fn render(template: &str, project_name: &str, fields: &PlanFields, update: &ContextUpdate) -> String {
    template
        .replace(PROJECT_NAME_PLACEHOLDER, project_name)
        .replace(DATE_PLACEHOLDER, &update.today)
        .replace(TECH_PLACEHOLDER, &update.tech_entries.join("\n"))
        .replace(STRUCTURE_PLACEHOLDER, structure_sketch(fields))
        .replace(COMMANDS_PLACEHOLDER, &command_hints(fields.language.as_deref()))
        .replace(CODE_STYLE_PLACEHOLDER, &code_style(fields.language.as_deref()))
        .replace(CHANGES_PLACEHOLDER, update.change_entry.as_deref().unwrap_or(""))
}

fn structure_sketch(fields: &PlanFields) -> &'static str {
    let web = fields
        .project_type
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains("web"));
    if web {
        "backend/\nfrontend/\ntests/"
    } else {
        "src/\ntests/"
    }
}

/// Small fixed lookup keyed on the recognized language name.
fn command_hints(language: Option<&str>) -> String {
    let lowered = language.unwrap_or("").to_lowercase();
    if lowered.contains("python") {
        "cd src && pytest && ruff check .".to_string()
    } else if lowered.contains("rust") {
        "cargo test && cargo clippy".to_string()
    } else if lowered.contains("javascript") || lowered.contains("typescript") {
        "npm test && npm run lint".to_string()
    } else {
        format!("# Add commands for {}", language.unwrap_or("your language"))
    }
}

fn code_style(language: Option<&str>) -> String {
    format!(
        "{}: Follow standard conventions",
        language.unwrap_or("Language")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateKind;

    fn fields() -> PlanFields {
        PlanFields {
            language: Some("Rust 1.79".to_string()),
            primary_dependencies: Some("clap, serde".to_string()),
            storage: None,
            project_type: None,
        }
    }

    fn rendered() -> String {
        let f = fields();
        let update = ContextUpdate::with_date("001-cli", &f, "2026-08-26");
        render(
            TemplateKind::AgentFile.embedded(),
            "demo-project",
            &f,
            &update,
        )
    }

    #[test]
    fn substitutes_all_placeholders() {
        let doc = rendered();
        assert!(doc.contains("# demo-project Development Guidelines"));
        assert!(doc.contains("Last updated: 2026-08-26"));
        assert!(doc.contains("- Rust 1.79 + clap, serde (001-cli)"));
        assert!(doc.contains("cargo test && cargo clippy"));
        assert!(doc.contains("Rust 1.79: Follow standard conventions"));
        assert!(doc.contains("- 001-cli: Added Rust 1.79 + clap, serde"));
        assert!(!doc.contains('['), "unsubstituted placeholder left: {doc}");
    }

    #[test]
    fn keeps_manual_markers() {
        let doc = rendered();
        assert!(doc.contains(super::super::document::MANUAL_START));
        assert!(doc.contains(super::super::document::MANUAL_END));
    }

    #[test]
    fn web_projects_sketch_backend_and_frontend() {
        let mut f = fields();
        f.project_type = Some("web".to_string());
        assert_eq!(structure_sketch(&f), "backend/\nfrontend/\ntests/");
        f.project_type = Some("cli".to_string());
        assert_eq!(structure_sketch(&f), "src/\ntests/");
    }

    #[test]
    fn command_hints_lookup() {
        assert_eq!(
            command_hints(Some("Python 3.12")),
            "cd src && pytest && ruff check ."
        );
        assert_eq!(command_hints(Some("TypeScript 5")), "npm test && npm run lint");
        assert_eq!(command_hints(Some("COBOL")), "# Add commands for COBOL");
        assert_eq!(command_hints(None), "# Add commands for your language");
    }

    #[test]
    fn rendered_template_merges_idempotently() {
        // A freshly created file must already be a fixed point of the
        // merge for the same update.
        let f = fields();
        let update = ContextUpdate::with_date("001-cli", &f, "2026-08-26");
        let doc = rendered();
        assert_eq!(super::super::document::merge(&doc, &update), doc);
    }
}
