//! Structured merge of plan data into an agent context document.
//!
//! The document is parsed into lines and walked with an explicit state
//! machine instead of positional string patches, so the merge result
//! does not depend on incidental formatting. Everything between the
//! manual-additions markers is opaque: it is copied through
//! byte-for-byte and section recognition is suspended inside it.

use std::sync::OnceLock;

use regex::Regex;

use crate::plan::PlanFields;

pub const MANUAL_START: &str = "<!-- MANUAL ADDITIONS START -->";
pub const MANUAL_END: &str = "<!-- MANUAL ADDITIONS END -->";
pub const ACTIVE_TECH_HEADING: &str = "## Active Technologies";
pub const RECENT_CHANGES_HEADING: &str = "## Recent Changes";

/// Recent-changes entries surviving a merge, newest first.
pub const RECENT_CHANGES_CAP: usize = 3;

fn date_stamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Last updated: \d{4}-\d{2}-\d{2}").unwrap())
}

// ---------------------------------------------------------------------------
// ContextUpdate
// ---------------------------------------------------------------------------

/// Everything one sync pass wants to push into a document, derived once
/// from the feature id and the extracted plan fields.
#[derive(Debug, Clone)]
pub struct ContextUpdate {
    /// Full `- <stack> (<feature-id>)` lines, inserted unless already
    /// present verbatim.
    pub tech_entries: Vec<String>,
    /// Full `- <feature-id>: Added <stack>` line, or `None` when the
    /// plan carries no stack to report.
    pub change_entry: Option<String>,
    /// `YYYY-MM-DD` stamp written into `Last updated:` lines.
    pub today: String,
}

impl ContextUpdate {
    pub fn new(feature_id: &str, fields: &PlanFields) -> Self {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        Self::with_date(feature_id, fields, &today)
    }

    pub fn with_date(feature_id: &str, fields: &PlanFields, today: &str) -> Self {
        let mut tech_entries = Vec::new();
        if let Some(stack) = fields.tech_stack() {
            tech_entries.push(format!("- {stack} ({feature_id})"));
        }
        if let Some(storage) = &fields.storage {
            tech_entries.push(format!("- {storage} ({feature_id})"));
        }
        let change_entry = fields
            .tech_stack()
            .map(|stack| format!("- {feature_id}: Added {stack}"));

        Self {
            tech_entries,
            change_entry,
            today: today.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    ActiveTech,
    RecentChanges,
}

/// Merges `update` into `content` and returns the new document text.
///
/// Idempotent: merging twice with the same update yields byte-identical
/// output. A missing section heading is appended at end-of-file, so
/// after one pass both recognized headings always exist.
pub fn merge(content: &str, update: &ContextUpdate) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut section = Section::Outside;
    let mut in_manual = false;
    let mut saw_tech_heading = false;
    let mut saw_changes_heading = false;
    // Entries already in the active-technologies section, for dedup.
    let mut tech_seen: Vec<String> = Vec::new();
    // Recent-changes entries are buffered and re-emitted merged.
    let mut existing_changes: Vec<String> = Vec::new();

    for line in content.lines() {
        if in_manual {
            out.push(line.to_string());
            if line.trim() == MANUAL_END {
                in_manual = false;
            }
            continue;
        }

        let trimmed = line.trim();

        if trimmed == MANUAL_START {
            close_section(&mut section, &mut out, update, &mut tech_seen, &mut existing_changes);
            in_manual = true;
            out.push(line.to_string());
            continue;
        }

        if trimmed == ACTIVE_TECH_HEADING {
            close_section(&mut section, &mut out, update, &mut tech_seen, &mut existing_changes);
            section = Section::ActiveTech;
            saw_tech_heading = true;
            out.push(line.to_string());
            continue;
        }

        if trimmed == RECENT_CHANGES_HEADING {
            close_section(&mut section, &mut out, update, &mut tech_seen, &mut existing_changes);
            section = Section::RecentChanges;
            saw_changes_heading = true;
            out.push(line.to_string());
            continue;
        }

        // A heading or blank line ends the current section.
        if trimmed.is_empty() || trimmed.starts_with('#') {
            close_section(&mut section, &mut out, update, &mut tech_seen, &mut existing_changes);
            out.push(stamp_date(line, &update.today));
            continue;
        }

        match section {
            Section::ActiveTech => {
                tech_seen.push(trimmed.to_string());
                out.push(line.to_string());
            }
            Section::RecentChanges => {
                existing_changes.push(line.to_string());
            }
            Section::Outside => {
                out.push(stamp_date(line, &update.today));
            }
        }
    }

    close_section(&mut section, &mut out, update, &mut tech_seen, &mut existing_changes);

    if !saw_tech_heading {
        append_section(&mut out, ACTIVE_TECH_HEADING, &update.tech_entries);
    }
    if !saw_changes_heading {
        let entries: Vec<String> = update.change_entry.iter().cloned().collect();
        append_section(&mut out, RECENT_CHANGES_HEADING, &entries);
    }

    let mut result = out.join("\n");
    result.push('\n');
    result
}

/// Flushes the pending inserts for whichever section is open.
fn close_section(
    section: &mut Section,
    out: &mut Vec<String>,
    update: &ContextUpdate,
    tech_seen: &mut Vec<String>,
    existing_changes: &mut Vec<String>,
) {
    match *section {
        Section::Outside => {}
        Section::ActiveTech => {
            for candidate in &update.tech_entries {
                if !tech_seen.iter().any(|seen| seen == candidate.trim()) {
                    tech_seen.push(candidate.trim().to_string());
                    out.push(candidate.clone());
                }
            }
        }
        Section::RecentChanges => {
            let mut merged: Vec<String> = Vec::new();
            match &update.change_entry {
                Some(new) if !existing_changes.iter().any(|c| c.trim() == new.trim()) => {
                    merged.push(new.clone());
                    merged.extend(existing_changes.iter().take(RECENT_CHANGES_CAP - 1).cloned());
                }
                _ => {
                    merged.extend(existing_changes.iter().take(RECENT_CHANGES_CAP).cloned());
                }
            }
            out.append(&mut merged);
            existing_changes.clear();
        }
    }
    *section = Section::Outside;
}

fn append_section(out: &mut Vec<String>, heading: &str, entries: &[String]) {
    if out.last().is_some_and(|l| !l.is_empty()) {
        out.push(String::new());
    }
    out.push(heading.to_string());
    out.extend(entries.iter().cloned());
}

/// Rewrites only the date substring of a `Last updated:` stamp.
fn stamp_date(line: &str, today: &str) -> String {
    date_stamp_re()
        .replace(line, format!("Last updated: {today}"))
        .into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(lang: &str, deps: &str) -> PlanFields {
        PlanFields {
            language: Some(lang.to_string()),
            primary_dependencies: Some(deps.to_string()),
            storage: None,
            project_type: None,
        }
    }

    fn update(feature: &str, f: &PlanFields) -> ContextUpdate {
        ContextUpdate::with_date(feature, f, "2026-08-26")
    }

    const DOC: &str = "\
# demo Development Guidelines

Auto-generated from all feature plans. Last updated: 2025-01-01

## Active Technologies
- Rust 1.79 + clap (001-cli)

## Recent Changes
- 001-cli: Added Rust 1.79 + clap

<!-- MANUAL ADDITIONS START -->
My own notes.
<!-- MANUAL ADDITIONS END -->
";

    #[test]
    fn inserts_new_tech_and_change() {
        let f = fields("Go 1.22", "chi");
        let merged = merge(DOC, &update("002-api", &f));

        assert!(merged.contains("- Rust 1.79 + clap (001-cli)"));
        assert!(merged.contains("- Go 1.22 + chi (002-api)"));
        assert!(merged.contains("- 002-api: Added Go 1.22 + chi\n- 001-cli: Added Rust 1.79 + clap"));
        assert!(merged.contains("Last updated: 2026-08-26"));
    }

    #[test]
    fn merge_is_idempotent() {
        let f = fields("Go 1.22", "chi");
        let u = update("002-api", &f);
        let once = merge(DOC, &u);
        let twice = merge(&once, &u);
        assert_eq!(once, twice);
    }

    #[test]
    fn deduplicates_tech_entries() {
        let f = fields("Rust 1.79", "clap");
        let merged = merge(DOC, &update("001-cli", &f));
        let count = merged.matches("- Rust 1.79 + clap (001-cli)").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn storage_gets_its_own_entry() {
        let mut f = fields("Python 3.12", "FastAPI");
        f.storage = Some("PostgreSQL".to_string());
        let merged = merge(DOC, &update("003-data", &f));
        assert!(merged.contains("- Python 3.12 + FastAPI (003-data)"));
        assert!(merged.contains("- PostgreSQL (003-data)"));
    }

    #[test]
    fn recent_changes_capped_at_three_newest_first() {
        let mut doc = DOC.to_string();
        for (i, lang) in ["Go", "Zig", "Elixir", "OCaml"].iter().enumerate() {
            let f = fields(lang, "stdlib");
            doc = merge(&doc, &update(&format!("{:03}-f", i + 2), &f));
        }

        let changes: Vec<&str> = doc
            .lines()
            .skip_while(|l| l.trim() != RECENT_CHANGES_HEADING)
            .skip(1)
            .take_while(|l| !l.trim().is_empty())
            .collect();
        assert_eq!(
            changes,
            vec![
                "- 005-f: Added OCaml + stdlib",
                "- 004-f: Added Elixir + stdlib",
                "- 003-f: Added Zig + stdlib",
            ]
        );
    }

    #[test]
    fn manual_additions_survive_untouched() {
        let doc_with_markers_content = DOC.replace(
            "My own notes.",
            "## Active Technologies\n- fake entry inside manual block",
        );
        let f = fields("Go 1.22", "chi");
        let u = update("002-api", &f);
        let merged = merge(&doc_with_markers_content, &u);

        let manual = |s: &str| {
            let start = s.find(MANUAL_START).unwrap();
            let end = s.find(MANUAL_END).unwrap() + MANUAL_END.len();
            s[start..end].to_string()
        };
        assert_eq!(manual(&doc_with_markers_content), manual(&merged));

        // And again after a second pass.
        let merged_again = merge(&merged, &u);
        assert_eq!(manual(&merged), manual(&merged_again));
    }

    #[test]
    fn date_stamp_keeps_rest_of_line() {
        let f = fields("Go 1.22", "chi");
        let merged = merge(DOC, &update("002-api", &f));
        assert!(merged.contains("Auto-generated from all feature plans. Last updated: 2026-08-26"));
    }

    #[test]
    fn missing_sections_are_appended() {
        let bare = "# Notes\n\nJust prose.\n";
        let f = fields("Rust 1.79", "clap");
        let u = update("001-cli", &f);
        let merged = merge(bare, &u);

        assert!(merged.contains("Just prose."));
        assert!(merged.contains("## Active Technologies\n- Rust 1.79 + clap (001-cli)"));
        assert!(merged.contains("## Recent Changes\n- 001-cli: Added Rust 1.79 + clap"));
        assert_eq!(merge(&merged, &u), merged);
    }

    #[test]
    fn empty_fields_change_nothing_but_the_date() {
        let u = ContextUpdate::with_date("002-api", &PlanFields::default(), "2026-08-26");
        let merged = merge(DOC, &u);
        assert_eq!(merged, DOC.replace("2025-01-01", "2026-08-26"));
    }

    #[test]
    fn update_derivation() {
        let mut f = fields("Rust 1.79", "clap");
        f.storage = Some("sled".to_string());
        let u = update("004-cache", &f);
        assert_eq!(
            u.tech_entries,
            vec![
                "- Rust 1.79 + clap (004-cache)".to_string(),
                "- sled (004-cache)".to_string(),
            ]
        );
        assert_eq!(
            u.change_entry.as_deref(),
            Some("- 004-cache: Added Rust 1.79 + clap")
        );

        let none = update("004-cache", &PlanFields::default());
        assert!(none.tech_entries.is_empty());
        assert!(none.change_entry.is_none());
    }
}
