//! Feature creation: numbers, slugs, branches, and scaffolding.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, SpecflowError};
use crate::git;
use crate::io;
use crate::paths::{self, FeaturePaths};
use crate::repo::RepoContext;
use crate::templates::{self, TemplateKind};

// ---------------------------------------------------------------------------
// Slug / numbering
// ---------------------------------------------------------------------------

fn non_alnum_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// Lowercase, collapse every non-alphanumeric run to one hyphen, strip
/// edge hyphens, keep at most the first 3 words.
pub fn slugify(description: &str) -> String {
    let lowered = description.to_lowercase();
    let hyphened = non_alnum_re().replace_all(&lowered, "-");
    hyphened
        .trim_matches('-')
        .split('-')
        .filter(|w| !w.is_empty())
        .take(3)
        .collect::<Vec<_>>()
        .join("-")
}

/// Next feature number: one past the highest 3-digit prefix among the
/// directories in `specs_dir`. Gaps from deleted features are never
/// refilled. A missing root counts as empty.
pub fn next_feature_number(specs_dir: &Path) -> Result<u32> {
    let entries = match std::fs::read_dir(specs_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(e.into()),
    };

    let mut highest = 0;
    for entry in entries {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(num) = paths::numeric_prefix(&name) {
            highest = highest.max(num);
        }
    }
    Ok(highest + 1)
}

// ---------------------------------------------------------------------------
// Feature creation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewFeature {
    pub branch_name: String,
    pub spec_file: PathBuf,
    /// Zero-padded, e.g. `"003"`.
    pub feature_num: String,
    /// True when no `.specflow/templates/` override existed and the
    /// embedded spec template was used.
    pub template_missing: bool,
}

/// Creates the next feature: allocate a number, derive the id, create
/// the git branch (when the repo has one), then scaffold
/// `specs/<id>/spec.md`.
pub fn create(ctx: &RepoContext, description: &str) -> Result<NewFeature> {
    if description.trim().is_empty() {
        return Err(SpecflowError::InvalidInput(
            "feature description cannot be empty".to_string(),
        ));
    }

    let specs_dir = paths::specs_dir(&ctx.root);
    io::ensure_dir(&specs_dir)?;

    let num = next_feature_number(&specs_dir)?;
    let feature_num = format!("{num:03}");
    let slug = slugify(description);
    let branch_name = if slug.is_empty() {
        feature_num.clone()
    } else {
        format!("{feature_num}-{slug}")
    };

    // Branch first: a git failure must leave no half-created feature
    // directory behind.
    if ctx.vcs_present {
        git::create_branch(&ctx.root, &branch_name)?;
    }

    let feature = FeaturePaths::new(&ctx.root, &branch_name);
    io::ensure_dir(&feature.feature_dir)?;

    let template = templates::load(&ctx.root, TemplateKind::Spec)?;
    io::atomic_write(&feature.spec, template.content.as_bytes())?;

    Ok(NewFeature {
        branch_name,
        spec_file: feature.spec,
        feature_num,
        template_missing: !template.from_disk,
    })
}

// ---------------------------------------------------------------------------
// Plan scaffolding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PlanScaffold {
    pub feature_spec: PathBuf,
    pub impl_plan: PathBuf,
    pub feature_dir: PathBuf,
    pub branch: String,
    pub template_missing: bool,
}

/// Ensures the current feature directory exists and (re)writes
/// `plan.md` from the plan template.
pub fn scaffold_plan(ctx: &RepoContext) -> Result<PlanScaffold> {
    let feature = ctx.feature_paths();
    io::ensure_dir(&feature.feature_dir)?;

    let template = templates::load(&ctx.root, TemplateKind::Plan)?;
    io::atomic_write(&feature.plan, template.content.as_bytes())?;

    Ok(PlanScaffold {
        feature_spec: feature.spec,
        impl_plan: feature.plan,
        feature_dir: feature.feature_dir,
        branch: ctx.current_feature.clone(),
        template_missing: !template.from_disk,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ctx(root: &Path) -> RepoContext {
        RepoContext {
            root: root.to_path_buf(),
            vcs_present: false,
            current_feature: "main".to_string(),
        }
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Add payment retries"), "add-payment-retries");
        assert_eq!(slugify("OAuth2  Login!"), "oauth2-login");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn slugify_caps_at_three_words() {
        assert_eq!(
            slugify("implement full text search engine"),
            "implement-full-text"
        );
    }

    #[test]
    fn slugify_punctuation_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn slugify_is_deterministic() {
        let a = slugify("Add Payment Retries");
        let b = slugify("Add Payment Retries");
        assert_eq!(a, b);
    }

    #[test]
    fn numbering_starts_at_one() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(next_feature_number(&tmp.path().join("specs")).unwrap(), 1);
        std::fs::create_dir_all(tmp.path().join("specs")).unwrap();
        assert_eq!(next_feature_number(&tmp.path().join("specs")).unwrap(), 1);
    }

    #[test]
    fn numbering_is_max_plus_one() {
        let tmp = TempDir::new().unwrap();
        let specs = tmp.path().join("specs");
        for d in ["001-auth", "003-search"] {
            std::fs::create_dir_all(specs.join(d)).unwrap();
        }
        assert_eq!(next_feature_number(&specs).unwrap(), 4);
    }

    #[test]
    fn numbering_never_reuses_after_deletion() {
        let tmp = TempDir::new().unwrap();
        let specs = tmp.path().join("specs");
        std::fs::create_dir_all(specs.join("005-last")).unwrap();
        // 001..004 are long gone; the allocator must not refill them.
        assert_eq!(next_feature_number(&specs).unwrap(), 6);
    }

    #[test]
    fn numbering_ignores_files_and_unprefixed_dirs() {
        let tmp = TempDir::new().unwrap();
        let specs = tmp.path().join("specs");
        std::fs::create_dir_all(specs.join("notes")).unwrap();
        std::fs::create_dir_all(specs.join("07-short")).unwrap();
        std::fs::write(specs.join("009-file"), "not a dir").unwrap();
        assert_eq!(next_feature_number(&specs).unwrap(), 1);
    }

    #[test]
    fn create_allocates_and_scaffolds() {
        let tmp = TempDir::new().unwrap();
        let nf = create(&ctx(tmp.path()), "Add payment retries").unwrap();

        assert_eq!(nf.branch_name, "001-add-payment-retries");
        assert_eq!(nf.feature_num, "001");
        assert!(nf.template_missing);
        assert!(nf.spec_file.is_file());
        assert_eq!(
            nf.spec_file,
            tmp.path().join("specs/001-add-payment-retries/spec.md")
        );
    }

    #[test]
    fn create_with_empty_slug_uses_bare_number() {
        let tmp = TempDir::new().unwrap();
        create(&ctx(tmp.path()), "Add payment retries").unwrap();
        let nf = create(&ctx(tmp.path()), "!!!").unwrap();

        assert_eq!(nf.branch_name, "002");
        assert!(tmp.path().join("specs/002/spec.md").is_file());
    }

    #[test]
    fn create_rejects_blank_description() {
        let tmp = TempDir::new().unwrap();
        let err = create(&ctx(tmp.path()), "   ").unwrap_err();
        assert!(matches!(err, SpecflowError::InvalidInput(_)));
        assert!(tmp.path().join("specs").read_dir().is_err());
    }

    #[test]
    fn create_uses_disk_template_when_present() {
        let tmp = TempDir::new().unwrap();
        let path = TemplateKind::Spec.path(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "# Custom Spec\n").unwrap();

        let nf = create(&ctx(tmp.path()), "custom template feature").unwrap();
        assert!(!nf.template_missing);
        let written = std::fs::read_to_string(&nf.spec_file).unwrap();
        assert_eq!(written, "# Custom Spec\n");
    }

    #[test]
    fn scaffold_plan_overwrites_existing_plan() {
        let tmp = TempDir::new().unwrap();
        let mut c = ctx(tmp.path());
        c.current_feature = "001-auth".to_string();

        std::fs::create_dir_all(tmp.path().join("specs/001-auth")).unwrap();
        std::fs::write(tmp.path().join("specs/001-auth/plan.md"), "old\n").unwrap();

        let scaffold = scaffold_plan(&c).unwrap();
        assert_eq!(scaffold.branch, "001-auth");
        let content = std::fs::read_to_string(&scaffold.impl_plan).unwrap();
        assert!(content.contains("Implementation Plan"));
        assert!(!content.contains("old"));
    }
}
