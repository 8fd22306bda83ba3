use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory and file constants
// ---------------------------------------------------------------------------

pub const SPECFLOW_DIR: &str = ".specflow";
pub const TEMPLATES_DIR: &str = ".specflow/templates";
pub const CONFIG_FILE: &str = ".specflow/config.yaml";
pub const SPECS_DIR: &str = "specs";

pub const SPEC_FILE: &str = "spec.md";
pub const PLAN_FILE: &str = "plan.md";
pub const TASKS_FILE: &str = "tasks.md";
pub const RESEARCH_FILE: &str = "research.md";
pub const DATA_MODEL_FILE: &str = "data-model.md";
pub const QUICKSTART_FILE: &str = "quickstart.md";
pub const CONTRACTS_DIR: &str = "contracts";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn specflow_dir(root: &Path) -> PathBuf {
    root.join(SPECFLOW_DIR)
}

pub fn templates_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATES_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn specs_dir(root: &Path) -> PathBuf {
    root.join(SPECS_DIR)
}

pub fn template_path(root: &Path, filename: &str) -> PathBuf {
    templates_dir(root).join(filename)
}

// ---------------------------------------------------------------------------
// FeaturePaths
// ---------------------------------------------------------------------------

/// The canonical artifact locations for one feature. A pure function of
/// (root, feature id) — nothing here touches the filesystem, and no caller
/// constructs an artifact path by hand.
#[derive(Debug, Clone)]
pub struct FeaturePaths {
    pub feature_dir: PathBuf,
    pub spec: PathBuf,
    pub plan: PathBuf,
    pub tasks: PathBuf,
    pub research: PathBuf,
    pub data_model: PathBuf,
    pub quickstart: PathBuf,
    pub contracts_dir: PathBuf,
}

impl FeaturePaths {
    pub fn new(root: &Path, feature_id: &str) -> Self {
        let feature_dir = specs_dir(root).join(feature_id);
        Self {
            spec: feature_dir.join(SPEC_FILE),
            plan: feature_dir.join(PLAN_FILE),
            tasks: feature_dir.join(TASKS_FILE),
            research: feature_dir.join(RESEARCH_FILE),
            data_model: feature_dir.join(DATA_MODEL_FILE),
            quickstart: feature_dir.join(QUICKSTART_FILE),
            contracts_dir: feature_dir.join(CONTRACTS_DIR),
            feature_dir,
        }
    }
}

// ---------------------------------------------------------------------------
// Feature id helpers
// ---------------------------------------------------------------------------

static FEATURE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn feature_id_re() -> &'static Regex {
    // Exactly three leading digits, then either the end of the name or a
    // hyphen-separated slug. "0010-x" is not a feature id.
    FEATURE_ID_RE.get_or_init(|| Regex::new(r"^(\d{3})(?:-|$)").unwrap())
}

/// True if `name` is a well-formed feature id (`001-user-auth`, or a bare
/// `002` when the slug was empty).
pub fn is_feature_id(name: &str) -> bool {
    feature_id_re().is_match(name)
}

/// The numeric prefix of a feature id, if `name` has one.
pub fn numeric_prefix(name: &str) -> Option<u32> {
    feature_id_re()
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_ids() {
        for name in ["001-user-auth", "042-x", "100", "999-a-b-c"] {
            assert!(is_feature_id(name), "expected feature id: {name}");
        }
        for name in ["main", "1-auth", "0010-auth", "abc-001", "", "00a-x"] {
            assert!(!is_feature_id(name), "expected non-feature id: {name}");
        }
    }

    #[test]
    fn numeric_prefixes() {
        assert_eq!(numeric_prefix("001-user-auth"), Some(1));
        assert_eq!(numeric_prefix("042"), Some(42));
        assert_eq!(numeric_prefix("120-payment-retries"), Some(120));
        assert_eq!(numeric_prefix("12-short"), None);
        assert_eq!(numeric_prefix("0010-long"), None);
        assert_eq!(numeric_prefix("notes"), None);
    }

    #[test]
    fn feature_paths_are_pure() {
        let root = Path::new("/tmp/proj");
        let paths = FeaturePaths::new(root, "001-auth");
        assert_eq!(
            paths.feature_dir,
            PathBuf::from("/tmp/proj/specs/001-auth")
        );
        assert_eq!(paths.spec, PathBuf::from("/tmp/proj/specs/001-auth/spec.md"));
        assert_eq!(paths.plan, PathBuf::from("/tmp/proj/specs/001-auth/plan.md"));
        assert_eq!(
            paths.contracts_dir,
            PathBuf::from("/tmp/proj/specs/001-auth/contracts")
        );
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.specflow/config.yaml")
        );
        assert_eq!(
            template_path(root, "spec-template.md"),
            PathBuf::from("/tmp/proj/.specflow/templates/spec-template.md")
        );
    }
}
