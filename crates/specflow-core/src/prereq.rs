//! Prerequisite validation between workflow steps.
//!
//! Each workflow phase requires certain artifacts from the previous
//! one. Required artifacts fail fast with a remediation hint naming
//! the step to run; optional design documents are only enumerated.

use std::path::PathBuf;

use crate::error::{Result, SpecflowError};
use crate::paths::{FeaturePaths, DATA_MODEL_FILE, QUICKSTART_FILE, RESEARCH_FILE, TASKS_FILE};

#[derive(Debug, Clone, Copy, Default)]
pub struct PrereqOptions {
    /// Treat `tasks.md` as required, not merely enumerable.
    pub require_tasks: bool,
    /// Include `tasks.md` in the optional-docs enumeration even when
    /// not required.
    pub include_tasks: bool,
}

/// One optional design document and whether it exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocStatus {
    /// Literal on-disk name (`research.md`, `contracts/`, ...).
    pub name: &'static str,
    pub present: bool,
}

/// Successful validation result. Both the human rendering and the JSON
/// schema derive from the same `docs` vector, so they always agree on
/// which documents are present.
#[derive(Debug, Clone)]
pub struct PrereqReport {
    pub feature_dir: PathBuf,
    /// Fixed enumeration order: research, data-model, contracts,
    /// quickstart, then tasks when requested.
    pub docs: Vec<DocStatus>,
}

impl PrereqReport {
    /// Names of the documents that actually exist.
    pub fn available(&self) -> Vec<&'static str> {
        self.docs
            .iter()
            .filter(|d| d.present)
            .map(|d| d.name)
            .collect()
    }
}

/// Validates that the phase's required artifacts exist and enumerates
/// the optional ones. `contracts/` counts as present only when the
/// directory is non-empty.
pub fn check(paths: &FeaturePaths, opts: &PrereqOptions) -> Result<PrereqReport> {
    if !paths.feature_dir.is_dir() {
        return Err(SpecflowError::MissingPrerequisite {
            missing: format!("feature directory not found: {}", paths.feature_dir.display()),
            hint: "run 'specflow new <description>' first to create the feature structure"
                .to_string(),
        });
    }

    if !paths.plan.is_file() {
        return Err(SpecflowError::MissingPrerequisite {
            missing: format!("plan.md not found in {}", paths.feature_dir.display()),
            hint: "run 'specflow plan' first to create the plan".to_string(),
        });
    }

    if opts.require_tasks && !paths.tasks.is_file() {
        return Err(SpecflowError::MissingPrerequisite {
            missing: format!("tasks.md not found in {}", paths.feature_dir.display()),
            hint: "run the tasks step first to create tasks.md".to_string(),
        });
    }

    let mut docs = vec![
        DocStatus {
            name: RESEARCH_FILE,
            present: paths.research.is_file(),
        },
        DocStatus {
            name: DATA_MODEL_FILE,
            present: paths.data_model.is_file(),
        },
        DocStatus {
            name: "contracts/",
            present: dir_non_empty(&paths.contracts_dir),
        },
        DocStatus {
            name: QUICKSTART_FILE,
            present: paths.quickstart.is_file(),
        },
    ];
    if opts.require_tasks || opts.include_tasks {
        docs.push(DocStatus {
            name: TASKS_FILE,
            present: paths.tasks.is_file(),
        });
    }

    Ok(PrereqReport {
        feature_dir: paths.feature_dir.clone(),
        docs,
    })
}

fn dir_non_empty(dir: &std::path::Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
