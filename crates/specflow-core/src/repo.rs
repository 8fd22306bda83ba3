//! Repository context resolution.
//!
//! Every command except `init` starts by resolving a [`RepoContext`]:
//! which directory is the repository root, whether git is in play, and
//! which feature the invocation targets. Resolution is a pure query;
//! it never creates or mutates anything on disk.

use std::path::{Path, PathBuf};

use crate::error::{Result, SpecflowError};
use crate::git;
use crate::paths::{self, FeaturePaths};

/// Feature id used when nothing else can be determined.
pub const DEFAULT_FEATURE: &str = "main";

// ---------------------------------------------------------------------------
// ResolveOptions / RepoContext
// ---------------------------------------------------------------------------

/// Caller-supplied overrides, read once at the CLI boundary.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// `--root` flag / `SPECFLOW_ROOT` env var.
    pub root: Option<PathBuf>,
    /// `--feature` flag / `SPECFLOW_FEATURE` env var.
    pub feature: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RepoContext {
    pub root: PathBuf,
    /// True when the root contains a `.git` entry (dir, or file for
    /// worktrees).
    pub vcs_present: bool,
    pub current_feature: String,
}

impl RepoContext {
    /// Resolves from the process working directory.
    pub fn resolve(opts: &ResolveOptions) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::resolve_from(&cwd, opts)
    }

    /// Resolves from an explicit starting directory.
    ///
    /// Root priority: the explicit override (which must itself carry a
    /// `.git` or `.specflow` marker), otherwise the nearest ancestor of
    /// `start` carrying one. Feature priority: override, then the git
    /// branch (skipped when detached), then the highest-numbered
    /// directory under `specs/`, then [`DEFAULT_FEATURE`].
    pub fn resolve_from(start: &Path, opts: &ResolveOptions) -> Result<Self> {
        let root = match &opts.root {
            Some(explicit) => {
                let root = if explicit.is_absolute() {
                    explicit.clone()
                } else {
                    start.join(explicit)
                };
                if !has_marker(&root) {
                    return Err(SpecflowError::NotARepository(root));
                }
                root
            }
            None => discover_root(start)
                .ok_or_else(|| SpecflowError::NotARepository(start.to_path_buf()))?,
        };

        let vcs_present = root.join(".git").exists();
        let current_feature = resolve_feature(&root, vcs_present, opts.feature.as_deref());

        Ok(Self {
            root,
            vcs_present,
            current_feature,
        })
    }

    /// Artifact paths for the current feature.
    pub fn feature_paths(&self) -> FeaturePaths {
        FeaturePaths::new(&self.root, &self.current_feature)
    }

    /// Commands that operate on an existing feature require an id with
    /// a 3-digit prefix; anything else gets the naming hint.
    pub fn require_feature_branch(&self) -> Result<()> {
        if paths::is_feature_id(&self.current_feature) {
            Ok(())
        } else {
            Err(SpecflowError::NotOnFeatureBranch(
                self.current_feature.clone(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery helpers
// ---------------------------------------------------------------------------

fn has_marker(dir: &Path) -> bool {
    dir.join(".git").exists() || dir.join(paths::SPECFLOW_DIR).is_dir()
}

/// Nearest ancestor of `start` (inclusive) containing a `.git` entry or
/// a `.specflow/` directory.
pub fn discover_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        if has_marker(&dir) {
            return Some(dir);
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => return None,
        }
    }
}

fn resolve_feature(root: &Path, vcs_present: bool, overridden: Option<&str>) -> String {
    if let Some(f) = overridden {
        if !f.trim().is_empty() {
            return f.to_string();
        }
    }

    if vcs_present && git::is_available() {
        // A failed lookup falls through to the directory scan; rev-parse
        // reports the literal "HEAD" when detached.
        match git::current_branch(root) {
            Ok(branch) if branch != "HEAD" => return branch,
            _ => {}
        }
    }

    if let Some(dir) = latest_feature_dir(root) {
        return dir;
    }

    DEFAULT_FEATURE.to_string()
}

/// Feature directory under `specs/` with the highest numeric prefix.
pub fn latest_feature_dir(root: &Path) -> Option<String> {
    let entries = std::fs::read_dir(paths::specs_dir(root)).ok()?;
    let mut best: Option<(u32, String)> = None;
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(num) = paths::numeric_prefix(&name) {
            let candidate = (num, name);
            if best.as_ref().map_or(true, |b| candidate > *b) {
                best = Some(candidate);
            }
        }
    }
    best.map(|(_, name)| name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
