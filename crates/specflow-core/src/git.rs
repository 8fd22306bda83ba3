//! Thin shell-out wrapper around the `git` binary.
//!
//! Every helper runs git with the repository root as its working
//! directory and maps a non-zero exit status to [`SpecflowError::Vcs`]
//! carrying the stderr text. Callers decide whether git being absent is
//! an error; [`is_available`] lets them check first.

use std::path::Path;
use std::process::Command;

use crate::error::{Result, SpecflowError};

/// Returns true when a `git` binary can be found on PATH.
pub fn is_available() -> bool {
    which::which("git").is_ok()
}

/// Name of the currently checked-out branch (`HEAD` when detached).
pub fn current_branch(root: &Path) -> Result<String> {
    let out = run(root, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(out.trim().to_string())
}

/// Creates `name` and switches to it, like `git checkout -b`.
pub fn create_branch(root: &Path, name: &str) -> Result<()> {
    run(root, &["checkout", "-b", name])?;
    Ok(())
}

fn run(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| SpecflowError::Vcs(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SpecflowError::Vcs(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
