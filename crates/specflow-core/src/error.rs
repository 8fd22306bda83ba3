use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecflowError {
    #[error("not a repository: no .git or .specflow found in '{}' or any parent (run 'specflow init' first)", .0.display())]
    NotARepository(PathBuf),

    #[error("{missing}: {hint}")]
    MissingPrerequisite { missing: String, hint: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not on a feature branch: '{0}' (feature branches are named like 001-user-auth)")]
    NotOnFeatureBranch(String),

    #[error("git: {0}")]
    Vcs(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl SpecflowError {
    /// Process exit status for this error class. Each class gets its own
    /// code so callers can branch on the failure kind without parsing stderr.
    pub fn exit_code(&self) -> i32 {
        match self {
            SpecflowError::NotARepository(_) => 2,
            SpecflowError::MissingPrerequisite { .. } => 3,
            SpecflowError::InvalidInput(_) | SpecflowError::NotOnFeatureBranch(_) => 4,
            SpecflowError::Io(_) => 5,
            SpecflowError::Vcs(_) => 6,
            SpecflowError::Yaml(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpecflowError>;
