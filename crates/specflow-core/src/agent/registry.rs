//! Table of known agent context targets.
//!
//! One shared merge algorithm serves every entry; adding an agent means
//! adding a variant and two match arms, never another code path.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SpecflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Claude,
    Gemini,
    Copilot,
    Cursor,
    Qwen,
    Opencode,
    Windsurf,
}

impl AgentKind {
    pub fn all() -> &'static [AgentKind] {
        &[
            AgentKind::Claude,
            AgentKind::Gemini,
            AgentKind::Copilot,
            AgentKind::Cursor,
            AgentKind::Qwen,
            AgentKind::Opencode,
            AgentKind::Windsurf,
        ]
    }

    /// CLI label.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Claude => "claude",
            AgentKind::Gemini => "gemini",
            AgentKind::Copilot => "copilot",
            AgentKind::Cursor => "cursor",
            AgentKind::Qwen => "qwen",
            AgentKind::Opencode => "opencode",
            AgentKind::Windsurf => "windsurf",
        }
    }

    /// Human name used in progress messages.
    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::Claude => "Claude Code",
            AgentKind::Gemini => "Gemini CLI",
            AgentKind::Copilot => "GitHub Copilot",
            AgentKind::Cursor => "Cursor",
            AgentKind::Qwen => "Qwen Code",
            AgentKind::Opencode => "opencode",
            AgentKind::Windsurf => "Windsurf",
        }
    }

    /// Context document path relative to the repository root. Paths are
    /// disjoint across agents, so multi-target sync touches disjoint
    /// files.
    pub fn relative_doc_path(self) -> &'static str {
        match self {
            AgentKind::Claude => "CLAUDE.md",
            AgentKind::Gemini => "GEMINI.md",
            AgentKind::Copilot => ".github/copilot-instructions.md",
            AgentKind::Cursor => ".cursor/rules/specflow-rules.mdc",
            AgentKind::Qwen => "QWEN.md",
            AgentKind::Opencode => "AGENTS.md",
            AgentKind::Windsurf => ".windsurf/rules/specflow-rules.md",
        }
    }

    pub fn doc_path(self, root: &Path) -> PathBuf {
        root.join(self.relative_doc_path())
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = SpecflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentKind::all()
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = AgentKind::all().iter().map(|a| a.as_str()).collect();
                SpecflowError::InvalidInput(format!(
                    "unknown agent '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}
