//! Agent-context synchronization.
//!
//! One merge pass per target document. An explicit agent label selects
//! a single target; otherwise every agent with an existing document is
//! updated, and when none exist a single default document is created.
//! Targets are processed independently: one failure is recorded in its
//! outcome and does not stop the rest.

pub mod document;
pub mod registry;
pub mod template;

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Result, SpecflowError};
use crate::io;
use crate::plan::PlanFields;
use crate::repo::RepoContext;
use crate::templates::{self, TemplateKind};

pub use document::{ContextUpdate, MANUAL_END, MANUAL_START};
pub use registry::AgentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
}

impl SyncAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncAction::Created => "created",
            SyncAction::Updated => "updated",
        }
    }
}

/// Result of one target's sync attempt.
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub agent: AgentKind,
    pub path: PathBuf,
    pub action: SyncAction,
    /// Present when this target failed; other targets still ran.
    pub error: Option<String>,
}

impl TargetOutcome {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Synchronizes the current feature's plan data into the selected agent
/// context documents. Fails up front (before touching any target) when
/// the feature has no `plan.md`.
pub fn sync(ctx: &RepoContext, agent: Option<AgentKind>) -> Result<Vec<TargetOutcome>> {
    let feature = ctx.feature_paths();
    if !feature.plan.is_file() {
        return Err(SpecflowError::MissingPrerequisite {
            missing: format!("plan.md not found at {}", feature.plan.display()),
            hint: "run 'specflow plan' first to create the plan".to_string(),
        });
    }

    let fields = PlanFields::extract(&feature.plan)?;
    let update = ContextUpdate::new(&ctx.current_feature, &fields);
    sync_with_update(ctx, agent, &fields, &update)
}

/// Inner driver with the date-bearing update passed in, so tests can
/// pin the date.
pub fn sync_with_update(
    ctx: &RepoContext,
    agent: Option<AgentKind>,
    fields: &PlanFields,
    update: &ContextUpdate,
) -> Result<Vec<TargetOutcome>> {
    let targets = select_targets(ctx, agent)?;

    let mut outcomes = Vec::with_capacity(targets.len());
    for target in targets {
        let path = target.doc_path(&ctx.root);
        let action = if path.is_file() {
            SyncAction::Updated
        } else {
            SyncAction::Created
        };
        let error = sync_one(ctx, &path, action, fields, update)
            .err()
            .map(|e| e.to_string());
        outcomes.push(TargetOutcome {
            agent: target,
            path,
            action,
            error,
        });
    }
    Ok(outcomes)
}

fn sync_one(
    ctx: &RepoContext,
    path: &std::path::Path,
    action: SyncAction,
    fields: &PlanFields,
    update: &ContextUpdate,
) -> Result<()> {
    let content = match action {
        SyncAction::Updated => {
            let existing = std::fs::read_to_string(path)?;
            document::merge(&existing, update)
        }
        SyncAction::Created => {
            let config = Config::load_or_default(&ctx.root)?;
            let source = templates::load(&ctx.root, TemplateKind::AgentFile)?;
            let rendered = template::render(&source.content, &config.project.name, fields, update);
            // Run the merge once so creation and update share one
            // canonical form.
            document::merge(&rendered, update)
        }
    };
    io::atomic_write(path, content.as_bytes())
}

/// Explicit agent → that one; otherwise all agents with an existing
/// document; otherwise the configured (or claude) default.
fn select_targets(ctx: &RepoContext, agent: Option<AgentKind>) -> Result<Vec<AgentKind>> {
    if let Some(agent) = agent {
        return Ok(vec![agent]);
    }

    // Anything occupying a target path counts as existing, even when it
    // is not a readable file; the attempt then fails and the failure is
    // reported in that target's outcome instead of being skipped.
    let existing: Vec<AgentKind> = AgentKind::all()
        .iter()
        .copied()
        .filter(|a| a.doc_path(&ctx.root).exists())
        .collect();
    if !existing.is_empty() {
        return Ok(existing);
    }

    let config = Config::load_or_default(&ctx.root)?;
    let default = match config.default_agent.as_deref() {
        Some(label) => label.parse()?,
        None => AgentKind::Claude,
    };
    Ok(vec![default])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
