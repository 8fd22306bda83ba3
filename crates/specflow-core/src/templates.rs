//! Scaffold templates for feature artifacts and agent context files.
//!
//! `init` writes these to `.specflow/templates/` so projects can tune
//! them; every consumer loads the on-disk copy when present and falls
//! back to the embedded default otherwise.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::paths;

// ---------------------------------------------------------------------------
// TemplateKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Spec,
    Plan,
    Tasks,
    AgentFile,
}

impl TemplateKind {
    pub fn all() -> [TemplateKind; 4] {
        [
            TemplateKind::Spec,
            TemplateKind::Plan,
            TemplateKind::Tasks,
            TemplateKind::AgentFile,
        ]
    }

    /// File name under `.specflow/templates/`.
    pub fn filename(&self) -> &'static str {
        match self {
            TemplateKind::Spec => "spec-template.md",
            TemplateKind::Plan => "plan-template.md",
            TemplateKind::Tasks => "tasks-template.md",
            TemplateKind::AgentFile => "agent-file-template.md",
        }
    }

    pub fn embedded(&self) -> &'static str {
        match self {
            TemplateKind::Spec => SPEC_TEMPLATE,
            TemplateKind::Plan => PLAN_TEMPLATE,
            TemplateKind::Tasks => TASKS_TEMPLATE,
            TemplateKind::AgentFile => AGENT_FILE_TEMPLATE,
        }
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        paths::template_path(root, self.filename())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub content: String,
    /// False when the on-disk override was absent and the embedded
    /// default was used; callers surface this as a warning.
    pub from_disk: bool,
}

pub fn load(root: &Path, kind: TemplateKind) -> Result<TemplateSource> {
    let path = kind.path(root);
    if path.is_file() {
        Ok(TemplateSource {
            content: std::fs::read_to_string(&path)?,
            from_disk: true,
        })
    } else {
        Ok(TemplateSource {
            content: kind.embedded().to_string(),
            from_disk: false,
        })
    }
}

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const SPEC_TEMPLATE: &str = r#"# Feature Specification: [FEATURE NAME]

**Feature Branch**: `[###-feature-name]`
**Status**: Draft

## User Scenarios

### Primary User Story
[Describe the main user journey in plain language]

### Acceptance Scenarios
1. **Given** [initial state], **When** [action], **Then** [expected outcome]

## Requirements

### Functional Requirements
- **FR-001**: System MUST [specific, testable capability]

### Key Entities
- **[Entity]**: [what it represents, key attributes]

## Review Checklist

- [ ] No implementation details (languages, frameworks, APIs)
- [ ] Requirements are testable and unambiguous
- [ ] Scope is clearly bounded
"#;

const PLAN_TEMPLATE: &str = r#"# Implementation Plan: [FEATURE]

**Branch**: `[###-feature-name]`
**Spec**: [link to spec.md]

## Summary
[One paragraph: what the feature does and the chosen technical approach]

## Technical Context
**Language/Version**: NEEDS CLARIFICATION
**Primary Dependencies**: NEEDS CLARIFICATION
**Storage**: NEEDS CLARIFICATION
**Project Type**: NEEDS CLARIFICATION

## Phase 0: Research
Resolve every NEEDS CLARIFICATION above; record findings in research.md.

## Phase 1: Design
Produce data-model.md, contracts/, and quickstart.md from the spec.

## Phase 2: Tasks
Generated by the tasks step into tasks.md; not part of this plan.
"#;

const TASKS_TEMPLATE: &str = r#"# Tasks: [FEATURE NAME]

**Input**: design documents from `specs/[###-feature-name]/`

Rules: tests before implementation; `[P]` marks tasks safe to run in
parallel (different files, no ordering between them); every task names
the exact files it touches.

## Phase 1: Setup
- [ ] T001 [project scaffolding / dependencies]

## Phase 2: Tests
- [ ] T002 [P] [contract test per interface]
- [ ] T003 [P] [integration test per user story]

## Phase 3: Core
- [ ] T004 [implementation making the tests pass]

## Phase 4: Polish
- [ ] T005 [docs, cleanup, performance checks]
"#;

const AGENT_FILE_TEMPLATE: &str = r#"# [PROJECT NAME] Development Guidelines

Auto-generated from all feature plans. Last updated: [DATE]

## Active Technologies
[EXTRACTED FROM ALL PLAN.MD FILES]

## Project Structure
```
[ACTUAL STRUCTURE FROM PLANS]
```

## Commands
[ONLY COMMANDS FOR ACTIVE TECHNOLOGIES]

## Code Style
[LANGUAGE-SPECIFIC, ONLY FOR LANGUAGES IN USE]

## Recent Changes
[LAST 3 FEATURES AND WHAT THEY ADDED]

<!-- MANUAL ADDITIONS START -->
<!-- MANUAL ADDITIONS END -->
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
