use specflow_core::repo::{RepoContext, ResolveOptions};

use crate::output::print_json;

pub fn run(opts: &ResolveOptions, json: bool) -> anyhow::Result<()> {
    let ctx = RepoContext::resolve(opts)?;
    ctx.require_feature_branch()?;
    print(&ctx, json)
}

/// Shared with `check --paths-only`.
pub fn print(ctx: &RepoContext, json: bool) -> anyhow::Result<()> {
    let fp = ctx.feature_paths();
    if json {
        print_json(&serde_json::json!({
            "REPO_ROOT": ctx.root,
            "BRANCH": ctx.current_feature,
            "FEATURE_DIR": fp.feature_dir,
            "FEATURE_SPEC": fp.spec,
            "IMPL_PLAN": fp.plan,
            "TASKS": fp.tasks,
        }))?;
    } else {
        println!("REPO_ROOT: {}", ctx.root.display());
        println!("BRANCH: {}", ctx.current_feature);
        println!("FEATURE_DIR: {}", fp.feature_dir.display());
        println!("FEATURE_SPEC: {}", fp.spec.display());
        println!("IMPL_PLAN: {}", fp.plan.display());
        println!("TASKS: {}", fp.tasks.display());
    }
    Ok(())
}
