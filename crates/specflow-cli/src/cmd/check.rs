use specflow_core::prereq::{self, PrereqOptions};
use specflow_core::repo::{RepoContext, ResolveOptions};

use crate::output::print_json;

pub fn run(
    opts: &ResolveOptions,
    require_tasks: bool,
    include_tasks: bool,
    paths_only: bool,
    json: bool,
) -> anyhow::Result<()> {
    let ctx = RepoContext::resolve(opts)?;
    ctx.require_feature_branch()?;

    if paths_only {
        return super::paths::print(&ctx, json);
    }

    let report = prereq::check(
        &ctx.feature_paths(),
        &PrereqOptions {
            require_tasks,
            include_tasks,
        },
    )?;

    if json {
        print_json(&serde_json::json!({
            "FEATURE_DIR": report.feature_dir,
            "AVAILABLE_DOCS": report.available(),
        }))?;
    } else {
        println!("FEATURE_DIR:{}", report.feature_dir.display());
        println!("AVAILABLE_DOCS:");
        for doc in &report.docs {
            let mark = if doc.present { '✓' } else { '✗' };
            println!("  {mark} {}", doc.name);
        }
    }
    Ok(())
}
