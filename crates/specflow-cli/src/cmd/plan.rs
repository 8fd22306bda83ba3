use specflow_core::feature;
use specflow_core::repo::{RepoContext, ResolveOptions};

use crate::output::print_json;

pub fn run(opts: &ResolveOptions, json: bool) -> anyhow::Result<()> {
    let ctx = RepoContext::resolve(opts)?;
    ctx.require_feature_branch()?;

    let scaffold = feature::scaffold_plan(&ctx)?;
    if scaffold.template_missing {
        eprintln!(
            "warning: no template at {}; used the built-in plan template",
            specflow_core::templates::TemplateKind::Plan
                .path(&ctx.root)
                .display()
        );
    }

    if json {
        print_json(&serde_json::json!({
            "FEATURE_SPEC": scaffold.feature_spec,
            "IMPL_PLAN": scaffold.impl_plan,
            "SPECS_DIR": scaffold.feature_dir,
            "BRANCH": scaffold.branch,
        }))?;
    } else {
        println!("FEATURE_SPEC: {}", scaffold.feature_spec.display());
        println!("IMPL_PLAN: {}", scaffold.impl_plan.display());
        println!("SPECS_DIR: {}", scaffold.feature_dir.display());
        println!("BRANCH: {}", scaffold.branch);
    }
    Ok(())
}
