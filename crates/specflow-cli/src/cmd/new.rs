use anyhow::Context;

use specflow_core::feature;
use specflow_core::repo::{RepoContext, ResolveOptions};

use crate::output::print_json;

pub fn run(opts: &ResolveOptions, description: &str, json: bool) -> anyhow::Result<()> {
    let ctx = RepoContext::resolve(opts)?;
    let nf = feature::create(&ctx, description)
        .with_context(|| format!("failed to create feature from '{description}'"))?;

    if !ctx.vcs_present {
        eprintln!(
            "warning: git not detected; skipped branch creation for {}",
            nf.branch_name
        );
    }
    if nf.template_missing {
        eprintln!(
            "warning: no template at {}; used the built-in spec template",
            specflow_core::templates::TemplateKind::Spec
                .path(&ctx.root)
                .display()
        );
    }

    if json {
        print_json(&serde_json::json!({
            "BRANCH_NAME": nf.branch_name,
            "SPEC_FILE": nf.spec_file,
            "FEATURE_NUM": nf.feature_num,
        }))?;
    } else {
        println!("BRANCH_NAME: {}", nf.branch_name);
        println!("SPEC_FILE: {}", nf.spec_file.display());
        println!("FEATURE_NUM: {}", nf.feature_num);
    }
    Ok(())
}
