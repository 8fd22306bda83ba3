use specflow_core::agent::{self, AgentKind};
use specflow_core::repo::{RepoContext, ResolveOptions};

use crate::output::print_json;

pub fn run(opts: &ResolveOptions, label: Option<&str>, json: bool) -> anyhow::Result<()> {
    let ctx = RepoContext::resolve(opts)?;
    ctx.require_feature_branch()?;

    let agent = label.map(|l| l.parse::<AgentKind>()).transpose()?;
    let outcomes = agent::sync(&ctx, agent)?;

    if json {
        let entries: Vec<_> = outcomes
            .iter()
            .map(|o| {
                serde_json::json!({
                    "AGENT": o.agent.as_str(),
                    "PATH": o.path,
                    "ACTION": o.action.as_str(),
                    "OK": o.ok(),
                    "ERROR": o.error,
                })
            })
            .collect();
        print_json(&entries)?;
    } else {
        for o in &outcomes {
            match &o.error {
                None => println!(
                    "{} {} ({})",
                    o.action.as_str(),
                    o.path.display(),
                    o.agent.display_name()
                ),
                Some(e) => eprintln!(
                    "failed {} ({}): {e}",
                    o.path.display(),
                    o.agent.display_name()
                ),
            }
        }
    }

    let failed = outcomes.iter().filter(|o| !o.ok()).count();
    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} agent context file(s) failed to update",
            outcomes.len()
        );
    }
    Ok(())
}
