mod cmd;
mod output;

use clap::{Parser, Subcommand};
use specflow_core::repo::ResolveOptions;
use specflow_core::SpecflowError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specflow",
    about = "Spec-driven feature workflow — numbered specs, prerequisite gates, agent context sync",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repository root (default: auto-detect from .specflow/ or .git/)
    #[arg(long, global = true, env = "SPECFLOW_ROOT")]
    root: Option<PathBuf>,

    /// Feature id override (default: git branch, then highest-numbered specs/ entry)
    #[arg(long, global = true, env = "SPECFLOW_FEATURE")]
    feature: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize specflow in the current project
    Init,

    /// Create the next numbered feature from a description
    New {
        /// Free-text feature description
        #[arg(required = true, num_args = 1.., value_name = "DESCRIPTION")]
        description: Vec<String>,
    },

    /// Scaffold plan.md for the current feature
    Plan,

    /// Validate workflow prerequisites for the current feature
    Check {
        /// Require tasks.md to exist
        #[arg(long)]
        require_tasks: bool,

        /// Include tasks.md in the available-docs listing
        #[arg(long)]
        include_tasks: bool,

        /// Print the artifact paths without checking artifacts
        #[arg(long)]
        paths_only: bool,
    },

    /// Print artifact paths for the current feature without creating anything
    Paths,

    /// Merge plan data into agent context documents
    Sync {
        /// Agent label (omit to update every existing context file)
        agent: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let opts = ResolveOptions {
        root: cli.root.clone(),
        feature: cli.feature.clone(),
    };

    let result = match cli.command {
        Commands::Init => cmd::init::run(cli.root.as_deref(), cli.json),
        Commands::New { description } => cmd::new::run(&opts, &description.join(" "), cli.json),
        Commands::Plan => cmd::plan::run(&opts, cli.json),
        Commands::Check {
            require_tasks,
            include_tasks,
            paths_only,
        } => cmd::check::run(&opts, require_tasks, include_tasks, paths_only, cli.json),
        Commands::Paths => cmd::paths::run(&opts, cli.json),
        Commands::Sync { agent } => cmd::sync::run(&opts, agent.as_deref(), cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        let code = e
            .downcast_ref::<SpecflowError>()
            .map(SpecflowError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
