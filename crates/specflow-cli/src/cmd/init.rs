use anyhow::Context;
use std::path::{Path, PathBuf};

use specflow_core::config::Config;
use specflow_core::templates::TemplateKind;
use specflow_core::{io, paths};

use crate::output::print_json;

/// Scaffolds `.specflow/` (config + templates) and `specs/`. Works in a
/// bare directory or an existing git repo; never overwrites anything.
pub fn run(explicit_root: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let root: PathBuf = match explicit_root {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    io::ensure_dir(&paths::specflow_dir(&root))?;
    io::ensure_dir(&paths::templates_dir(&root))?;
    io::ensure_dir(&paths::specs_dir(&root))?;

    let mut created: Vec<String> = Vec::new();
    let mut existing: Vec<String> = Vec::new();

    if paths::config_path(&root).exists() {
        existing.push(paths::CONFIG_FILE.to_string());
    } else {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        Config::new(name)
            .save(&root)
            .context("failed to write config")?;
        created.push(paths::CONFIG_FILE.to_string());
    }

    for kind in TemplateKind::all() {
        let rel = format!("{}/{}", paths::TEMPLATES_DIR, kind.filename());
        if io::write_if_missing(&kind.path(&root), kind.embedded().as_bytes())? {
            created.push(rel);
        } else {
            existing.push(rel);
        }
    }

    if json {
        print_json(&serde_json::json!({
            "ROOT": root,
            "CREATED": created,
            "EXISTING": existing,
        }))?;
    } else {
        println!("Initialized specflow in {}", root.display());
        for entry in &created {
            println!("  created: {entry}");
        }
        for entry in &existing {
            println!("  exists:  {entry}");
        }
        println!("Next: specflow new \"<feature description>\"");
    }
    Ok(())
}
