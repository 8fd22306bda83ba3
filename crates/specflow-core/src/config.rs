//! Project configuration stored at `.specflow/config.yaml`.
//!
//! Written by `specflow init`, read by the sync driver. The file is
//! optional: a repository that never ran `init` behaves as if a default
//! config derived from the root directory name were present.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::io;
use crate::paths;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    /// Agent whose context file `sync` creates when none exist yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
            },
            default_agent: None,
        }
    }

    /// Reads the config file, or `None` when it does not exist.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(Some(cfg))
    }

    /// Like [`load`](Self::load), but a missing file yields a default
    /// config named after the root directory.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root)? {
            Some(cfg) => Ok(cfg),
            None => {
                let name = root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "project".to_string());
                Ok(Config::new(name))
            }
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(&path, data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip_through_yaml() {
        let cfg = Config::new("test-project");
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.project.name, "test-project");
        assert_eq!(parsed.version, 1);
        assert!(parsed.default_agent.is_none());
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = Config::new("demo");
        cfg.default_agent = Some("gemini".to_string());
        cfg.save(tmp.path()).unwrap();

        let loaded = Config::load(tmp.path()).unwrap().unwrap();
        assert_eq!(loaded.project.name, "demo");
        assert_eq!(loaded.default_agent.as_deref(), Some("gemini"));
    }

    #[test]
    fn load_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(Config::load(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn load_or_default_uses_directory_name() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("my-app");
        std::fs::create_dir(&root).unwrap();
        let cfg = Config::load_or_default(&root).unwrap();
        assert_eq!(cfg.project.name, "my-app");
    }

    #[test]
    fn default_agent_not_serialized_when_none() {
        let cfg = Config::new("test");
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(!yaml.contains("default_agent"));
    }

    #[test]
    fn minimal_yaml_deserializes() {
        let yaml = "project:\n  name: bare\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.project.name, "bare");
    }
}
