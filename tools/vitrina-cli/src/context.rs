//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;
use vitrina_commerce::Storefront;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some(path) => {
                    let config = CliConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (CliConfig::default(), None),
            }
        };
        debug!(path = ?config_path, "configuration loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative config entries are resolved against.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map(|dir| self.resolve_path(&dir.to_string_lossy()))
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Build a fresh storefront from the configuration.
    pub fn storefront(&self) -> Result<Storefront> {
        let catalog = self
            .config
            .catalog
            .load(&self.config_dir(), self.config.store.currency)?;
        Storefront::new(self.config.store.clone(), catalog).context("Invalid store configuration")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_commerce::catalog::ProductCatalog;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vitrina-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = scratch_dir("walk");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".vitrina.toml"), "").unwrap();

        let found = Context::find_config(&nested).unwrap();
        assert_eq!(found, root.join(".vitrina.toml"));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let root = scratch_dir("prefer");
        std::fs::write(root.join("vitrina.json"), "{}").unwrap();
        std::fs::write(root.join("vitrina.toml"), "").unwrap();

        let found = Context::find_config(&root).unwrap();
        assert_eq!(found, root.join("vitrina.toml"));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_default_context_builds_sample_storefront() {
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
        };
        let store = ctx.storefront().unwrap();
        assert_eq!(store.catalog().products().len(), 6);
    }
}
