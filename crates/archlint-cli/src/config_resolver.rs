//! Rule-set file discovery.
//!
//! An explicit `--config` path is used as given. Otherwise the first existing
//! file among these candidates wins:
//!
//! 1. `archlint.yaml`, `.archlint.yaml`, `archlint.toml` in the directory of
//!    the architecture file
//! 2. `config.yaml` in `$ARCHLINT_CONFIG_DIR`, or `~/.archlint/` when unset
//!
//! Finding nothing means every rule runs with its defaults.

use std::path::{Path, PathBuf};

/// Rule-set names looked up next to the architecture file, in order.
const PROJECT_FILES: &[&str] = &["archlint.yaml", ".archlint.yaml", "archlint.toml"];

/// Rule-set name inside the global directory.
const GLOBAL_FILE: &str = "config.yaml";

/// How a rule-set file was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Passed with `--config`.
    Flag,
    /// Sits next to the architecture file.
    Project,
    /// Lives in the global config directory.
    Global,
}

/// A located rule-set file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSetSource {
    /// How the file was found.
    pub origin: Origin,
    /// Path to the file.
    pub path: PathBuf,
}

/// Locates the rule set for `architecture_file`.
#[must_use]
pub fn resolve(architecture_file: &Path, explicit: Option<&Path>) -> Option<RuleSetSource> {
    Search::new(architecture_file, global_config_dir()).locate(explicit)
}

/// The global config directory: `$ARCHLINT_CONFIG_DIR`, else `~/.archlint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("ARCHLINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".archlint")))
}

struct Search {
    project_dir: PathBuf,
    global_dir: Option<PathBuf>,
}

impl Search {
    fn new(architecture_file: &Path, global_dir: Option<PathBuf>) -> Self {
        let project_dir = match architecture_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            project_dir,
            global_dir,
        }
    }

    fn candidates(&self) -> impl Iterator<Item = RuleSetSource> + '_ {
        let project = PROJECT_FILES.iter().map(|name| RuleSetSource {
            origin: Origin::Project,
            path: self.project_dir.join(name),
        });
        let global = self.global_dir.iter().map(|dir| RuleSetSource {
            origin: Origin::Global,
            path: dir.join(GLOBAL_FILE),
        });
        project.chain(global)
    }

    fn locate(&self, explicit: Option<&Path>) -> Option<RuleSetSource> {
        if let Some(path) = explicit {
            return Some(RuleSetSource {
                origin: Origin::Flag,
                path: path.to_path_buf(),
            });
        }

        let found = self.candidates().find(|c| c.path.is_file());
        match &found {
            Some(source) => {
                tracing::debug!("Rule set ({:?}): {}", source.origin, source.path.display());
            }
            None => tracing::debug!("No rule set found, running every rule with defaults"),
        }
        found
    }
}
