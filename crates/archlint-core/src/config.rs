//! Configuration types for archlint.
//!
//! Each rule receives a loosely-typed [`RuleOptions`] bag and decodes it into
//! its own typed configuration with [`decode_options`]. The engine-level
//! [`EngineOptions`] decides which rules run and which bag each receives; it
//! can be loaded from a rule-set file via [`RuleSetFile`].

use miette::Diagnostic;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::{Finding, Severity};

/// Loosely-typed per-rule configuration.
pub type RuleOptions = Map<String, Value>;

/// Error decoding a [`RuleOptions`] bag into a rule's configuration.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct OptionsError(#[from] serde_json::Error);

/// Decodes an options bag into a typed rule configuration.
///
/// `T` should carry `#[serde(default)]` so keys absent from the bag keep
/// their compiled-in defaults. Unknown keys are ignored.
///
/// # Errors
///
/// Returns an error if a present key has the wrong shape.
pub fn decode_options<T>(options: &RuleOptions) -> Result<T, OptionsError>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::Object(options.clone()))?)
}

/// Builds the finding a rule reports when its options cannot be decoded.
#[must_use]
pub fn options_finding(rule_id: &str, err: &OptionsError) -> Finding {
    Finding::new(
        rule_id,
        Severity::Error,
        format!("options.ruleConfig[{rule_id}]"),
        format!("invalid rule configuration: {err}"),
    )
}

/// Engine-level options: which rules run, and with which configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    /// Explicit allow-list of rule identifiers. Empty runs every rule.
    #[serde(default)]
    pub enabled_rules: Vec<String>,
    /// Per-rule configuration bags keyed by rule identifier.
    #[serde(default)]
    pub rule_config: HashMap<String, RuleOptions>,
}

impl EngineOptions {
    /// Creates options that run every rule with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the run to the given rule identifiers.
    #[must_use]
    pub fn enable<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_rules.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration bag for one rule.
    #[must_use]
    pub fn configure(mut self, rule_id: impl Into<String>, options: RuleOptions) -> Self {
        self.rule_config.insert(rule_id.into(), options);
        self
    }

    /// Returns the configuration bag for a rule, if one was supplied.
    #[must_use]
    pub fn rule_options(&self, rule_id: &str) -> Option<&RuleOptions> {
        self.rule_config.get(rule_id)
    }
}

/// Rule-set file layout.
///
/// ```yaml
/// rules:
///   - id: ARCH-ACL
///     config:
///       allowedTags: [acl, edge]
///   - id: ARCH-CRUD
///     enabled: false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSetFile {
    /// Rule entries, in file order.
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// A single rule entry in a [`RuleSetFile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Rule identifier.
    #[serde(default)]
    pub id: String,
    /// Whether the rule runs (default: true).
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Rule-specific options. Absent leaves the rule's defaults untouched.
    #[serde(default)]
    pub config: Option<RuleOptions>,
}

impl RuleSetFile {
    /// Loads a rule-set file, choosing the format by extension
    /// (`.yaml`/`.yml` or `.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::parse_yaml(&content),
            Some("toml") => Self::parse_toml(&content),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parses a rule-set from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Parses a rule-set from TOML (`[[rules]]` tables).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Converts the file into engine options.
    ///
    /// Entries with `enabled: false` are dropped; the rest form the
    /// allow-list in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has no `id`.
    pub fn into_options(self) -> Result<EngineOptions, ConfigError> {
        let mut options = EngineOptions::default();
        for (index, entry) in self.rules.into_iter().enumerate() {
            if entry.id.is_empty() {
                return Err(ConfigError::MissingId { index });
            }
            if entry.enabled == Some(false) {
                tracing::debug!("Rule {} disabled by rule-set file", entry.id);
                continue;
            }
            if let Some(config) = entry.config {
                options.rule_config.insert(entry.id.clone(), config);
            }
            options.enabled_rules.push(entry.id);
        }
        Ok(options)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(archlint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(archlint::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule entry has no identifier.
    #[error("config rules[{index}]: id is required")]
    #[diagnostic(code(archlint::config::missing_id))]
    MissingId {
        /// Position of the offending entry.
        index: usize,
    },

    /// The file extension does not name a known format.
    #[error("Unsupported config format: {path}")]
    #[diagnostic(
        code(archlint::config::format),
        help("use a .yaml, .yml, or .toml file")
    )]
    UnsupportedFormat {
        /// Path with the unsupported extension.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(default, rename_all = "camelCase")]
    struct SampleConfig {
        allowed_tags: Vec<String>,
        limit: i64,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self {
                allowed_tags: vec!["acl".into()],
                limit: 3,
            }
        }
    }

    fn bag(value: Value) -> RuleOptions {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn empty_bag_keeps_defaults() {
        let conf: SampleConfig = decode_options(&RuleOptions::new()).unwrap();
        assert_eq!(conf, SampleConfig::default());
    }

    #[test]
    fn present_keys_override_defaults() {
        let conf: SampleConfig = decode_options(&bag(json!({"limit": 7, "extra": true}))).unwrap();
        assert_eq!(conf.limit, 7);
        assert_eq!(conf.allowed_tags, vec!["acl"]);
    }

    #[test]
    fn wrong_shape_yields_options_finding() {
        let err = decode_options::<SampleConfig>(&bag(json!({"allowedTags": "acl"}))).unwrap_err();
        let finding = options_finding("ARCH-ACL", &err);
        assert_eq!(finding.path, "options.ruleConfig[ARCH-ACL]");
        assert_eq!(finding.severity, Severity::Error);
        assert!(finding.message.starts_with("invalid rule configuration: "));
    }

    #[test]
    fn yaml_rule_set_into_options() {
        let yaml = r#"
rules:
  - id: ARCH-ACL
    enabled: true
    config:
      allowedTags: ["acl", "edge"]
  - id: ARCH-CRUD
    enabled: false
  - id: ARCH-ACYCLIC
"#;
        let options = RuleSetFile::parse_yaml(yaml)
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(options.enabled_rules, vec!["ARCH-ACL", "ARCH-ACYCLIC"]);
        assert_eq!(
            options.rule_options("ARCH-ACL").unwrap()["allowedTags"],
            json!(["acl", "edge"])
        );
        assert!(options.rule_options("ARCH-ACYCLIC").is_none());
        assert!(options.rule_options("ARCH-CRUD").is_none());
    }

    #[test]
    fn toml_rule_set_into_options() {
        let toml = r#"
[[rules]]
id = "ARCH-BOUNDARIES"
config = { minInternalToCrossRatio = 0.5, maxCrossRelations = 4 }
"#;
        let options = RuleSetFile::parse_toml(toml)
            .unwrap()
            .into_options()
            .unwrap();
        let conf = options.rule_options("ARCH-BOUNDARIES").unwrap();
        assert_eq!(conf["minInternalToCrossRatio"], json!(0.5));
        assert_eq!(conf["maxCrossRelations"], json!(4));
    }

    #[test]
    fn missing_id_rejected() {
        let file = RuleSetFile::parse_yaml("rules:\n  - enabled: true\n").unwrap();
        assert!(matches!(
            file.into_options(),
            Err(ConfigError::MissingId { index: 0 })
        ));
    }

    #[test]
    fn from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("rules.yaml");
        std::fs::write(&yaml, "rules:\n  - id: ARCH-ACL\n").unwrap();
        assert_eq!(RuleSetFile::from_file(&yaml).unwrap().rules.len(), 1);

        let ini = dir.path().join("rules.ini");
        std::fs::write(&ini, "").unwrap();
        assert!(matches!(
            RuleSetFile::from_file(&ini),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn builder_helpers() {
        let options = EngineOptions::new()
            .enable(["ARCH-ACL"])
            .configure("ARCH-ACL", bag(json!({"allowedTags": ["edge"]})));
        assert_eq!(options.enabled_rules, vec!["ARCH-ACL"]);
        assert!(options.rule_options("ARCH-ACL").is_some());
    }
}
