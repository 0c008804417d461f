use marjapussi_bot::PolicyKind;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_GAME_VALUE: u32 = 120;
const GAME_VALUE_STEP: u32 = 5;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root benchmark configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub deals: DealConfig,
    pub policies: PoliciesConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BenchmarkConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.deals.validate()?;
        self.policies.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Deal sampling configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealConfig {
    pub seed: Option<u64>,
    pub games: usize,
    #[serde(default = "default_game_value")]
    pub game_value: u32,
}

impl DealConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.games == 0 {
            return Err(ValidationError::InvalidField {
                field: "deals.games".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        if self.game_value < DEFAULT_GAME_VALUE || self.game_value % GAME_VALUE_STEP != 0 {
            return Err(ValidationError::InvalidField {
                field: "deals.game_value".to_string(),
                message: format!(
                    "game value must be at least {DEFAULT_GAME_VALUE} and a multiple of {GAME_VALUE_STEP}"
                ),
            });
        }

        Ok(())
    }
}

fn default_game_value() -> u32 {
    DEFAULT_GAME_VALUE
}

/// The two competing policies: `a` sits North/South, `b` East/West.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PoliciesConfig {
    pub a: PolicyConfig,
    pub b: PolicyConfig,
}

impl PoliciesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.a.validate("policies.a")?;
        self.b.validate("policies.b")?;
        if self.a.name == self.b.name {
            return Err(ValidationError::InvalidField {
                field: "policies".to_string(),
                message: format!("policy name '{}' used for both sides", self.a.name),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PolicyConfig {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PolicyConfig {
    pub fn policy_kind(&self) -> Result<PolicyKind, ValidationError> {
        self.kind
            .parse::<PolicyKind>()
            .map_err(|err| ValidationError::InvalidField {
                field: format!("policies[{}].kind", self.name),
                message: err.to_string(),
            })
    }

    fn validate(&self, label: &str) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("{label}.name"),
                message: "policy name must not be empty".to_string(),
            });
        }

        if !self.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("{label}.name"),
                message: "policy name contains invalid characters".to_string(),
            });
        }

        self.policy_kind().map(|_| ())
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "random_vs_standing"
deals:
  seed: 123
  games: 40
policies:
  a:
    name: "random"
    kind: "random"
    seed: 7
  b:
    name: "standing"
    kind: "standing"
outputs:
  jsonl: "bench/out/{run_id}/deals.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.deals.game_value, DEFAULT_GAME_VALUE);
        assert_eq!(cfg.policies.a.seed, Some(7));
        assert_eq!(cfg.policies.b.policy_kind().unwrap(), PolicyKind::Standing);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("bench/out/random_vs_standing/deals.jsonl")
        );
    }

    #[test]
    fn logging_block_is_optional() {
        let yaml = BASIC_YAML.replace(
            "logging:\n  enable_structured: true\n  tracing_level: \"debug\"\n",
            "",
        );
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        assert!(!cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::INFO));
    }

    #[test]
    fn rejects_unknown_policy_kind() {
        let yaml = BASIC_YAML.replace("kind: \"standing\"", "kind: \"oracle\"");
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("unknown kind");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "policies[standing].kind"
        ));
    }

    #[test]
    fn rejects_same_name_on_both_sides() {
        let yaml = BASIC_YAML.replace("name: \"standing\"", "name: \"random\"");
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("duplicate names");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "policies"
        ));
    }

    #[test]
    fn rejects_zero_games_and_odd_game_values() {
        let yaml = BASIC_YAML.replace("games: 40", "games: 0");
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidField { field, .. }) if field == "deals.games"
        ));

        let yaml = BASIC_YAML.replace("games: 40", "games: 40\n  game_value: 123");
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidField { field, .. }) if field == "deals.game_value"
        ));
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("random_vs_standing", "random vs standing");
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = BenchmarkConfig::from_path("does/not/exist.yaml").expect_err("missing");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), Path::new("does/not/exist.yaml"));
    }
}
