use likeness_core::{MatchPolicy, QualitySource};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_WORKERS: usize = 4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// CLI configuration: a policy file (optional) plus `LIKENESS_*` overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub policy: MatchPolicy,
    /// Number of shards a batch is split into.
    pub workers: usize,
}

impl Config {
    /// Load from `path` (or `LIKENESS_CONFIG`), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var("LIKENESS_CONFIG").ok().map(PathBuf::from);
        let policy = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => {
                let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                let policy = parse_policy(&text).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), "loaded policy file");
                policy
            }
            None => MatchPolicy::default(),
        };

        let mut config = Self {
            policy,
            workers: DEFAULT_WORKERS,
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_bool("LIKENESS_USE_CONFIDENCE_IN_DECISION")? {
            self.policy.decision.use_confidence_in_decision = v;
        }
        if let Ok(v) = std::env::var("LIKENESS_QUALITY_SOURCE") {
            self.policy.quality_source = v
                .parse::<QualitySource>()
                .map_err(ConfigError::Invalid)?;
        }
        if let Some(v) = env_usize("LIKENESS_WORKERS")? {
            self.workers = v;
        }
        Ok(())
    }

    /// Replace the worker count (e.g. from a command-line flag) and re-validate.
    pub fn with_workers(mut self, workers: Option<usize>) -> Result<Self, ConfigError> {
        if let Some(workers) = workers {
            self.workers = workers;
            self.validate()?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let bad = self.policy.non_finite_fields();
        if !bad.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "non-finite thresholds: {}",
                bad.join(", ")
            )));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        Ok(())
    }
}

/// Parse a TOML policy; omitted sections and fields keep their defaults.
pub fn parse_policy(text: &str) -> Result<MatchPolicy, toml::de::Error> {
    toml::from_str(text)
}

/// Unset is `None`; a set but unparseable value is an error.
fn env_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| {
                ConfigError::Invalid(format!("{key}: expected a non-negative integer, got {v:?}"))
            }),
        Err(_) => Ok(None),
    }
}

fn env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match std::env::var(key) {
        Ok(v) => parse_bool(&v).map(Some).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "{key}: expected 1/true/yes or 0/false/no, got {v:?}"
            ))
        }),
        Err(_) => Ok(None),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
