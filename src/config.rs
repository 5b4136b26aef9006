//! Generator configuration.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. JSON config file (`~/.p8/synth.json` or an explicit path)
//! 3. Environment variables (`P8_SYNTH_DIMENSION`, `P8_SYNTH_SEED`, `P8_SYNTH_MAX_ATTEMPTS`)
//! 4. CLI flags (applied by the `synth` binary)

use crate::generator::{SolverConfig, DEFAULT_MAX_ATTEMPTS};
use crate::linalg::DEFAULT_INDEPENDENCE_TOLERANCE;
use crate::types::{Result, SynthError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "~/.p8/synth.json";

/// Environment variable for the default dimension.
pub const ENV_DIMENSION: &str = "P8_SYNTH_DIMENSION";

/// Environment variable for the RNG seed.
pub const ENV_SEED: &str = "P8_SYNTH_SEED";

/// Environment variable for the score solver retry budget.
pub const ENV_MAX_ATTEMPTS: &str = "P8_SYNTH_MAX_ATTEMPTS";

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Default vector dimension when a command does not give one.
    pub dimension: usize,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Score solver retry budget.
    pub max_attempts: usize,

    /// Relative tolerance for independence checks.
    pub independence_tolerance: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dimension: 3,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            independence_tolerance: DEFAULT_INDEPENDENCE_TOLERANCE,
        }
    }
}

impl GeneratorConfig {
    /// Expand `~` and environment references in a path.
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        shellexpand::full(path)
            .map(|p| PathBuf::from(p.as_ref()))
            .map_err(|e| SynthError::config(format!("Cannot expand path '{}': {}", path, e)))
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::IoError` if the file cannot be read, or
    /// `SynthError::ConfigError` if it is not valid config JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            SynthError::config(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    /// Load from `path` if given, else from the default location if it exists, else defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(&Self::expand_path(p)?),
            None => {
                let default_path = Self::expand_path(DEFAULT_CONFIG_PATH)?;
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Apply overrides from process environment variables.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::ConfigError` if a set variable does not parse
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dimension) = parse_var(&lookup, ENV_DIMENSION)? {
            self.dimension = dimension;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            self.seed = Some(seed);
        }
        if let Some(max_attempts) = parse_var(&lookup, ENV_MAX_ATTEMPTS)? {
            self.max_attempts = max_attempts;
        }
        Ok(self)
    }

    /// Check values are usable.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::ConfigError` for a zero dimension, a zero retry
    /// budget, or a tolerance outside (0, 1)
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(SynthError::config("dimension must be > 0"));
        }
        if self.max_attempts == 0 {
            return Err(SynthError::config("max_attempts must be > 0"));
        }
        if !(self.independence_tolerance > 0.0 && self.independence_tolerance < 1.0) {
            return Err(SynthError::config(format!(
                "independence_tolerance must be in (0, 1), got {}",
                self.independence_tolerance
            )));
        }
        Ok(())
    }

    /// Solver parameters derived from this config.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_attempts: self.max_attempts,
            tolerance: self.independence_tolerance,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| SynthError::config(format!("{}='{}': {}", key, raw, e))),
        None => Ok(None),
    }
}
