//! Configuration file support

use crate::curve::CurveSettings;
use crate::engine::{Calculator, DEFAULT_MAX_CACHE_SIZE};
use crate::search::{
    DEFAULT_MAX_DELTA, DEFAULT_MIN_DELTA, EpsilonGrid, PolicyKind, SearchPolicy,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the configuration file in the current and home directories
pub const CONFIG_FILE_NAME: &str = ".epsdeltarc";

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tables and colored status lines (default)
    #[default]
    Pretty,
    /// JSON structured output for tooling
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Settings loaded from `~/.epsdeltarc` or `.epsdeltarc`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Default search policy
    #[serde(default)]
    pub policy: PolicyKind,

    /// Candidate count; the policy's own default when absent
    #[serde(default)]
    pub candidates: Option<usize>,

    /// Samples on each side of the point; the policy's own default when absent
    #[serde(default)]
    pub samples_per_side: Option<usize>,

    /// Smallest candidate of the fixed policy
    #[serde(default = "default_min_delta")]
    pub min_delta: f64,

    /// Largest candidate of the fixed policy
    #[serde(default = "default_max_delta")]
    pub max_delta: f64,

    /// Maximum number of cached compiled expressions
    #[serde(default = "default_cache_size")]
    pub max_cache_size: usize,

    /// Default output format
    #[serde(default)]
    pub output_format: Option<OutputFormat>,

    /// Disable colored output by default
    #[serde(default)]
    pub no_color: bool,

    /// Enable quiet mode by default
    #[serde(default)]
    pub quiet: bool,

    /// Enable verbose mode by default
    #[serde(default)]
    pub verbose: bool,

    /// Display curve layout
    #[serde(default)]
    pub curve: CurveSettings,

    /// Default epsilon grid for sweeps
    #[serde(default)]
    pub sweep: EpsilonGrid,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            candidates: None,
            samples_per_side: None,
            min_delta: DEFAULT_MIN_DELTA,
            max_delta: DEFAULT_MAX_DELTA,
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            output_format: None,
            no_color: false,
            quiet: false,
            verbose: false,
            curve: CurveSettings::default(),
            sweep: EpsilonGrid::default(),
        }
    }
}

fn default_min_delta() -> f64 {
    DEFAULT_MIN_DELTA
}

fn default_max_delta() -> f64 {
    DEFAULT_MAX_DELTA
}

fn default_cache_size() -> usize {
    DEFAULT_MAX_CACHE_SIZE
}

impl CalculatorConfig {
    /// Load configuration from standard locations
    ///
    /// Search order:
    /// 1. ./.epsdeltarc (current directory)
    /// 2. ~/.epsdeltarc (home directory)
    /// 3. ~/.config/epsdelta/config.toml
    pub fn load() -> anyhow::Result<Self> {
        for path in Self::search_paths() {
            if path.exists() {
                log::debug!("loading configuration from {}", path.display());
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Candidate configuration locations, in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE_NAME));
            paths.push(home.join(".config").join("epsdelta").join("config.toml"));
        }
        paths
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid configuration in {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Write a new configuration file, refusing to replace an existing one
    pub fn create_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        self.save_to_file(path)
    }

    /// Get default config file path (user's home directory)
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// The search policy these settings describe
    pub fn search_policy(&self) -> SearchPolicy {
        let mut policy = match self.policy {
            PolicyKind::Bounded => SearchPolicy::bounded(),
            PolicyKind::Fixed => SearchPolicy::FixedRange {
                min_delta: self.min_delta,
                max_delta: self.max_delta,
                candidates: SearchPolicy::fixed().candidate_count(),
                samples_per_side: SearchPolicy::fixed().samples_per_side(),
            },
        };
        if let Some(candidates) = self.candidates {
            policy = policy.with_candidates(candidates);
        }
        if let Some(samples) = self.samples_per_side {
            policy = policy.with_samples_per_side(samples);
        }
        policy
    }

    /// Build a calculator from these settings
    pub fn calculator(&self) -> crate::Result<Calculator> {
        Ok(Calculator::new()
            .with_policy(self.search_policy())?
            .with_curve_settings(self.curve)?
            .with_max_cache_size(self.max_cache_size))
    }

    /// Create a sample configuration file with helpful comments
    pub fn sample_config() -> String {
        r#"# epsdelta configuration
# This file can be placed at:
#   - ./.epsdeltarc (current directory)
#   - ~/.epsdeltarc (home directory)
#   - ~/.config/epsdelta/config.toml

# Delta search policy (bounded, fixed)
#   bounded: candidates spread over [eps/2, 2*eps]
#   fixed:   candidates spread over [min_delta, max_delta]
policy = "bounded"

# Candidate deltas and samples on each side of the point.
# Leave unset to use the policy defaults (500 or 10000 candidates, 50 samples).
# candidates = 500
# samples_per_side = 50

# Candidate range of the fixed policy
min_delta = 0.00001
max_delta = 2.0

# Maximum number of compiled expressions kept in memory
max_cache_size = 256

# Default output format (pretty, json)
output_format = "pretty"

# Disable colored output
no_color = false

# Enable quiet mode (suppress informational messages)
quiet = false

# Enable verbose mode
verbose = false

# Display curve sampled around the point
[curve]
half_width = 3.0
points = 1200

# Epsilons used by the sweep command
[sweep]
from = 0.01
to = 2.0
steps = 30
"#
        .to_string()
    }
}
