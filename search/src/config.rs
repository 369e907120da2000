//! Search configuration.
//!
//! A [`SearchConfig`] is built in code with the `with_*` methods or loaded
//! from a TOML file:
//!
//! ```toml
//! algorithm = "dls"
//! depth_limit = 12
//! max_expansions = 100000
//! deadline_ms = 500
//! check_heuristic = true
//! record_trace = false
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::error::SearchError;

/// Default `max_limit` for IDDFS when none is given.
pub const DEFAULT_IDDFS_MAX_LIMIT: u32 = 64;

/// Configuration error (file loading and parameter validation).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A fully parameterized algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    /// Graph DFS: global closed set, closed at expansion.
    Dfs,
    /// Depth-limited DFS with a path-local explored set.
    Dls { depth_limit: u32 },
    /// DLS repeated with limits `0..=max_limit`.
    Iddfs { max_limit: u32 },
    GreedyBestFirst,
    AStar,
}

impl Algorithm {
    #[must_use]
    pub const fn name(self) -> AlgorithmName {
        match self {
            Self::Bfs => AlgorithmName::Bfs,
            Self::Dfs => AlgorithmName::Dfs,
            Self::Dls { .. } => AlgorithmName::Dls,
            Self::Iddfs { .. } => AlgorithmName::Iddfs,
            Self::GreedyBestFirst => AlgorithmName::GreedyBestFirst,
            Self::AStar => AlgorithmName::AStar,
        }
    }

    /// Whether the algorithm orders its frontier by the adapter heuristic.
    #[must_use]
    pub const fn needs_heuristic(self) -> bool {
        matches!(self, Self::GreedyBestFirst | Self::AStar)
    }

    /// The depth limit (DLS) or maximum limit (IDDFS).
    #[must_use]
    pub const fn depth_limit(self) -> Option<u32> {
        match self {
            Self::Dls { depth_limit } => Some(depth_limit),
            Self::Iddfs { max_limit } => Some(max_limit),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dls { depth_limit } => write!(f, "dls({depth_limit})"),
            Self::Iddfs { max_limit } => write!(f, "iddfs({max_limit})"),
            other => f.write_str(other.name().as_str()),
        }
    }
}

/// Algorithm selector without parameters, as written on the command line or
/// in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmName {
    Bfs,
    Dfs,
    Dls,
    Iddfs,
    GreedyBestFirst,
    AStar,
}

impl AlgorithmName {
    pub const ALL: [Self; 6] = [
        Self::Bfs,
        Self::Dfs,
        Self::Dls,
        Self::Iddfs,
        Self::GreedyBestFirst,
        Self::AStar,
    ];

    /// Canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dls => "dls",
            Self::Iddfs => "iddfs",
            Self::GreedyBestFirst => "greedy",
            Self::AStar => "astar",
        }
    }

    /// Attach a depth limit.
    ///
    /// DLS requires a non-negative limit. IDDFS accepts one and defaults to
    /// [`DEFAULT_IDDFS_MAX_LIMIT`]. Every other algorithm rejects a limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the limit is missing, negative,
    /// out of range, or given to an algorithm that has no depth limit.
    pub fn with_depth_limit(self, depth_limit: Option<i64>) -> Result<Algorithm, ConfigError> {
        let checked = |raw: i64| -> Result<u32, ConfigError> {
            if raw < 0 {
                return Err(ConfigError::Invalid(format!(
                    "depth limit must be non-negative, got {raw}"
                )));
            }
            u32::try_from(raw)
                .map_err(|_| ConfigError::Invalid(format!("depth limit {raw} is out of range")))
        };
        match (self, depth_limit) {
            (Self::Dls, Some(raw)) => Ok(Algorithm::Dls {
                depth_limit: checked(raw)?,
            }),
            (Self::Dls, None) => Err(ConfigError::Invalid(
                "dls requires a depth limit".to_string(),
            )),
            (Self::Iddfs, Some(raw)) => Ok(Algorithm::Iddfs {
                max_limit: checked(raw)?,
            }),
            (Self::Iddfs, None) => Ok(Algorithm::Iddfs {
                max_limit: DEFAULT_IDDFS_MAX_LIMIT,
            }),
            (other, Some(_)) => Err(ConfigError::Invalid(format!(
                "depth limit only applies to dls and iddfs, not {other}"
            ))),
            (Self::Bfs, None) => Ok(Algorithm::Bfs),
            (Self::Dfs, None) => Ok(Algorithm::Dfs),
            (Self::GreedyBestFirst, None) => Ok(Algorithm::GreedyBestFirst),
            (Self::AStar, None) => Ok(Algorithm::AStar),
        }
    }
}

impl fmt::Display for AlgorithmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "dls" => Ok(Self::Dls),
            "iddfs" => Ok(Self::Iddfs),
            "greedy" | "greedy_best_first" | "gbfs" => Ok(Self::GreedyBestFirst),
            "astar" | "a_star" | "a*" => Ok(Self::AStar),
            _ => Err(ConfigError::Invalid(format!("unknown algorithm `{s}`"))),
        }
    }
}

/// Everything one run needs besides the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Node expansions allowed before the run is cut off.
    pub max_expansions: Option<u64>,
    /// Wall-clock budget, checked once per loop iteration.
    pub deadline: Option<Duration>,
    /// Collect heuristic consistency/admissibility diagnostics.
    pub check_heuristic: bool,
    /// Record a [`crate::trace::SearchTrace`] of every expansion.
    pub record_trace: bool,
}

impl SearchConfig {
    /// Config for `algorithm` with no budgets. Heuristic checks follow the
    /// build profile (on in debug builds).
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            max_expansions: None,
            deadline: None,
            check_heuristic: cfg!(debug_assertions),
            record_trace: false,
        }
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn with_check_heuristic(mut self, check_heuristic: bool) -> Self {
        self.check_heuristic = check_heuristic;
        self
    }

    #[must_use]
    pub fn with_record_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Adapter-independent validation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfiguration`] for a zero deadline.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.deadline.is_some_and(|d| d.is_zero()) {
            return Err(SearchError::invalid("deadline must be positive"));
        }
        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, contains invalid TOML, or
    /// describes an invalid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        SearchConfigFile::load(path)?.into_config()
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Same as [`SearchConfig::load`], minus I/O.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        SearchConfigFile::from_toml_str(s)?.into_config()
    }

    /// JSON description used in trace metadata and CLI output.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert(
            "algorithm".into(),
            serde_json::Value::String(self.algorithm.name().as_str().into()),
        );
        if let Some(limit) = self.algorithm.depth_limit() {
            obj.insert("depth_limit".into(), serde_json::json!(limit));
        }
        if let Some(max) = self.max_expansions {
            obj.insert("max_expansions".into(), serde_json::json!(max));
        }
        if let Some(deadline) = self.deadline {
            let ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
            obj.insert("deadline_ms".into(), serde_json::json!(ms));
        }
        obj.insert(
            "check_heuristic".into(),
            serde_json::Value::Bool(self.check_heuristic),
        );
        obj.insert(
            "record_trace".into(),
            serde_json::Value::Bool(self.record_trace),
        );
        serde_json::Value::Object(obj)
    }
}

/// On-disk form of a [`SearchConfig`].
///
/// Every field is optional so command-line flags can fill in or override
/// what the file leaves out before [`SearchConfigFile::into_config`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfigFile {
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub depth_limit: Option<i64>,
    #[serde(default)]
    pub max_expansions: Option<u64>,
    #[serde(default)]
    pub deadline_ms: Option<u64>,
    #[serde(default)]
    pub check_heuristic: Option<bool>,
    #[serde(default)]
    pub record_trace: Option<bool>,
}

impl SearchConfigFile {
    /// Reads a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Validates and converts into a [`SearchConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a missing or unknown algorithm,
    /// a bad depth limit, or a zero deadline.
    pub fn into_config(self) -> Result<SearchConfig, ConfigError> {
        let name: AlgorithmName = self
            .algorithm
            .as_deref()
            .ok_or_else(|| ConfigError::Invalid("algorithm is required".to_string()))?
            .parse()?;
        let mut config = SearchConfig::new(name.with_depth_limit(self.depth_limit)?);
        config.max_expansions = self.max_expansions;
        if let Some(ms) = self.deadline_ms {
            if ms == 0 {
                return Err(ConfigError::Invalid(
                    "deadline_ms must be positive".to_string(),
                ));
            }
            config.deadline = Some(Duration::from_millis(ms));
        }
        if let Some(check) = self.check_heuristic {
            config.check_heuristic = check;
        }
        if let Some(record) = self.record_trace {
            config.record_trace = record;
        }
        Ok(config)
    }
}
