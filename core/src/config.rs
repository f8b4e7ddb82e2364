use config::{Config, ConfigError, Environment, File, FileFormat, FileSourceFile};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "linkprep.toml";
pub const ENV_PREFIX: &str = "LINKPREP";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub abstracts_file: String,
    pub authors_file: String,
    pub edges_file: String,
    /// Separates the discarded row index from the payload in abstracts/authors.
    pub field_separator: String,
    pub edge_delimiter: String,
    pub author_delimiter: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            abstracts_file: "abstracts.txt".to_string(),
            authors_file: "authors.txt".to_string(),
            edges_file: "edgelist.txt".to_string(),
            field_separator: "|--|".to_string(),
            edge_delimiter: ",".to_string(),
            author_delimiter: ",".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelfLoopPolicy {
    /// A `u,u` line is a malformed edge.
    #[default]
    Reject,
    /// A `u,u` line is dropped with a warning.
    Skip,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelfPairPolicy {
    /// A drawn `(u, u)` is discarded and counts against the slot's retry budget.
    #[default]
    Reject,
    /// A drawn `(u, u)` is a valid negative since self-loops are never edges.
    Accept,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    pub self_loops: SelfLoopPolicy,
    /// Every node id must be an endpoint of at least one edge.
    pub require_edge_coverage: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            self_loops: SelfLoopPolicy::Reject,
            require_edge_coverage: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    pub dev_ratio: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            dev_ratio: 0.2,
            seed: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SamplerConfig {
    pub max_retries_per_slot: u32,
    pub self_pairs: SelfPairPolicy,
    /// Slot interval between progress log lines; 0 disables them.
    pub log_every: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_retries_per_slot: 10_000,
            self_pairs: SelfPairPolicy::Reject,
            log_every: 100_000,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "nullptr".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event with an RFC 3339 UTC timestamp.
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PrepConfig {
    pub logging: LoggingConfig,
    pub input: InputConfig,
    pub graph: GraphConfig,
    pub split: SplitConfig,
    pub sampler: SamplerConfig,
    pub output: OutputConfig,
}

impl PrepConfig {
    /// Layered load: defaults, then the config file (optional unless given
    /// explicitly), then `LINKPREP_*` environment variables.
    ///
    /// The result is not validated; callers apply their own overrides first
    /// and then call [`PrepConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::load_from(file, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(
        file: File<FileSourceFile, FileFormat>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(file)
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true));

        let config: PrepConfig = builder.build()?.try_deserialize()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = self.split.dev_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(ConfigError::Message(format!(
                "split.dev_ratio must be in (0, 1), got {}",
                ratio
            )));
        }
        if self.sampler.max_retries_per_slot == 0 {
            return Err(ConfigError::Message(
                "sampler.max_retries_per_slot must be at least 1".to_string(),
            ));
        }
        for (key, value) in [
            ("input.field_separator", &self.input.field_separator),
            ("input.edge_delimiter", &self.input.edge_delimiter),
            ("input.author_delimiter", &self.input.author_delimiter),
            ("output.prefix", &self.output.prefix),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Message(format!("{} must not be empty", key)));
            }
        }
        Ok(())
    }
}
