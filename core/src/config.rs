//! Generator configuration.
//!
//! Defines the YAML-serializable configuration shared by the extraction and
//! generation stages. Every field has a default, so a missing file or a
//! partial file is valid.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! binary: docker
//! schema_path: metadata.json
//! output_dir: generated
//! extraction:
//!   timeout_ms: 5000
//!   jobs: 1
//!   strict: false
//!   multi_value: repeated
//! generation:
//!   root_type: Docker
//!   runtime_path: helpwrap_core::runtime
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mapping::MultiValuePolicy;
use crate::naming;

/// Default per-scrape timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Semantically invalid value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the extraction stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Upper bound for one `--help` invocation.
    pub timeout_ms: u64,
    /// Number of sibling scrapes run concurrently (1 = sequential).
    pub jobs: usize,
    /// Treat help text without a usage line or without any entries as an error.
    pub strict: bool,
    /// Rendering policy for repeatable flags.
    pub multi_value: MultiValuePolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            jobs: 1,
            strict: false,
            multi_value: MultiValuePolicy::default(),
        }
    }
}

/// Settings for the code generation stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Name of the root wrapper type; derived from the binary when unset.
    pub root_type: Option<String>,
    /// Module path generated code imports `CommandLine` and `Runner` from.
    pub runtime_path: Option<String>,
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use helpwrap_core::HelpwrapConfig;
///
/// let config: HelpwrapConfig = serde_yaml::from_str("binary: podman\n").unwrap();
/// assert_eq!(config.binary, "podman");
/// assert_eq!(config.root_type(), "Podman");
/// assert_eq!(config.extraction.jobs, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpwrapConfig {
    /// Configuration format version.
    pub version: String,
    /// Executable whose help output is scraped.
    pub binary: String,
    /// Where the schema document is written and read.
    pub schema_path: PathBuf,
    /// Directory receiving generated modules.
    pub output_dir: PathBuf,
    pub extraction: ExtractionConfig,
    pub generation: GenerationConfig,
}

impl Default for HelpwrapConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            binary: "docker".to_string(),
            schema_path: PathBuf::from("metadata.json"),
            output_dir: PathBuf::from("generated"),
            extraction: ExtractionConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl HelpwrapConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if parsing fails, or [`ConfigError::Invalid`]
    /// if a value is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.check()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks value ranges.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.binary.trim().is_empty() {
            return Err(ConfigError::Invalid("binary cannot be empty".to_string()));
        }
        if self.extraction.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "extraction.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.extraction.jobs == 0 {
            return Err(ConfigError::Invalid(
                "extraction.jobs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Root wrapper type name (`docker` → `Docker`).
    pub fn root_type(&self) -> String {
        self.generation
            .root_type
            .clone()
            .unwrap_or_else(|| naming::type_name(&self.binary))
    }

    /// Module path of the runtime used by generated code.
    pub fn runtime_path(&self) -> String {
        self.generation
            .runtime_path
            .clone()
            .unwrap_or_else(|| "helpwrap_core::runtime".to_string())
    }
}
