//! Configuration management for mohair.
//!
//! Provides configuration for the partition domain, the delimited-text loader,
//! the extension relation encoder, and the plan writer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use common_error::MohairResult;

/// Global mohair configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MohairConfig {
    /// Domain configuration.
    pub domain: DomainConfig,
    /// Loader configuration.
    pub loader: LoaderConfig,
    /// Encoder configuration.
    pub encoder: EncoderConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl MohairConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> MohairResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> MohairResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Domain configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Namespace key of the domain partitions are minted from.
    pub key: String,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            key: "public".to_string(),
        }
    }
}

/// Delimited-text loader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum number of rows per partition slice.
    pub max_slice_rows: usize,
    /// Field delimiter. `None` splits on runs of whitespace.
    pub delimiter: Option<char>,
    /// Whether the first line is a header.
    pub has_header: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_slice_rows: 5,
            delimiter: None,
            has_header: true,
        }
    }
}

/// How the encoder treats a partition whose slice collection is present but
/// holds no slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmptySlicePolicy {
    /// Encode a zero-slice partition with an empty `slices` list.
    #[default]
    Allow,
    /// Fail with `EmptyPartition`.
    Reject,
}

/// Extension relation encoder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Policy for present-but-empty slice collections.
    pub empty_slices: EmptySlicePolicy,
}

/// Plan output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path the serialized plan is written to.
    pub plan_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plan_path: "average-expression.substrait".to_string(),
        }
    }
}
