use std::path::{Path, PathBuf};
use anyhow::{Result, Context, bail};
use log::debug;
use serde::{Serialize, Deserialize};

use crate::report::OutputFormat;
use crate::scan::{CodepointRange, ScanOptions};
use crate::utils::codepoint::{MAX_CODEPOINT, format_codepoint};
use crate::utils::file_utils;

/// Scan configuration, loadable from TOML and overridable from the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Path to the `UnicodeData.txt` snapshot
    pub ucd_path: Option<PathBuf>,

    /// Version label of the snapshot
    pub unicode_version: String,

    /// First codepoint to scan
    pub first: u32,

    /// Last codepoint to scan, inclusive
    pub last: u32,

    /// Scan shards on a thread pool
    pub parallel: bool,

    /// Number of parallel threads to use for scanning
    pub parallel_threads: Option<usize>,

    /// Codepoints per shard
    pub shard_size: u32,

    /// Draw a progress bar on stderr
    pub progress: bool,

    /// Report format
    pub format: OutputFormat,

    /// List single-word names of codepoints below this one
    pub single_word_below: Option<u32>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ucd_path: None,
            unicode_version: "unknown".to_string(),
            first: 0x20,
            last: MAX_CODEPOINT,
            parallel: false,
            parallel_threads: None,
            shard_size: ScanOptions::default().shard_size,
            progress: false,
            format: OutputFormat::Text,
            single_word_below: None,
        }
    }
}

impl ScanConfig {
    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = file_utils::read_file_to_string(path)?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid configuration")?;
        Ok(config)
    }

    /// Check that the configuration describes a scan that can run
    pub fn validate(&self) -> Result<()> {
        if self.first > MAX_CODEPOINT || self.last > MAX_CODEPOINT {
            bail!(
                "Scan range {}..{} exceeds {}",
                format_codepoint(self.first),
                format_codepoint(self.last),
                format_codepoint(MAX_CODEPOINT)
            );
        }
        if self.first > self.last {
            bail!(
                "Scan range is inverted: first {} is after last {}",
                format_codepoint(self.first),
                format_codepoint(self.last)
            );
        }
        if self.shard_size == 0 {
            bail!("Shard size must be at least 1");
        }
        if self.parallel_threads == Some(0) {
            bail!("Thread count must be at least 1");
        }
        if let Some(cutoff) = self.single_word_below {
            if cutoff > MAX_CODEPOINT {
                bail!("Single word cutoff {} exceeds {}", format_codepoint(cutoff), format_codepoint(MAX_CODEPOINT));
            }
        }
        Ok(())
    }

    /// The range to scan
    pub fn range(&self) -> CodepointRange {
        CodepointRange::new(self.first, self.last)
    }

    /// Scanner options derived from this configuration
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            parallel: self.parallel,
            parallel_threads: self.parallel_threads,
            shard_size: self.shard_size,
            show_progress: self.progress,
        }
    }
}
