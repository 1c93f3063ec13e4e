//! Loader for the Unicode Character Database `UnicodeData.txt` format.
//!
//! Each line holds semicolon-separated fields; only the first two (the hex
//! codepoint and its name) are used. Large blocks are listed as a pair of
//! `<Block, First>` / `<Block, Last>` lines, and every codepoint between the
//! two is named `<Block>`.

use std::path::{Path, PathBuf};
use anyhow::{Result, Context, bail, anyhow};
use log::{info, debug, trace, warn};

use crate::utils::codepoint::{MAX_CODEPOINT, format_codepoint};
use crate::utils::{file_utils, hash_utils};
use super::{DatasetInfo, NameTable};

const RANGE_FIRST_SUFFIX: &str = ", First>";
const RANGE_LAST_SUFFIX: &str = ", Last>";

/// Loads a name table from a `UnicodeData.txt` snapshot on disk
#[derive(Debug)]
pub struct UcdLoader {
    /// Path to the `UnicodeData.txt` file
    path: PathBuf,

    /// Version label for the snapshot
    version: String,
}

impl UcdLoader {
    /// Create a new loader for the given file and dataset version
    pub fn new(path: impl AsRef<Path>, version: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            version: version.into(),
        }
    }

    /// Load the name table and describe where it came from
    pub fn load(&self) -> Result<(NameTable, DatasetInfo)> {
        let path = &self.path;
        debug!("Loading name dataset from {}", path.display());

        let content = file_utils::read_file_to_string(path)
            .context("Name dataset is unavailable")?;

        let table = parse_unicode_data(&content, &self.version)
            .with_context(|| format!("Failed to parse name dataset {}", path.display()))?;

        if table.is_empty() {
            bail!("Name dataset {} contains no names", path.display());
        }

        let info = DatasetInfo {
            version: self.version.clone(),
            source: Some(path.clone()),
            sha256: Some(hash_utils::hash_string(&content)),
        };

        info!(
            "Loaded {} names and {} named ranges from {} (version {})",
            table.len(),
            table.range_count(),
            path.display(),
            self.version
        );
        Ok((table, info))
    }

    /// Get the path to the dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse `UnicodeData.txt` content into a name table
pub fn parse_unicode_data(content: &str, version: &str) -> Result<NameTable> {
    let mut table = NameTable::new(version);
    let mut open_range: Option<(u32, String, usize)> = None;
    let mut previous: Option<(u32, usize)> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(';');
        let codepoint_field = fields.next().unwrap_or_default().trim();
        let name = fields
            .next()
            .map(str::trim)
            .ok_or_else(|| anyhow!("Line {}: missing name field", line_number))?;

        let codepoint = u32::from_str_radix(codepoint_field, 16)
            .with_context(|| format!("Line {}: invalid codepoint '{}'", line_number, codepoint_field))?;
        if codepoint > MAX_CODEPOINT {
            bail!("Line {}: codepoint {} is out of range", line_number, format_codepoint(codepoint));
        }

        // Entries must be strictly ascending; this also rejects repeats and
        // entries falling inside an already closed range.
        if let Some((previous_codepoint, previous_line)) = previous {
            if codepoint <= previous_codepoint {
                bail!(
                    "Line {}: codepoint {} does not follow {} (line {})",
                    line_number,
                    format_codepoint(codepoint),
                    format_codepoint(previous_codepoint),
                    previous_line
                );
            }
        }
        previous = Some((codepoint, line_number));

        if let Some(block) = range_block(name, RANGE_FIRST_SUFFIX) {
            if let Some((first, pending, opened_at)) = &open_range {
                bail!(
                    "Line {}: range {} opened at {} (line {}) was never closed",
                    line_number,
                    pending,
                    format_codepoint(*first),
                    opened_at
                );
            }
            trace!("Range {} opens at {}", block, format_codepoint(codepoint));
            open_range = Some((codepoint, block, line_number));
        } else if let Some(block) = range_block(name, RANGE_LAST_SUFFIX) {
            let (first, pending, _) = open_range
                .take()
                .ok_or_else(|| anyhow!("Line {}: range end {} has no matching start", line_number, name))?;
            if pending != block {
                bail!("Line {}: range end {} does not match open range {}", line_number, block, pending);
            }
            table
                .insert_range(first, codepoint, block)
                .with_context(|| format!("Line {}: invalid range", line_number))?;
        } else {
            if open_range.is_some() {
                bail!("Line {}: entry {} appears inside an open range", line_number, format_codepoint(codepoint));
            }
            if name.is_empty() {
                warn!("Line {}: {} has an empty name, treating it as unnamed", line_number, format_codepoint(codepoint));
            } else {
                table.insert(codepoint, name);
            }
        }
    }

    if let Some((first, pending, opened_at)) = open_range {
        bail!(
            "Range {} opened at {} (line {}) was never closed",
            pending,
            format_codepoint(first),
            opened_at
        );
    }

    debug!("Parsed {} names and {} ranges", table.len(), table.range_count());
    Ok(table)
}

/// `<CJK Ideograph, First>` with suffix `, First>` becomes `<CJK Ideograph>`
fn range_block(name: &str, suffix: &str) -> Option<String> {
    if !name.starts_with('<') {
        return None;
    }
    name.strip_suffix(suffix).map(|block| format!("{}>", block))
}
