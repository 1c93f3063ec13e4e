use std::collections::HashMap;
use anyhow::{Result, bail};

use crate::utils::codepoint::format_codepoint;
use super::NameSource;

/// A name shared by every codepoint of an inclusive range
#[derive(Debug, Clone, PartialEq, Eq)]
struct NameRange {
    first: u32,
    last: u32,
    name: String,
}

/// In-memory name table with per-codepoint names and range names
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    /// Version of the dataset the names come from
    version: String,

    /// Names assigned to single codepoints
    names: HashMap<u32, String>,

    /// Sorted, non-overlapping range names
    ranges: Vec<NameRange>,
}

impl NameTable {
    /// Create an empty table for the given dataset version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Create a table from `(codepoint, name)` pairs
    pub fn with_names<I, S>(version: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut table = Self::new(version);
        for (codepoint, name) in names {
            table.insert(codepoint, name);
        }
        table
    }

    /// Assign a name to a single codepoint, replacing any previous one
    pub fn insert(&mut self, codepoint: u32, name: impl Into<String>) {
        self.names.insert(codepoint, name.into());
    }

    /// Assign a name to every codepoint in `first..=last`
    pub fn insert_range(&mut self, first: u32, last: u32, name: impl Into<String>) -> Result<()> {
        if first > last {
            bail!("Range {}..{} is inverted", format_codepoint(first), format_codepoint(last));
        }

        let position = self.ranges.partition_point(|range| range.last < first);
        if let Some(next) = self.ranges.get(position) {
            if next.first <= last {
                bail!(
                    "Range {}..{} overlaps existing range {}..{} ({})",
                    format_codepoint(first),
                    format_codepoint(last),
                    format_codepoint(next.first),
                    format_codepoint(next.last),
                    next.name
                );
            }
        }

        self.ranges.insert(position, NameRange { first, last, name: name.into() });
        Ok(())
    }

    /// Number of single-codepoint names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table holds no names at all
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.ranges.is_empty()
    }

    /// Number of range names
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    fn range_name(&self, codepoint: u32) -> Option<&str> {
        let position = self.ranges.partition_point(|range| range.last < codepoint);
        self.ranges
            .get(position)
            .filter(|range| range.first <= codepoint)
            .map(|range| range.name.as_str())
    }
}

impl NameSource for NameTable {
    fn name(&self, codepoint: u32) -> Option<&str> {
        self.names
            .get(&codepoint)
            .map(String::as_str)
            .or_else(|| self.range_name(codepoint))
    }

    fn unicode_version(&self) -> &str {
        &self.version
    }
}
