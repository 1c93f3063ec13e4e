use serde::{Serialize, Deserialize};

use crate::utils::codepoint::MAX_CODEPOINT;

/// Prefix marking pseudo-names such as `<control>` or range placeholders
pub const BRACKET_MARKER: char = '<';

/// Classification of a codepoint by its resolved name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCategory {
    /// No name, or an empty one
    Unnamed,

    /// A pseudo-name starting with `<`
    Bracketed,

    /// A real, per-character name
    UniqueCandidate,
}

impl NameCategory {
    /// Classify a resolved name
    pub fn of(name: Option<&str>) -> Self {
        match name {
            None => Self::Unnamed,
            Some(name) if name.is_empty() => Self::Unnamed,
            Some(name) if name.starts_with(BRACKET_MARKER) => Self::Bracketed,
            Some(_) => Self::UniqueCandidate,
        }
    }
}

/// Inclusive range of codepoints to scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodepointRange {
    /// First codepoint scanned
    pub first: u32,

    /// Last codepoint scanned, inclusive
    pub last: u32,
}

impl CodepointRange {
    /// Create a new inclusive range
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// The whole codepoint space, `U+0000..=U+10FFFF`
    pub fn full() -> Self {
        Self::new(0, MAX_CODEPOINT)
    }

    /// Number of codepoints in the range
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            u64::from(self.last) - u64::from(self.first) + 1
        }
    }

    /// Whether the range holds no codepoints
    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }

    /// Split into contiguous ascending shards of at most `shard_size` codepoints
    pub fn shards(&self, shard_size: u32) -> Vec<CodepointRange> {
        if self.is_empty() {
            return Vec::new();
        }

        let size = u64::from(shard_size.max(1));
        let last = u64::from(self.last);
        let mut shards = Vec::with_capacity((self.len() / size + 1) as usize);
        let mut start = u64::from(self.first);

        while start <= last {
            let end = (start + size - 1).min(last);
            shards.push(CodepointRange::new(start as u32, end as u32));
            start = end + 1;
        }

        shards
    }
}

/// Configuration options for codepoint scanning
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Whether to scan shards on a thread pool
    pub parallel: bool,

    /// Number of parallel threads to use for scanning
    pub parallel_threads: Option<usize>,

    /// Codepoints per shard
    pub shard_size: u32,

    /// Whether to draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threads: None,
            shard_size: 0x10000,
            show_progress: false,
        }
    }
}

/// A name shared by two or more codepoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateName {
    /// The repeated name
    pub name: String,

    /// How many codepoints in the range carry it
    pub count: usize,
}

/// Aggregate statistics of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// The range that was scanned
    pub range: CodepointRange,

    /// Number of codepoints visited
    pub codepoints_scanned: u64,

    /// Codepoints with any non-empty name
    pub named_count: usize,

    /// Codepoints with a bracketed pseudo-name
    pub bracketed_count: usize,

    /// Codepoints with a real, per-character name
    pub unique_named_count: usize,

    /// Number of distinct non-empty names
    pub distinct_names: usize,

    /// Lowest codepoint with a real name
    pub first_named: Option<u32>,

    /// Highest codepoint with a real name
    pub last_named: Option<u32>,

    /// Lowest codepoint without a name
    pub first_unnamed: Option<u32>,

    /// Codepoints whose real name is a single word, ascending
    pub single_word_chars: Vec<u32>,

    /// Repeated names in the order they first became repeated
    pub duplicate_names: Vec<DuplicateName>,
}

impl ScanResult {
    /// Final count of a repeated name, if it was repeated
    pub fn duplicate_count(&self, name: &str) -> Option<usize> {
        self.duplicate_names
            .iter()
            .find(|duplicate| duplicate.name == name)
            .map(|duplicate| duplicate.count)
    }

    /// Single-word codepoints strictly below `cutoff`
    pub fn single_word_below(&self, cutoff: u32) -> impl Iterator<Item = u32> + '_ {
        self.single_word_chars
            .iter()
            .copied()
            .take_while(move |&codepoint| codepoint < cutoff)
    }
}
