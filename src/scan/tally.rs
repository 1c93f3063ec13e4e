use std::collections::HashMap;
use log::trace;

use super::types::{BRACKET_MARKER, CodepointRange, DuplicateName, NameCategory, ScanResult};

/// Occurrences of one name within a shard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTally {
    /// Number of codepoints carrying the name
    pub count: usize,

    /// Codepoint of the first occurrence
    pub first: u32,

    /// Codepoint of the second occurrence, if any
    pub second: Option<u32>,
}

/// Statistics gathered from one contiguous, ascending shard of codepoints
#[derive(Debug, Default, Clone)]
pub struct ShardTally {
    /// Number of codepoints visited
    pub codepoints_scanned: u64,

    /// Codepoints with any non-empty name
    pub named_count: usize,

    /// Codepoints with a bracketed pseudo-name
    pub bracketed_count: usize,

    /// Codepoints with a real name
    pub unique_named_count: usize,

    /// First codepoint with a real name
    pub first_named: Option<u32>,

    /// Last codepoint with a real name
    pub last_named: Option<u32>,

    /// First codepoint without a name
    pub first_unnamed: Option<u32>,

    /// Codepoints whose real name has no space
    pub single_word_chars: Vec<u32>,

    /// Per-name occurrence counts
    pub names: HashMap<String, NameTally>,
}

impl ShardTally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next codepoint of the shard; codepoints must arrive in ascending order
    pub fn record(&mut self, codepoint: u32, name: Option<&str>) -> NameCategory {
        self.codepoints_scanned += 1;

        let name = match name.filter(|name| !name.is_empty()) {
            Some(name) => name,
            None => {
                self.first_unnamed.get_or_insert(codepoint);
                return NameCategory::Unnamed;
            }
        };

        self.named_count += 1;
        if let Some(tally) = self.names.get_mut(name) {
            tally.count += 1;
            if tally.count == 2 {
                trace!("Name {:?} repeated at U+{:04X}", name, codepoint);
                tally.second = Some(codepoint);
            }
        } else {
            self.names.insert(name.to_owned(), NameTally { count: 1, first: codepoint, second: None });
        }

        if name.starts_with(BRACKET_MARKER) {
            self.bracketed_count += 1;
            return NameCategory::Bracketed;
        }

        self.unique_named_count += 1;
        self.first_named.get_or_insert(codepoint);
        self.last_named = Some(codepoint);
        if !name.contains(' ') {
            self.single_word_chars.push(codepoint);
        }

        NameCategory::UniqueCandidate
    }
}

/// Merges shard tallies, in ascending shard order, into one scan result
#[derive(Debug)]
pub struct TallyMerger {
    /// The full range being scanned
    range: CodepointRange,

    /// Running statistics over all shards absorbed so far
    totals: ShardTally,

    /// Running occurrence count of every name
    counts: HashMap<String, usize>,

    /// Names in the order their count first reached two
    duplicates: Vec<String>,
}

impl TallyMerger {
    /// Create a merger for a scan over `range`
    pub fn new(range: CodepointRange) -> Self {
        Self {
            range,
            totals: ShardTally::new(),
            counts: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Absorb the tally of the next shard
    ///
    /// Shards must be absorbed in ascending codepoint order. A name becomes
    /// a duplicate inside this shard when it was seen once before and
    /// appears here at all (at its first local occurrence), or when it was
    /// unseen and appears here at least twice (at its second local
    /// occurrence). Sorting those transitions by codepoint reproduces the
    /// order of a single sequential pass.
    pub fn absorb(&mut self, tally: ShardTally) {
        let totals = &mut self.totals;
        totals.codepoints_scanned += tally.codepoints_scanned;
        totals.named_count += tally.named_count;
        totals.bracketed_count += tally.bracketed_count;
        totals.unique_named_count += tally.unique_named_count;

        if totals.first_unnamed.is_none() {
            totals.first_unnamed = tally.first_unnamed;
        }
        if totals.first_named.is_none() {
            totals.first_named = tally.first_named;
        }
        if tally.last_named.is_some() {
            totals.last_named = tally.last_named;
        }
        totals.single_word_chars.extend(tally.single_word_chars);

        let mut transitions = Vec::new();
        for (name, local) in tally.names {
            let seen_before = self.counts.get(&name).copied().unwrap_or(0);
            let repeated_at = match seen_before {
                0 => local.second,
                1 => Some(local.first),
                _ => None,
            };

            self.counts.insert(name.clone(), seen_before + local.count);
            if let Some(codepoint) = repeated_at {
                transitions.push((codepoint, name));
            }
        }

        transitions.sort_unstable_by_key(|(codepoint, _)| *codepoint);
        self.duplicates.extend(transitions.into_iter().map(|(_, name)| name));
    }

    /// Produce the final result
    pub fn finish(self) -> ScanResult {
        let counts = self.counts;
        let duplicate_names = self.duplicates
            .into_iter()
            .map(|name| {
                let count = counts.get(&name).copied().unwrap_or_default();
                DuplicateName { name, count }
            })
            .collect();

        ScanResult {
            range: self.range,
            codepoints_scanned: self.totals.codepoints_scanned,
            named_count: self.totals.named_count,
            bracketed_count: self.totals.bracketed_count,
            unique_named_count: self.totals.unique_named_count,
            distinct_names: counts.len(),
            first_named: self.totals.first_named,
            last_named: self.totals.last_named,
            first_unnamed: self.totals.first_unnamed,
            single_word_chars: self.totals.single_word_chars,
            duplicate_names,
        }
    }
}
