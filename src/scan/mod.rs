pub mod progress;
pub mod tally;
pub mod types;

use anyhow::{Result, Context};
use log::{debug, info};

use crate::names::NameSource;
use crate::utils::codepoint::format_codepoint;

// Re-export from submodules
pub use progress::ProgressTracker;
pub use tally::{ShardTally, TallyMerger};
pub use types::{CodepointRange, DuplicateName, NameCategory, ScanOptions, ScanResult};

/// Scans a codepoint range against a name source and gathers naming statistics
#[derive(Debug)]
pub struct Scanner<'a, S: NameSource + ?Sized> {
    /// Source of character names
    source: &'a S,

    /// Configuration options for scanning
    options: ScanOptions,

    /// Progress tracker for displaying progress
    progress_tracker: ProgressTracker,
}

impl<'a, S: NameSource + ?Sized> Scanner<'a, S> {
    /// Create a new scanner with the given options
    pub fn new(source: &'a S, options: ScanOptions) -> Self {
        let progress_tracker = ProgressTracker::new(options.show_progress);
        Self {
            source,
            options,
            progress_tracker,
        }
    }

    /// Create a new scanner with default options
    pub fn with_defaults(source: &'a S) -> Self {
        Self::new(source, ScanOptions::default())
    }

    /// Get the scan options
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Classify a single codepoint
    pub fn classify(&self, codepoint: u32) -> NameCategory {
        NameCategory::of(self.source.name(codepoint))
    }

    /// Scan one contiguous shard in ascending order
    pub fn scan_shard(&self, shard: CodepointRange) -> ShardTally {
        let mut tally = ShardTally::new();
        for codepoint in shard.first..=shard.last {
            tally.record(codepoint, self.source.name(codepoint));
        }
        tally
    }

    /// Scan `range` in a single ascending pass on the current thread
    pub fn scan(&self, range: CodepointRange) -> ScanResult {
        info!(
            "Scanning {}..{} against dataset version {}",
            format_codepoint(range.first),
            format_codepoint(range.last),
            self.source.unicode_version()
        );

        let shards = range.shards(self.options.shard_size);
        let tallies = self.progress_tracker.track_sequential(&shards, |shard| self.scan_shard(*shard));

        self.merge(range, tallies)
    }

    fn merge(&self, range: CodepointRange, tallies: Vec<ShardTally>) -> ScanResult {
        debug!("Merging {} shard tallies", tallies.len());

        let mut merger = TallyMerger::new(range);
        for tally in tallies {
            merger.absorb(tally);
        }
        let result = merger.finish();

        info!(
            "Scanned {} codepoints: {} named, {} with unique names, {} repeated names",
            result.codepoints_scanned,
            result.named_count,
            result.unique_named_count,
            result.duplicate_names.len()
        );
        result
    }
}

impl<'a, S: NameSource + Sync + ?Sized> Scanner<'a, S> {
    /// Scan `range` as shards on a thread pool, merged in ascending order
    ///
    /// The result is identical to [`Scanner::scan`] for the same source.
    pub fn scan_parallel(&self, range: CodepointRange) -> Result<ScanResult> {
        let thread_count = self.options.parallel_threads.unwrap_or_else(|| {
            let available = num_cpus::get();
            let used = std::cmp::max(1, available.saturating_sub(1));
            debug!("Using {} threads for parallel scanning (available: {})", used, available);
            used
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .context("Failed to build scan thread pool")?;

        let shards = range.shards(self.options.shard_size);
        info!(
            "Scanning {}..{} in {} shards on {} threads against dataset version {}",
            format_codepoint(range.first),
            format_codepoint(range.last),
            shards.len(),
            thread_count,
            self.source.unicode_version()
        );

        let tallies = pool.install(|| {
            self.progress_tracker.track_parallel(&shards, |shard| self.scan_shard(*shard))
        });

        Ok(self.merge(range, tallies))
    }

    /// Scan `range` the way the options ask for
    pub fn run(&self, range: CodepointRange) -> Result<ScanResult> {
        if self.options.parallel {
            self.scan_parallel(range)
        } else {
            Ok(self.scan(range))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameTable;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn sample_table() -> NameTable {
        let mut table = NameTable::with_names(
            "test",
            [
                (0x00, "<control>"),
                (0x01, "<control>"),
                (0x20, "SPACE"),
                (0x21, "EXCLAMATION MARK"),
                (0x41, "LATIN CAPITAL LETTER A"),
                (0x7F, "<control>"),
                (0x263A, "WHITE SMILING FACE"),
                (0x2603, "SNOWMAN"),
                (0x1F402, "OX"),
                (0x1F403, "WATER BUFFALO"),
                (0xE0001, "LANGUAGE TAG"),
                (0xE0100, "VARIATION SELECTOR-17"),
                (0xF0000, "SNOWMAN"),
            ],
        );
        table.insert_range(0x3400, 0x4DBF, "<CJK Ideograph Extension A>").unwrap();
        table.insert_range(0xAC00, 0xD7A3, "<Hangul Syllable>").unwrap();
        table
    }

    #[test]
    fn test_scenario_named_letters() {
        let table = NameTable::with_names(
            "test",
            [
                (0x41, "LATIN CAPITAL LETTER A"),
                (0x42, "LATIN CAPITAL LETTER B"),
                (0x20, ""),
            ],
        );
        let scanner = Scanner::with_defaults(&table);

        let result = scanner.scan(CodepointRange::new(0x20, 0x42));

        assert_eq!(result.first_unnamed, Some(0x20));
        assert_eq!(result.first_named, Some(0x41));
        assert_eq!(result.last_named, Some(0x42));
        assert_eq!(result.unique_named_count, 2);
        assert!(result.single_word_chars.is_empty());
        assert!(result.duplicate_names.is_empty());
        assert_eq!(result.codepoints_scanned, 0x23);
    }

    #[test]
    fn test_scenario_repeated_bracketed_name() {
        let table = NameTable::with_names(
            "test",
            [(0x0, "<control>"), (0x1, "<control>"), (0x2, "<control>")],
        );
        let scanner = Scanner::with_defaults(&table);

        let result = scanner.scan(CodepointRange::new(0x0, 0x2));

        assert_eq!(
            result.duplicate_names,
            vec![DuplicateName { name: "<control>".to_string(), count: 3 }]
        );
        assert_eq!(result.duplicate_count("<control>"), Some(3));
        assert_eq!(result.duplicate_count("SPACE"), None);
        assert_eq!(result.unique_named_count, 0);
        assert_eq!(result.bracketed_count, 3);
        assert_eq!(result.first_named, None);
        assert_eq!(result.last_named, None);
        assert_eq!(result.first_unnamed, None);
    }

    #[test]
    fn test_full_range_statistics() {
        let table = sample_table();
        let scanner = Scanner::with_defaults(&table);

        let result = scanner.scan(CodepointRange::full());

        assert_eq!(result.codepoints_scanned, 0x110000);
        assert_eq!(result.first_unnamed, Some(0x02));
        assert_eq!(result.first_named, Some(0x20));
        assert_eq!(result.last_named, Some(0xF0000));
        assert_eq!(result.unique_named_count, 10);
        assert_eq!(result.single_word_chars, vec![0x20, 0x2603, 0x1F402, 0xF0000]);
        assert_eq!(
            result.duplicate_names,
            vec![
                DuplicateName { name: "<control>".to_string(), count: 3 },
                DuplicateName { name: "<CJK Ideograph Extension A>".to_string(), count: 0x4DBF - 0x3400 + 1 },
                DuplicateName { name: "<Hangul Syllable>".to_string(), count: 0xD7A3 - 0xAC00 + 1 },
                DuplicateName { name: "SNOWMAN".to_string(), count: 2 },
            ]
        );
        assert_eq!(result.bracketed_count, 3 + (0x4DBF - 0x3400 + 1) + (0xD7A3 - 0xAC00 + 1));
        assert_eq!(result.named_count, result.bracketed_count + result.unique_named_count);
    }

    #[test]
    fn test_empty_range_scans_nothing() {
        let table = sample_table();
        let scanner = Scanner::with_defaults(&table);

        let result = scanner.scan(CodepointRange::new(0x42, 0x41));

        assert_eq!(result.codepoints_scanned, 0);
        assert_eq!(result.first_unnamed, None);
        assert_eq!(result.first_named, None);
        assert!(result.duplicate_names.is_empty());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let table = sample_table();
        let scanner = Scanner::with_defaults(&table);

        let first = scanner.scan(CodepointRange::full());
        let second = scanner.scan(CodepointRange::full());

        assert_eq!(first, second);
    }

    #[test]
    fn test_classify() {
        let table = sample_table();
        let scanner = Scanner::with_defaults(&table);

        assert_eq!(scanner.classify(0x00), NameCategory::Bracketed);
        assert_eq!(scanner.classify(0x02), NameCategory::Unnamed);
        assert_eq!(scanner.classify(0x2603), NameCategory::UniqueCandidate);
        assert_eq!(scanner.classify(0xAC01), NameCategory::Bracketed);
    }

    #[test_case(1 ; "one codepoint per shard")]
    #[test_case(3 ; "tiny shards")]
    #[test_case(0x1000 ; "page shards")]
    #[test_case(0x10000 ; "plane shards")]
    #[test_case(0x200000 ; "single shard")]
    fn test_parallel_matches_sequential(shard_size: u32) {
        let table = sample_table();
        let range = if shard_size < 0x100 {
            CodepointRange::new(0, 0x2700)
        } else {
            CodepointRange::full()
        };

        let sequential = Scanner::with_defaults(&table).scan(range);
        let options = ScanOptions {
            parallel: true,
            parallel_threads: Some(4),
            shard_size,
            show_progress: false,
        };
        let scanner = Scanner::new(&table, options);
        assert!(scanner.options().parallel);
        let parallel = scanner.run(range).unwrap();

        assert_eq!(parallel, sequential);
    }
}
