use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use super::types::CodepointRange;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} codepoints ({eta}) {msg}";

/// Progress tracker for displaying progress during scanning
#[derive(Debug, Default)]
pub struct ProgressTracker {
    /// Whether a progress bar is drawn at all
    enabled: bool,
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Set up a progress bar sized to the total number of codepoints
    fn create_bar(&self, shards: &[CodepointRange]) -> Option<ProgressBar> {
        if !self.enabled || shards.len() < 2 {
            return None;
        }

        let total: u64 = shards.iter().map(CodepointRange::len).sum();
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        Some(pb)
    }

    /// Run `operation` over each shard in order
    pub fn track_sequential<F, R>(&self, shards: &[CodepointRange], mut operation: F) -> Vec<R>
    where
        F: FnMut(&CodepointRange) -> R,
    {
        let progress_bar = self.create_bar(shards);

        let results = shards
            .iter()
            .map(|shard| {
                let result = operation(shard);
                if let Some(pb) = &progress_bar {
                    pb.inc(shard.len());
                    pb.set_message(format!("U+{:04X}", shard.last));
                }
                result
            })
            .collect();

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Scan complete");
        }

        results
    }

    /// Run `operation` over the shards in parallel; results keep shard order
    pub fn track_parallel<F, R>(&self, shards: &[CodepointRange], operation: F) -> Vec<R>
    where
        F: Fn(&CodepointRange) -> R + Sync + Send,
        R: Send,
    {
        let progress_bar = self.create_bar(shards);

        let results: Vec<R> = shards
            .par_iter()
            .map(|shard| {
                let result = operation(shard);
                if let Some(pb) = &progress_bar {
                    pb.inc(shard.len());
                }
                result
            })
            .collect();

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Scan complete");
        }

        results
    }
}
