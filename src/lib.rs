//! Statistics about Unicode character names.
//!
//! A [`Scanner`] walks a codepoint range in ascending order, resolves every
//! codepoint through a [`NameSource`] and gathers a [`ScanResult`]: which
//! names repeat, how many codepoints carry a real name, the first and last of
//! those, the first codepoint without a name, and which names are a single
//! word. A [`Reporter`] renders the result as text or JSON.

pub mod config;
pub mod names;
pub mod report;
pub mod scan;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main types and functions for easier access
pub use config::ScanConfig;
pub use names::{DatasetInfo, NameSource, NameTable, UcdLoader};
pub use report::{OutputFormat, Reporter};
pub use scan::{CodepointRange, DuplicateName, NameCategory, ScanOptions, ScanResult, Scanner};

// Re-export utility functions
pub use utils::codepoint;
