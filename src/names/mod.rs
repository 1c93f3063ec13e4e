pub mod table;
pub mod ucd;

use std::path::PathBuf;
use serde::{Serialize, Deserialize};

// Re-export the main API for easier access
pub use table::NameTable;
pub use ucd::UcdLoader;

/// Capability for resolving codepoints to their character names
///
/// Implementations are expected to be total over the scanned range: an
/// unnamed codepoint yields `None` (or an empty string), never an error.
pub trait NameSource {
    /// Name of `codepoint`, or `None` if it has no name
    fn name(&self, codepoint: u32) -> Option<&str>;

    /// Version identifier of the naming dataset
    fn unicode_version(&self) -> &str;
}

impl<T: NameSource + ?Sized> NameSource for &T {
    fn name(&self, codepoint: u32) -> Option<&str> {
        (**self).name(codepoint)
    }

    fn unicode_version(&self) -> &str {
        (**self).unicode_version()
    }
}

/// Description of the naming dataset a scan ran against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Version of the naming dataset
    pub version: String,

    /// File the dataset was loaded from, if any
    pub source: Option<PathBuf>,

    /// SHA-256 of the dataset file content
    pub sha256: Option<String>,
}

impl DatasetInfo {
    /// Describe an in-memory source that was not loaded from disk
    pub fn in_memory(source: &impl NameSource) -> Self {
        Self {
            version: source.unicode_version().to_string(),
            source: None,
            sha256: None,
        }
    }
}
