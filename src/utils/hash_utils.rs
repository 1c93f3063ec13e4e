use sha2::{Sha256, Digest};
use log::trace;

/// Calculate SHA-256 hash of a string
pub fn hash_string(content: &str) -> String {
    trace!("Hashing {} bytes", content.len());
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
