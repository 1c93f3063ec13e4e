use std::path::Path;
use std::fs;
use anyhow::{Result, Context, bail};
use log::{debug, trace};

/// Read a file to string with better error handling
pub fn read_file_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    trace!("Reading file: {}", path.display());

    if !path.exists() {
        bail!("File {} does not exist", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}
