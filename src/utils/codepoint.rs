//! Parsing and display helpers for raw codepoint values.
//!
//! Codepoints are carried as `u32` rather than `char` so that surrogates,
//! which some name datasets cover, can still be scanned and reported.

use anyhow::{Result, Context, bail};

/// Highest valid Unicode scalar value
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Format a codepoint in `U+XXXX` notation
pub fn format_codepoint(codepoint: u32) -> String {
    format!("U+{:04X}", codepoint)
}

/// Render a codepoint as a quoted, escaped char literal
pub fn quote_codepoint(codepoint: u32) -> String {
    match char::from_u32(codepoint) {
        Some(c) => format!("{:?}", c),
        None => format!("'\\u{{{:x}}}'", codepoint),
    }
}

/// The character itself, or U+FFFD for surrogates
pub fn display_char(codepoint: u32) -> char {
    char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Parse a codepoint written as `U+XXXX`, `0xXXXX` or plain decimal
pub fn parse_codepoint(input: &str) -> Result<u32> {
    let trimmed = input.trim();

    let parsed = if let Some(hex) = trimmed.strip_prefix("U+").or_else(|| trimmed.strip_prefix("u+")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        trimmed.parse::<u32>()
    };

    let codepoint = parsed.with_context(|| format!("Invalid codepoint '{}'", input))?;
    if codepoint > MAX_CODEPOINT {
        bail!("Codepoint {} is above {}", format_codepoint(codepoint), format_codepoint(MAX_CODEPOINT));
    }

    Ok(codepoint)
}
