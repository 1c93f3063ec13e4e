//! Text and JSON rendering of scan results.

use std::fmt::Write as _;
use std::io;
use anyhow::{Result, Context};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Serialize, Deserialize};

use crate::names::{DatasetInfo, NameSource};
use crate::scan::ScanResult;
use crate::utils::codepoint::{MAX_CODEPOINT, display_char, format_codepoint, quote_codepoint};

const SEPARATOR_WIDTH: usize = 60;

/// Output format of the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,
}

/// A codepoint together with its resolved name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCodepoint {
    /// The codepoint value
    pub codepoint: u32,

    /// The codepoint in `U+XXXX` notation
    pub notation: String,

    /// Name resolved from the source, if any
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'r> {
    generated_at: DateTime<Utc>,
    max_codepoint: u32,
    dataset: &'r DatasetInfo,
    first_named: Option<NamedCodepoint>,
    last_named: Option<NamedCodepoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    single_word_below: Option<Vec<NamedCodepoint>>,
    result: &'r ScanResult,
}

/// Renders scan results; names next to codepoints are resolved from `source`
#[derive(Debug)]
pub struct Reporter<'a, S: NameSource + ?Sized> {
    source: &'a S,
    dataset: &'a DatasetInfo,
    single_word_below: Option<u32>,
}

impl<'a, S: NameSource + ?Sized> Reporter<'a, S> {
    /// Create a new reporter for results scanned against `source`
    pub fn new(source: &'a S, dataset: &'a DatasetInfo) -> Self {
        Self {
            source,
            dataset,
            single_word_below: None,
        }
    }

    /// Also list single-word names of codepoints below `cutoff`
    pub fn with_single_word_below(mut self, cutoff: Option<u32>) -> Self {
        self.single_word_below = cutoff;
        self
    }

    /// Render the report in the requested format
    pub fn render(&self, result: &ScanResult, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => self.render_text(result),
            OutputFormat::Json => self.render_json(result),
        }
    }

    /// Render and write the report to `out`
    pub fn write_to(&self, out: &mut impl io::Write, result: &ScanResult, format: OutputFormat) -> Result<()> {
        let rendered = self.render(result, format)?;
        out.write_all(rendered.as_bytes()).context("Failed to write report")?;
        out.flush().context("Failed to flush report")
    }

    /// Render the human-readable report
    pub fn render_text(&self, result: &ScanResult) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "max codepoint = {}", MAX_CODEPOINT)?;
        writeln!(out, "unicode version = {}", self.dataset.version)?;

        writeln!(out, "Repeated character names (with counts):")?;
        for duplicate in result.duplicate_names.iter().filter(|duplicate| duplicate.count > 1) {
            writeln!(out, "{:>6}\t{}", duplicate.count, duplicate.name)?;
        }
        writeln!(out, "{}", "_".repeat(SEPARATOR_WIDTH))?;

        writeln!(out, "{:>6}\tcharacters with unique names", result.unique_named_count)?;
        writeln!(out, "first:\t{}", self.describe(result.first_named))?;
        writeln!(out, " last:\t{}", self.describe(result.last_named))?;
        writeln!(
            out,
            "first character with no name: \t{}",
            result.first_unnamed.map(format_codepoint).unwrap_or_else(|| "none".to_string())
        )?;

        if let Some(cutoff) = self.single_word_below {
            writeln!(out, "Single word character names < {}:", format_codepoint(cutoff))?;
            for codepoint in result.single_word_below(cutoff) {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    format_codepoint(codepoint),
                    display_char(codepoint),
                    self.source.name(codepoint).unwrap_or_default()
                )?;
            }
        }

        Ok(out)
    }

    /// Render the report as pretty-printed JSON
    pub fn render_json(&self, result: &ScanResult) -> Result<String> {
        let report = JsonReport {
            generated_at: Utc::now(),
            max_codepoint: MAX_CODEPOINT,
            dataset: self.dataset,
            first_named: result.first_named.map(|codepoint| self.named(codepoint)),
            last_named: result.last_named.map(|codepoint| self.named(codepoint)),
            single_word_below: self
                .single_word_below
                .map(|cutoff| result.single_word_below(cutoff).map(|codepoint| self.named(codepoint)).collect()),
            result,
        };

        let mut rendered = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        rendered.push('\n');
        Ok(rendered)
    }

    fn named(&self, codepoint: u32) -> NamedCodepoint {
        NamedCodepoint {
            codepoint,
            notation: format_codepoint(codepoint),
            name: self.source.name(codepoint).map(str::to_string),
        }
    }

    /// `U+0041\t'A'\tLATIN CAPITAL LETTER A`, or `none`
    fn describe(&self, codepoint: Option<u32>) -> String {
        match codepoint {
            Some(codepoint) => format!(
                "{}\t{}\t{}",
                format_codepoint(codepoint),
                quote_codepoint(codepoint),
                self.source.name(codepoint).unwrap_or_default()
            ),
            None => "none".to_string(),
        }
    }
}
