use std::io;
use std::path::PathBuf;
use anyhow::{Result, Context};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};

use unicode_name_stats::codepoint::parse_codepoint;
use unicode_name_stats::{OutputFormat, Reporter, ScanConfig, Scanner, UcdLoader};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scans the Unicode codepoint space and reports statistics about character names"
)]
struct Args {
    /// Path to a UnicodeData.txt snapshot
    #[arg(long)]
    ucd: Option<PathBuf>,

    /// TOML configuration file; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Version label of the name dataset
    #[arg(long)]
    unicode_version: Option<String>,

    /// First codepoint to scan (U+XXXX, 0xXXXX or decimal)
    #[arg(long, value_parser = codepoint_arg)]
    first: Option<u32>,

    /// Last codepoint to scan, inclusive
    #[arg(long, value_parser = codepoint_arg)]
    last: Option<u32>,

    /// Scan shards in parallel; only enables, a file setting `parallel = true` stays on
    #[arg(short, long)]
    parallel: bool,

    /// Number of scan threads (implies --parallel)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Codepoints per shard
    #[arg(long)]
    shard_size: Option<u32>,

    /// Show a progress bar; only enables, a file setting `progress = true` stays on
    #[arg(long)]
    progress: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// List single-word names of codepoints below this one
    #[arg(long, value_parser = codepoint_arg)]
    single_word_below: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn codepoint_arg(input: &str) -> Result<u32, String> {
    parse_codepoint(input).map_err(|e| format!("{:#}", e))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_config(args: Args) -> Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };

    if let Some(ucd) = args.ucd {
        config.ucd_path = Some(ucd);
    }
    if let Some(version) = args.unicode_version {
        config.unicode_version = version;
    }
    if let Some(first) = args.first {
        config.first = first;
    }
    if let Some(last) = args.last {
        config.last = last;
    }
    if args.parallel || args.threads.is_some() {
        config.parallel = true;
    }
    if args.threads.is_some() {
        config.parallel_threads = args.threads;
    }
    if let Some(shard_size) = args.shard_size {
        config.shard_size = shard_size;
    }
    if args.progress {
        config.progress = true;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if args.single_word_below.is_some() {
        config.single_word_below = args.single_word_below;
    }

    config.validate().context("Invalid scan configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(args)?;

    let ucd_path = config
        .ucd_path
        .clone()
        .context("No name dataset given; pass --ucd or set ucd_path in the configuration file")?;
    let (table, dataset) = UcdLoader::new(&ucd_path, config.unicode_version.clone()).load()?;

    let scanner = Scanner::new(&table, config.scan_options());
    let result = scanner.run(config.range())?;
    info!("Scan finished, writing {:?} report", config.format);

    let reporter = Reporter::new(&table, &dataset).with_single_word_below(config.single_word_below);
    reporter.write_to(&mut io::stdout().lock(), &result, config.format)
}
