use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use litescan::{Match, Matcher};

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Args)]
pub struct ScanArgs {
    /// File with one literal pattern per line.
    patterns_file: PathBuf,

    /// File to scan, or "-" for stdin.
    input: PathBuf,

    /// Memory-map `input` and scan it in overlap-safe chunks.
    #[arg(long)]
    mmap: bool,

    /// Scan a memory-mapped `input` across multiple worker threads
    /// (implies --mmap).
    #[arg(long)]
    parallel: bool,

    /// Scan `input` via sequential reads, bounding memory use instead of
    /// mapping the whole file.
    #[arg(long)]
    stream: bool,

    /// Fold ASCII case by default; pass this to match case-sensitively.
    #[arg(long)]
    case_sensitive: bool,

    /// Report every overlapping match instead of a non-overlapping cover.
    #[arg(long = "no-overlap")]
    no_overlap: bool,

    /// Only report matches on ASCII word boundaries.
    #[arg(long)]
    whole_word: bool,

    /// Automaton feed size per chunk for --mmap/--stream scans.
    #[arg(long, default_value_t = 64 * 1024)]
    chunk_size: usize,

    /// Worker count for --parallel scans (defaults to available parallelism).
    #[arg(long)]
    threads: Option<usize>,

    /// Read-ahead size for --stream scans.
    #[arg(long, default_value_t = 64 * 1024)]
    buffer_size: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

pub fn run(args: ScanArgs) -> Result<()> {
    let patterns = read_patterns(&args.patterns_file)
        .with_context(|| format!("reading patterns from {}", args.patterns_file.display()))?;

    let matcher = Matcher::builder(&patterns)
        .case_insensitive(!args.case_sensitive)
        .overlapping(!args.no_overlap)
        .whole_word(args.whole_word)
        .build()
        .context("building matcher")?;

    let matches = if args.stream {
        matcher
            .match_file_stream(&args.input, args.buffer_size)
            .with_context(|| format!("streaming {}", args.input.display()))?
    } else if args.parallel {
        let threads = args.threads.unwrap_or_else(|| {
            std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        });
        matcher
            .match_file_memmap_parallel(&args.input, threads)
            .with_context(|| format!("mmap-parallel scanning {}", args.input.display()))?
    } else if args.mmap {
        matcher
            .match_file_memmap(&args.input, args.chunk_size)
            .with_context(|| format!("mmap scanning {}", args.input.display()))?
    } else {
        let mut reader = litescan::file_reader::open(&args.input)
            .with_context(|| format!("opening {}", args.input.display()))?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .with_context(|| format!("reading {}", args.input.display()))?;
        matcher.match_bytes(&bytes)
    };

    print_matches(&matches, args.format)?;
    Ok(())
}

fn read_patterns(path: &std::path::Path) -> Result<Vec<String>> {
    let mut reader = litescan::file_reader::open(path)?;
    let mut buf = Vec::new();
    let mut patterns = Vec::new();

    while litescan::file_reader::read_line(&mut *reader, &mut buf)?.is_some() {
        let pattern = String::from_utf8_lossy(&buf).into_owned();
        patterns.push(pattern);
    }

    Ok(patterns)
}

fn print_matches(matches: &[Match], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for m in matches {
                println!("{}", serde_json::to_string(m)?);
            }
        }
        OutputFormat::Text => {
            for m in matches {
                println!("{}\t{}\t{}", m.start, m.end, m.pattern);
            }
        }
    }
    Ok(())
}
