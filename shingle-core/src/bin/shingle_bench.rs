//! Line Search Benchmarking Tool
//!
//! Treats every line of a text file as a record and measures how long a
//! full linear similarity scan takes. Useful for getting a feel for how
//! many records a single query can scan before latency becomes noticeable.
//!
//! ## What It Benchmarks
//!
//! 1. **Normalize**: Normalizing every line
//! 2. **Search**: Normalize + shingle + score + rank for one query
//!
//! ## Usage
//!
//! ```bash
//! # Trigrams, threshold 0.2
//! ./target/release/shingle_bench /path/to/names.txt "cafe"
//!
//! # Bigrams, threshold 0.1
//! ./target/release/shingle_bench /path/to/names.txt "cafe" 2 0.1
//!
//! # Per-query summary from the library
//! RUST_LOG=shingle_core=debug ./target/release/shingle_bench names.txt cafe
//! ```
//!
//! ## Output
//!
//! ```text
//! --------------------------------
//! Mode        : Search
//! Elapsed     : 0.012 s
//! Throughput  : 0.412 GiB/s
//! Records/sec : 41_250_000
//! --------------------------------
//! ```

use std::env;
use std::fs;
use std::process;
use std::time::{Duration, Instant};

use log::info;
use memchr::memchr_iter;
use shingle_core::analyzer::normalizer::TextNormalizer;
use shingle_core::{NgramSize, SearchConfig, Searcher, Threshold};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> std::io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: shingle_bench <path> <query> [ngram 2|3|4] [threshold]");
        process::exit(1);
    }

    let path = &args[1];
    let query = &args[2];

    let ngram_size = match args.get(3).map(|s| s.parse::<usize>()) {
        None => NgramSize::default(),
        Some(Ok(n)) => NgramSize::try_from(n).unwrap_or_else(|e| fail(&e)),
        Some(Err(e)) => fail(&e),
    };

    let threshold = match args.get(4).map(|s| s.parse::<f32>()) {
        None => Threshold::default(),
        Some(Ok(t)) => Threshold::try_from(t).unwrap_or_else(|e| fail(&e)),
        Some(Err(e)) => fail(&e),
    };

    println!("Loading file...");
    let bytes = fs::read(path)?;
    let input = std::str::from_utf8(&bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let records = split_lines(input);

    println!("File size: {}", fmt_bytes(input.len() as u64));
    println!("Records:   {}", fmt_count(records.len() as u64));
    println!("Ngram:     {ngram_size}");
    println!("Threshold: {threshold}\n");

    bench_normalize(input, &records);
    bench_search(input, &records, query, SearchConfig::new(ngram_size, threshold));

    Ok(())
}

fn fail(err: &dyn std::fmt::Display) -> ! {
    eprintln!("error: {err}");
    process::exit(2);
}

/// Splits on `\n`, dropping a trailing `\r` and empty lines.
fn split_lines(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;

    for end in memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len())) {
        let line = input[start..end].trim_end_matches('\r');
        if !line.is_empty() {
            lines.push(line);
        }
        start = end + 1;
    }

    lines
}

fn bench_normalize(input: &str, records: &[&str]) {
    let normalizer = TextNormalizer::default();
    let mut out = String::with_capacity(256);

    println!("=== Normalize ===");

    warmup(|| {
        for r in records {
            normalizer.normalize_into(r, &mut out);
        }
    });

    let elapsed = measure(|| {
        for r in records {
            normalizer.normalize_into(r, &mut out);
            std::hint::black_box(&out);
        }
    });

    print_perf("Normalize", input.len(), elapsed, records.len() as u64);
}

fn bench_search(input: &str, records: &[&str], query: &str, config: SearchConfig) {
    let searcher = Searcher::new(config);

    println!("=== Search ===");

    warmup(|| {
        std::hint::black_box(searcher.search_by(records, |r| *r, query));
    });

    let elapsed = measure(|| {
        std::hint::black_box(searcher.search_by(records, |r| *r, query));
    });

    print_perf("Search", input.len(), elapsed, records.len() as u64);

    let (hits, stats) = searcher.search_by_with_stats(records, |r| *r, query);
    info!("{stats}");
    println!("Stats       : {stats}");

    match hits {
        Some(hits) => {
            for (rank, hit) in hits.iter().enumerate() {
                println!("{:>2}. {}", rank + 1, hit);
            }
        }
        None => println!("No record met the threshold."),
    }
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, records: u64) {
    let secs = elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.3} GiB/s", gib / secs);

    if records > 0 {
        println!("Records/sec : {}", fmt_count((records as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
