//! Portal eye scanner - finds seeds whose end portal is already partly filled.
//!
//! Usage:
//!   portal_scan seed <SEED> [OPTIONS]
//!   portal_scan <START_SEED> <THRESHOLD> [OPTIONS]
//!
//! The first form replays one seed and reports every stronghold. The second
//! scans upward from START_SEED and prints each seed with a stronghold holding
//! at least THRESHOLD eyes. Type `stop` on stdin to end the scan; the last seed
//! reached is printed on exit.
//!
//! Options:
//!   --config <FILE>   JSON scan settings (see ScanConfig)
//!   --jobs <N>        Worker threads (default: all cores)

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use stronghold_scan::core::types::{Result, Seed};
use stronghold_scan::core::Error;
use stronghold_scan::search::{ScanConfig, Scanner, SeedReport};

/// What the command line asked for
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Replay(Seed),
    Scan { start: Seed, threshold: u32 },
}

fn main() {
    stronghold_scan::core::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        eprintln!("usage: portal_scan seed <SEED> | <START_SEED> <THRESHOLD> [--config FILE] [--jobs N]");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let mut config = match parse_str_arg(args, "--config") {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    if let Some(jobs) = parse_usize_arg(args, "--jobs")? {
        config.jobs = jobs;
    }

    if config.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .build_global()
            .map_err(|e| Error::Config(format!("thread pool: {e}")))?;
    }

    match parse_mode(&positional(args))? {
        Mode::Replay(seed) => {
            config.threshold = 0;
            let scanner = Scanner::new(config);
            print_report(&scanner.evaluate(seed));
        }
        Mode::Scan { start, threshold } => {
            config.threshold = threshold;
            let scanner = Scanner::new(config);
            watch_stdin(scanner.stop_handle());

            log::info!(
                "Scanning from seed {start} for portals with at least {threshold} eyes ({} seeds per batch)",
                scanner.config().batch_size
            );
            let summary = scanner.run(start, print_report);
            match summary.last_seed {
                Some(last) => println!("Last seed reached: {last} ({} scanned, {} hits)", summary.scanned, summary.hits),
                None => println!("No seeds scanned"),
            }
        }
    }
    Ok(())
}

fn print_report(report: &SeedReport) {
    println!("Seed {}:", report.seed);
    for stronghold in &report.strongholds {
        println!("  {stronghold}");
    }
}

/// Set `stop` once a `stop` line arrives on stdin
fn watch_stdin(stop: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim() == "stop" => {
                    log::info!("Stop requested, finishing current batch");
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("stdin closed: {e}");
                    break;
                }
            }
        }
    });
}

fn parse_mode(positional: &[&str]) -> Result<Mode> {
    match positional {
        ["seed", value] => Ok(Mode::Replay(parse_seed(value)?)),
        [start, threshold] => Ok(Mode::Scan {
            start: parse_seed(start)?,
            threshold: threshold
                .parse()
                .map_err(|_| Error::Argument(format!("invalid threshold '{threshold}'")))?,
        }),
        _ => Err(Error::Argument(format!("expected two arguments, got {}", positional.len()))),
    }
}

fn parse_seed(value: &str) -> Result<Seed> {
    value.parse().map_err(|_| Error::Argument(format!("invalid seed '{value}'")))
}

/// Arguments that are neither flags nor flag values
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_usize_arg(args: &[String], flag: &str) -> Result<Option<usize>> {
    parse_str_arg(args, flag)
        .map(|s| s.parse().map_err(|_| Error::Argument(format!("invalid value '{s}' for {flag}"))))
        .transpose()
}
