// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Command-line front end: searches for a Golomb ruler with a given number of
//! marks, prints the result and writes a report file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use golomb_model::known::KnownOptimalTable;
use golomb_model::ruler::Ruler;
use golomb_search::shape::RulerShape;
use golomb_solver::solver::{SearchMode, SolverBuilder};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Parser, Debug)]
#[command(name = "golomb", about = "Golomb ruler finder", version)]
struct Args {
    /// Number of marks on the ruler.
    marks: usize,
    /// Print search progress.
    #[arg(short, long)]
    verbose: bool,
    /// Run the single-threaded search.
    #[arg(short = 's', long = "single", conflicts_with = "mp")]
    single: bool,
    /// Run the parallel search (default).
    #[arg(long)]
    mp: bool,
    /// Search at the known optimal length for this mark count.
    #[arg(short = 'b', long = "best")]
    best: bool,
    /// Target length when no known optimal length is used.
    #[arg(long = "max-length", default_value_t = RulerShape::MAX_LENGTH)]
    max_length: u32,
    /// Report file. Defaults to `out/GOL_n<marks><suffix>.txt`.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Print the elapsed time every N minutes.
    #[arg(long = "vt", value_name = "MINUTES")]
    heartbeat: Option<u64>,
    /// Worker threads for the parallel search.
    #[arg(long)]
    threads: Option<usize>,
    /// Give up after this many seconds.
    #[arg(long = "time-limit", value_name = "SECONDS")]
    time_limit: Option<u64>,
}

impl Args {
    fn mode(&self) -> SearchMode {
        if self.single {
            SearchMode::Sequential
        } else {
            SearchMode::Auto
        }
    }

    /// Suffix appended to the default report file name, e.g. `_mp_b`.
    fn file_suffix(&self) -> String {
        let mut suffix = String::from(if self.single { "_s" } else { "_mp" });
        if self.best {
            suffix.push_str("_b");
        }
        if self.verbose {
            suffix.push_str("_v");
        }
        suffix
    }

    /// Flags recorded in the report, e.g. `-mp -b`.
    fn options(&self) -> String {
        let mut options = vec![if self.single { "-s" } else { "-mp" }];
        if self.best {
            options.push("-b");
        }
        if self.verbose {
            options.push("-v");
        }
        options.join(" ")
    }

    fn report_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from("out").join(format!("GOL_n{}{}.txt", self.marks, self.file_suffix()))
        })
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<ExitCode> {
    let table = KnownOptimalTable::global();

    println!("Golomb Ruler Finder");
    println!("Start time: {}", Local::now().format(TIMESTAMP_FORMAT));
    println!("Searching for optimal ruler with {} marks", args.marks);

    let length = match (args.best, table.length(args.marks)) {
        (true, Some(known)) => {
            println!("Using heuristic: known optimal length is {}", known);
            known
        }
        (true, None) => {
            println!(
                "No known optimal length for {} marks, using length {}",
                args.marks, args.max_length
            );
            args.max_length
        }
        (false, _) => args.max_length,
    };

    let mut builder = SolverBuilder::new().with_mode(args.mode());
    if let Some(threads) = args.threads {
        builder = builder.with_threads(threads);
    }
    if let Some(seconds) = args.time_limit {
        builder = builder.with_time_limit(Duration::from_secs(seconds));
    }
    if args.verbose {
        builder = builder.with_logging(Duration::from_secs(5));
    }
    let solver = builder.build();

    let start = Instant::now();
    let done = AtomicBool::new(false);
    let outcome = thread::scope(|scope| {
        if let Some(minutes) = args.heartbeat.filter(|&m| m > 0) {
            let done = &done;
            scope.spawn(move || heartbeat(heartbeat_interval(minutes), start, done));
        }
        let outcome = solver.search_with_outcome(args.marks, length);
        done.store(true, Ordering::Relaxed);
        outcome
    })?;
    let elapsed = start.elapsed();

    let Some(ruler) = outcome.ruler() else {
        if outcome.is_aborted() {
            eprintln!("Search stopped: {}", outcome.reason);
        }
        eprintln!(
            "Could not find a Golomb ruler with {} marks within length limit {}",
            args.marks, length
        );
        return Ok(ExitCode::FAILURE);
    };

    let optimal = table.is_optimal(ruler);

    println!("End time: {}", Local::now().format(TIMESTAMP_FORMAT));
    println!("Found ruler: {:?}", ruler.positions());
    println!("Elapsed time: {}", format_elapsed(elapsed));
    let distances = ruler.distances();
    println!("Distances ({}): {:?}", distances.len(), distances);
    let missing = ruler.missing_distances();
    println!("Missing ({}): {:?}", missing.len(), missing);
    println!("Status: {}", if optimal { "Optimal" } else { "Not optimal" });
    if args.verbose {
        println!("{}", outcome.statistics);
    }

    let path = args.report_path();
    let contents = report_contents(ruler, elapsed, &args.options(), optimal);
    write_report(&path, &contents)?;
    println!("Results written to: {}", path.display());

    Ok(if optimal {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Heartbeat period for `--vt <minutes>`; huge values saturate.
fn heartbeat_interval(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

/// Prints the elapsed time every `interval` until `done` is raised.
fn heartbeat(interval: Duration, start: Instant, done: &AtomicBool) {
    const POLL: Duration = Duration::from_millis(200);
    let mut next = interval;
    while !done.load(Ordering::Relaxed) {
        thread::sleep(POLL);
        let elapsed = start.elapsed();
        if elapsed >= next {
            println!("[VT] {} elapsed", format_elapsed(elapsed));
            next = next.saturating_add(interval);
        }
    }
}

/// `H:MM:SS.mmm` above an hour, `MM:SS.mmm` above a minute, `S.sss s` below.
fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1_000) % 60;
    let rest = millis % 1_000;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, rest)
    } else if minutes > 0 {
        format!("{:02}:{:02}.{:03}", minutes, seconds, rest)
    } else {
        format!("{:.3} s", millis as f64 / 1_000.0)
    }
}

fn report_contents(ruler: &Ruler, elapsed: Duration, options: &str, optimal: bool) -> String {
    format!(
        "{}seconds={:.6}\ntime={}\noptions={}\noptimal={}\n",
        ruler.report(),
        elapsed.as_secs_f64(),
        format_elapsed(elapsed),
        options,
        if optimal { "yes" } else { "no" }
    )
}

fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(1_234)), "1.234 s");
        assert_eq!(format_elapsed(Duration::from_millis(0)), "0.000 s");
        assert_eq!(format_elapsed(Duration::from_millis(61_005)), "01:01.005");
        assert_eq!(
            format_elapsed(Duration::from_millis(3_723_456)),
            "1:02:03.456"
        );
    }

    #[test]
    fn test_defaults() {
        let args = args(&["golomb", "6"]);
        assert_eq!(args.marks, 6);
        assert_eq!(args.max_length, 600);
        assert_eq!(args.mode(), SearchMode::Auto);
        assert_eq!(args.options(), "-mp");
        assert_eq!(args.report_path(), PathBuf::from("out/GOL_n6_mp.txt"));
    }

    #[test]
    fn test_suffix_and_options_follow_flags() {
        let args = args(&["golomb", "8", "-s", "-b", "-v"]);
        assert_eq!(args.mode(), SearchMode::Sequential);
        assert_eq!(args.file_suffix(), "_s_b_v");
        assert_eq!(args.options(), "-s -b -v");
        assert_eq!(args.report_path(), PathBuf::from("out/GOL_n8_s_b_v.txt"));
    }

    #[test]
    fn test_single_conflicts_with_mp() {
        assert!(Args::try_parse_from(["golomb", "5", "-s", "--mp"]).is_err());
    }

    #[test]
    fn test_report_contents() {
        let ruler = Ruler::from_positions([0, 1, 4, 6]).expect("valid ruler");
        let contents = report_contents(&ruler, Duration::from_millis(1_500), "-mp -b", true);

        assert!(contents.starts_with(&ruler.report().to_string()));
        assert!(contents.contains("seconds=1.500000\n"));
        assert!(contents.contains("time=1.500 s\n"));
        assert!(contents.contains("options=-mp -b\n"));
        assert!(contents.ends_with("optimal=yes\n"));
    }

    #[test]
    fn test_write_report_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("GOL_n4_mp.txt");

        write_report(&path, "length=6\n").expect("report written");
        assert_eq!(
            fs::read_to_string(&path).expect("report readable"),
            "length=6\n"
        );
    }

    #[test]
    fn test_run_writes_report_for_optimal_ruler() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.txt");
        let path_arg = path.to_string_lossy().into_owned();
        let args = args(&["golomb", "5", "-b", "-o", &path_arg]);

        let code = run(&args).expect("run succeeds");
        assert_eq!(code, ExitCode::SUCCESS);

        let contents = fs::read_to_string(&path).expect("report readable");
        assert!(contents.contains("length=11\n"));
        assert!(contents.contains("optimal=yes\n"));
        assert!(contents.contains("options=-mp -b\n"));
    }

    #[test]
    fn test_heartbeat_interval_saturates() {
        assert_eq!(heartbeat_interval(2), Duration::from_secs(120));
        assert_eq!(heartbeat_interval(u64::MAX), Duration::from_secs(u64::MAX));

        let args = args(&["golomb", "5", "--vt", "18446744073709551615"]);
        assert_eq!(args.heartbeat, Some(u64::MAX));
    }
}
