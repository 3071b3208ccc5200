use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the carline workspace",
    long_about = "A unified CLI for running the lane demo, benchmarks,\n\
                  and CI checks in the carline workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Order the bundled demo lane snapshot
    Demo {
        /// Snapshot JSON file
        #[arg(long, default_value = "demos/lane_a.json")]
        snapshot: String,
    },
    /// Issue a placard token through the carline binary
    Placard {
        #[arg(long, default_value = "A-1247")]
        placard_code: String,
        #[arg(long, default_value = "ride1")]
        ride_id: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, demo, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run the demo lane through the binary
    Demo,
    /// Run benchmarks
    Bench,
    /// Run check + demo + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn git(args: &[&str]) -> ExitStatus {
    eprintln!("+ git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .status()
        .expect("failed to execute git")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = git(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_demo(snapshot: &str) {
    if !Path::new(snapshot).exists() {
        panic!("expected demo snapshot at '{snapshot}'");
    }
    run_cargo(&[
        "run",
        "-p",
        "carline_lane",
        "--bin",
        "carline",
        "--",
        "queue",
        "--snapshot",
        snapshot,
    ]);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test carline_core");
    run_cargo(&["test", "-p", "carline_core"]);

    step("Test carline_lane");
    run_cargo(&["test", "-p", "carline_lane"]);
}

fn ci_demo() {
    step("Order demo lane");
    run_demo("demos/lane_a.json");
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "carline_core", "--bench", "ordering"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { snapshot } => run_demo(&snapshot),
        Commands::Placard {
            placard_code,
            ride_id,
        } => {
            run_cargo(&[
                "run",
                "-p",
                "carline_lane",
                "--bin",
                "carline",
                "--",
                "placard",
                "encode",
                "--placard-code",
                &placard_code,
                "--ride-id",
                &ride_id,
            ]);
        }
        Commands::Bench => {
            run_cargo(&["bench", "--package", "carline_core", "--bench", "ordering"]);
        }
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                std::fs::remove_dir_all(baseline_dir).expect("failed to remove target/criterion");
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_cargo(&[
                "bench",
                "--package",
                "carline_core",
                "--bench",
                "ordering",
                "--",
                "--save-baseline",
                "main",
            ]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_cargo(&[
                "bench",
                "--package",
                "carline_core",
                "--bench",
                "ordering",
                "--",
                "--baseline",
                "main",
            ]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Demo => ci_demo(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_demo();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
