use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the career guidance workspace",
    long_about = "A unified CLI for local queries, smoke runs, CI checks and\n\
                  Lambda packaging in the career guidance workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the in-process orchestrator a question
    Ask {
        /// Free-text query
        query: String,
    },
    /// Run the fixed smoke sequence against in-process agents
    Smoke,
    /// Run CI checks (fmt, clippy, tests, smoke)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build and package Rust Lambda artifacts for deployment
    ServerlessPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for binaries
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving the zip artifacts
        #[arg(long, default_value = "dist/lambda")]
        dist_dir: String,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run the in-process smoke sequence
    Smoke,
    /// Run check + smoke
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
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

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

const LAMBDA_PACKAGE: &str = "career_guidance_lambda";
const LAMBDA_BINARIES: [(&str, &str); 2] = [
    ("orchestrator_lambda", "orchestrator.zip"),
    ("agent_lambda", "agent.zip"),
];

fn package_serverless_lambdas(target: &str, profile: BuildProfile, dist_dir: &Path) {
    check_target_installed(target);

    step("Build serverless lambda binaries");
    let mut cargo_args = vec!["build", "-p", LAMBDA_PACKAGE, "--target", target];
    for (bin_name, _) in LAMBDA_BINARIES {
        cargo_args.extend(["--bin", bin_name]);
    }
    cargo_args.extend(profile.as_cargo_flag());
    run_cargo(&cargo_args);

    step("Package lambda zip artifacts");
    let build_dir = Path::new("target").join(target).join(profile.dir_name());
    if let Err(error) = fs::create_dir_all(dist_dir) {
        fail(format!("cannot create {}: {error}", dist_dir.display()));
    }

    for (bin_name, zip_name) in LAMBDA_BINARIES {
        let zip_path = dist_dir.join(zip_name);
        if let Err(error) = write_bootstrap_zip(&build_dir.join(bin_name), &zip_path) {
            fail(format!("cannot package {bin_name}: {error}"));
        }
        eprintln!("packaged {}", zip_path.display());
    }
    eprintln!(
        "Deploy agent.zip once per agent with AGENT_KIND set to job_market, course_catalog, career_matching or project_advisor."
    );
}

fn fail(message: String) -> ! {
    eprintln!("error: {message}");
    exit(1);
}

/// Stops early when rustup reports the target missing; skipped if rustup is absent.
fn check_target_installed(target: &str) {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    else {
        eprintln!("warning: rustup not found, skipping target check for {target}");
        return;
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if output.status.success() && !installed.lines().any(|line| line.trim() == target) {
        fail(format!("rust target {target} is missing; run `rustup target add {target}`"));
    }
}

/// Lambda custom runtimes expect a single executable named `bootstrap`.
fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) -> zip::result::ZipResult<()> {
    let binary = fs::read(binary_path)?;
    let mut zip = ZipWriter::new(fs::File::create(zip_path)?);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(&binary)?;
    zip.finish()?;
    Ok(())
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

    step("Test career_guidance_core");
    run_cargo(&["test", "-p", "career_guidance_core"]);

    step("Test career_guidance_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

fn ci_smoke() {
    step("Run smoke sequence against in-process agents");
    run_smoke();
}

fn run_smoke() {
    run_cargo(&[
        "run",
        "-p",
        LAMBDA_PACKAGE,
        "--bin",
        "guidance_cli",
        "--",
        "smoke",
    ]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask { query } => {
            run_cargo(&[
                "run",
                "-p",
                LAMBDA_PACKAGE,
                "--bin",
                "guidance_cli",
                "--",
                "ask",
                &query,
            ]);
        }
        Commands::Smoke => run_smoke(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Smoke => ci_smoke(),
                CiJob::All => {
                    ci_check();
                    ci_smoke();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage {
            target,
            profile,
            dist_dir,
        } => {
            package_serverless_lambdas(&target, profile, Path::new(&dist_dir));
        }
    }
}
