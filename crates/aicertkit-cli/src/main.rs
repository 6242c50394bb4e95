use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use aicertkit_core::{
    artifact_paths, render_bundle, EmbeddedRuleRepository, RepoScanner, RuleRepository, ScanError,
    ScanOptions, DEFAULT_BUNDLE_DIR,
};
use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const EXIT_RUNTIME_ERROR: u8 = 1;
const EXIT_INPUT_ERROR: u8 = 2;
const EXIT_USAGE: u8 = 64;

#[derive(Parser, Debug)]
#[command(
    name = "aicertkit",
    author,
    version,
    about = "Scan a repo & output an AI-Act-ready Compliance Bundle"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a repository and write the Compliance Bundle
    Scan {
        /// Path to the repository to scan
        repo: PathBuf,
        /// Output directory for the bundle (default: <repo>/compliance_bundle)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Path to an AI Act rules file (accepted, currently ignored)
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
        /// Also scan dot-prefixed files and directories
        #[arg(long)]
        include_hidden: bool,
    },
    /// List the embedded AI Act obligations
    Rules {
        /// Emit the rule table as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_error(err),
    };
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ScanError>() {
            Some(scan_err) => {
                eprintln!("[!] {scan_err}");
                ExitCode::from(EXIT_INPUT_ERROR)
            }
            None => {
                eprintln!("[!] {err:#}");
                ExitCode::from(EXIT_RUNTIME_ERROR)
            }
        },
    }
}

fn usage_error(err: clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(EXIT_USAGE),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan {
            repo,
            out,
            rules,
            include_hidden,
        } => scan(&repo, out, rules.as_deref(), include_hidden),
        Commands::Rules { json } => list_rules(json),
    }
}

fn scan(
    repo: &Path,
    out: Option<PathBuf>,
    rules: Option<&Path>,
    include_hidden: bool,
) -> Result<()> {
    if let Some(rules) = rules {
        warn!(
            path = %rules.display(),
            "rules files are not supported yet; using the embedded rule table"
        );
    }
    let out_dir = out.unwrap_or_else(|| repo.join(DEFAULT_BUNDLE_DIR));
    let options = ScanOptions {
        include_hidden,
        skip_files: artifact_paths(&out_dir),
        ..ScanOptions::default()
    };

    let scanner = RepoScanner::with_options(Arc::new(EmbeddedRuleRepository), options);
    let report = scanner.scan(repo)?;
    let written = render_bundle(&report, &out_dir)
        .with_context(|| format!("failed to write bundle to {}", out_dir.display()))?;

    println!("[+] Compliance Bundle written:");
    for artifact in written {
        println!("    - {}: {}", artifact.name, artifact.path.display());
    }
    Ok(())
}

fn list_rules(json: bool) -> Result<()> {
    let rules = EmbeddedRuleRepository
        .load_rules()
        .context("failed to load embedded rules")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    println!(
        "{} obligation(s), rule table v{}",
        rules.obligations.len(),
        rules.version
    );
    for ob in rules.obligations {
        println!(
            "- {id:<16} [{severity:6}] {applies:<34} :: {name}",
            id = ob.id,
            severity = ob.severity.as_str(),
            applies = ob.applies_if.join(", "),
            name = ob.name
        );
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
