//! devinit - idempotent Ubuntu workstation provisioner
//!
//! Usage:
//!   devinit                  Apply the provisioning sequence
//!   devinit run              Same, with flags
//!   devinit plan             Show which steps would run, apply nothing
//!   devinit versions         Print installed tool versions

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use devinit::config::Config;
use devinit::probe::LiveProbe;
use devinit::step::{Outcome, Presence, StepContext};
use devinit::steps::{self, RunOptions, report};
use devinit::{executor, lock, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devinit")]
#[command(about = "Idempotent developer workstation provisioner for Ubuntu")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a TOML config overriding pinned versions and targets
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Home directory override (mainly for testing)
    #[arg(long, global = true, env = "DEVINIT_HOME")]
    home: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the provisioning sequence (default)
    Run {
        /// Register nu as the login shell after installing it
        #[arg(long)]
        set_login_shell: bool,

        /// Skip the snap application steps
        #[arg(long)]
        skip_snaps: bool,
    },

    /// Show which steps would run, applying nothing
    Plan {
        /// Skip the snap application steps
        #[arg(long)]
        skip_snaps: bool,
    },

    /// Print installed tool versions
    Versions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let home = match cli.home {
        Some(h) => h,
        None => dirs::home_dir().context("cannot determine home directory")?,
    };

    let command = cli.command.unwrap_or(Commands::Run {
        set_login_shell: false,
        skip_snaps: false,
    });

    match command {
        Commands::Run {
            set_login_shell,
            skip_snaps,
        } => {
            let opts = RunOptions {
                set_login_shell,
                skip_snaps,
            };
            run_sequence(&config, home, opts)
        }

        Commands::Plan { skip_snaps } => {
            let opts = RunOptions {
                skip_snaps,
                ..Default::default()
            };
            let probe = LiveProbe::new();
            let sequence = steps::sequence(&config, &home, opts);
            let entries = executor::plan(&sequence, &probe)?;

            for (name, presence) in &entries {
                match presence {
                    Presence::Present(reason) => {
                        output::skip(&format!("{}: {}", name, reason));
                    }
                    Presence::Absent => {
                        output::info(&format!("{}: would install", name));
                    }
                }
            }

            let pending = entries
                .iter()
                .filter(|(_, p)| *p == Presence::Absent)
                .count();
            output::action(&format!("{} of {} steps would run", pending, entries.len()));
            Ok(())
        }

        Commands::Versions => {
            report::print_versions(&home);
            Ok(())
        }
    }
}

fn run_sequence(config: &Config, home: PathBuf, opts: RunOptions) -> Result<()> {
    let _lock = lock::acquire_run_lock(&home.join(".cache/devinit/run.lock"))?;

    let staging = tempfile::Builder::new()
        .prefix("devinit-")
        .tempdir()
        .context("failed to create staging directory")?;

    let probe = LiveProbe::new();
    let sequence = steps::sequence(config, &home, opts);
    let ctx = StepContext {
        config,
        home: home.clone(),
        staging: staging.path().to_path_buf(),
        probe: &probe,
    };

    let report = executor::run(&sequence, &ctx);

    if let Some(failed) = report.failure() {
        // Keep staged downloads for inspection; only a successful run
        // cleans up after itself.
        let kept = staging.keep();
        output::warning(&format!("staged downloads kept at {}", kept.display()));

        let reason = match &failed.outcome {
            Outcome::Failed(msg) => msg.clone(),
            _ => "unknown failure".to_string(),
        };
        anyhow::bail!("provisioning aborted at step '{}': {}", failed.step, reason);
    }

    drop(staging);

    output::success(&format!(
        "provisioning complete: {} installed, {} already present",
        report.installed_count(),
        report.skipped_count()
    ));

    report::print_versions(&home);
    Ok(())
}
