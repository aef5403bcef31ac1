//! `crosspost run` — the end-to-end publish pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crosspost_core::Config;
use crosspost_engine::{pipeline, PublishOutcome, RunReport};

/// Arguments for `crosspost run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to an env file; omit to use process environment variables only.
    #[arg(long, short = 'e')]
    pub env_file: Option<PathBuf>,

    /// Compute and report the work set without publishing or saving.
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let config =
            Config::from_env(self.env_file.as_deref()).context("configuration is incomplete")?;
        let store = crosspost_store::from_config(&config);
        let report =
            pipeline::run(&config, store.as_ref(), self.dry_run).context("run failed")?;
        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &RunReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    for outcome in &report.outcomes {
        match outcome {
            PublishOutcome::Published { url, .. } => {
                println!("  {}  {url}", "✓".green().bold());
            }
            PublishOutcome::WouldPublish { url, .. } => {
                println!("  {}  {url}", "~".yellow().bold());
            }
            PublishOutcome::Failed { url, reason, .. } => {
                println!("  {}  {url}: {reason}", "✗".red().bold());
            }
        }
    }

    if report.outcomes.is_empty() {
        println!(
            "{prefix}{} nothing to publish ({} candidates, {} already published)",
            "✓".green().bold(),
            report.candidates,
            report.prior,
        );
        return;
    }

    if dry_run {
        println!(
            "{prefix}{} articles would be published ({} candidates, {} already published)",
            report.outcomes.len(),
            report.candidates,
            report.prior,
        );
        return;
    }

    println!(
        "{} {} published, {} failed ({} candidates, {} previously published)",
        "✓".green().bold(),
        report.published(),
        report.failed(),
        report.candidates,
        report.prior,
    );
    if report.failed() > 0 {
        println!("Failed articles stay unrecorded and will be retried on the next run.");
    }
}
