//! `crosspost status` — inspect the persisted publish state.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use crosspost_core::{types::PublishedRecord, Config};
use crosspost_store::StateStore;

/// Arguments for `crosspost status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to an env file; omit to use process environment variables only.
    #[arg(long, short = 'e')]
    pub env_file: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let config =
            Config::from_env(self.env_file.as_deref()).context("configuration is incomplete")?;
        let store = crosspost_store::from_config(&config);
        let records = store.load().context("failed to load publish state")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&records)
                    .context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        print_table(&records);
        Ok(())
    }
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "canonical url")]
    url: String,
    #[tabled(rename = "published")]
    published: String,
}

fn print_table(records: &[PublishedRecord]) {
    println!(
        "Crosspost v{} | {} published articles",
        env!("CARGO_PKG_VERSION"),
        records.len(),
    );

    if records.is_empty() {
        println!("No articles published yet. Run 'crosspost run' first.");
        return;
    }

    let rows: Vec<StatusTableRow> = records
        .iter()
        .map(|record| StatusTableRow {
            id: record.id.to_string(),
            url: record.url.clone(),
            published: format!("{} ago", format_age(record.publish_timestamp)),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn format_age(timestamp: DateTime<Utc>) -> String {
    let seconds = Utc::now()
        .signed_duration_since(timestamp)
        .num_seconds()
        .max(0) as u64;
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}
