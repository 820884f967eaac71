//! Read and inspect saved combat tables.
//!
//! Loads combat_{owner}.bin files and displays their rows.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use combat_runtime::{CombatStateRepository, FileCombatRepository};
use console::style;
use fleet_core::{CombatRow, OwnerId, ShipCombatState};

use crate::dirs;

/// Print a saved combat state table
#[derive(Parser)]
pub struct Inspect {
    /// Owner whose table to print
    #[arg(short, long, value_name = "ID")]
    owner: u32,

    /// Custom save directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per ship plus per-state counts
    Summary,
    /// Raw rows as JSON
    Json,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let save_dir = self.save_dir.unwrap_or_else(dirs::save_dir);
        let repo = FileCombatRepository::new(&save_dir)
            .with_context(|| format!("Failed to open save directory: {}", save_dir.display()))?;

        let owner = OwnerId(self.owner);
        let Some(rows) = repo.load(owner)? else {
            let saved: Vec<String> = repo
                .list_owners()?
                .iter()
                .map(|owner| owner.0.to_string())
                .collect();
            anyhow::bail!(
                "No combat table saved for {} in {}\n\nHint: saved owners: [{}]",
                owner,
                save_dir.display(),
                saved.join(", ")
            );
        };

        match self.format {
            OutputFormat::Summary => print_summary(owner, &rows),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        }
        Ok(())
    }
}

fn state_name(ordinal: u8) -> String {
    match ShipCombatState::from_ordinal(ordinal) {
        Ok(state) => state.to_string(),
        Err(_) => format!("unknown({})", ordinal),
    }
}

fn print_summary(owner: OwnerId, rows: &[CombatRow]) {
    println!("{} {}", style("Combat table of").bold().cyan(), owner);
    println!("{} {}", style("Ships:").bold().cyan(), rows.len());
    println!();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        let state = state_name(row.state_ordinal);
        println!("  ship#{:<6} {}", row.ship_id, state);
        *counts.entry(state).or_default() += 1;
    }

    println!();
    println!("{}", style("By state:").bold().yellow());
    for (state, count) in counts {
        println!("  {:<16} {}", state, count);
    }
}
