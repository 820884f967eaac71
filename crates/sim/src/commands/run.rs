//! Run a scenario.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use combat_runtime::{
    CombatStateRepository, FileCombatRepository, InMemoryCombatRepo, RuntimeConfig,
};
use console::style;
use fleet_content::{ConfigLoader, ScenarioLoader};
use fleet_core::{EngagementDecision, ShipCombatState};

use crate::dirs;
use crate::simulation::{Simulation, TickReport};

/// Run a scenario for a number of ticks
#[derive(Parser)]
pub struct Run {
    /// Scenario file (RON)
    #[arg(short, long, value_name = "FILE")]
    scenario: PathBuf,

    /// Combat configuration (TOML); overrides the scenario's settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 10)]
    ticks: u32,

    /// Pace ticks at this interval instead of running flat out
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Where combat tables are saved (defaults to platform-specific location)
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Keep combat tables in memory only
    #[arg(long, conflicts_with_all = ["save_dir", "resume"])]
    no_save: bool,

    /// Restore combat tables saved by a previous run before the first tick
    #[arg(long)]
    resume: bool,
}

impl Run {
    pub async fn execute(self) -> Result<()> {
        let scenario = ScenarioLoader::load(&self.scenario)?;
        let combat = match &self.config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => scenario.combat.clone().unwrap_or_default(),
        };
        let mut config = RuntimeConfig::new(combat);
        if !self.no_save {
            config = config.with_save_dir(self.save_dir.clone().unwrap_or_else(dirs::save_dir));
        }

        let mut sim = Simulation::from_scenario(&scenario, &config)?;
        let repo: Box<dyn CombatStateRepository> = match &config.save_dir {
            Some(dir) => Box::new(
                FileCombatRepository::new(dir)
                    .with_context(|| format!("Failed to open save directory: {}", dir.display()))?,
            ),
            None => Box::new(InMemoryCombatRepo::new()),
        };

        if self.resume {
            let restored: usize = sim.load(&*repo)?.iter().map(|report| report.restored).sum();
            println!("{} {} combat states", style("Restored").bold().cyan(), restored);
        }

        println!(
            "{} {} ({} ticks)",
            style("Scenario:").bold().cyan(),
            scenario.name,
            self.ticks
        );

        let mut interval = self
            .tick_ms
            .map(|ms| tokio::time::interval(Duration::from_millis(ms.max(1))));

        for tick in 1..=self.ticks {
            if let Some(interval) = interval.as_mut() {
                interval.tick().await;
            }
            let reports = sim.tick();
            print_tick(tick, &reports);
        }

        println!(
            "{} {} ships afloat",
            style("Done:").bold().cyan(),
            sim.world().read().ships.len()
        );
        for manager in sim.managers() {
            let table = manager.table();
            let attacking = table
                .iter()
                .filter(|(_, state)| *state == ShipCombatState::Attacking)
                .count();
            println!("  {} {} ships, {} attacking", manager.owner(), table.len(), attacking);
        }

        let rows = sim.save(&*repo)?;
        if let Some(dir) = &config.save_dir {
            println!(
                "{} {} combat states to {}",
                style("Saved").bold().green(),
                rows,
                dir.display()
            );
        }
        Ok(())
    }
}

fn print_tick(tick: u32, reports: &[TickReport]) {
    let decisions: usize = reports.iter().map(|report| report.decisions.len()).sum();
    println!("{}", style(format!("=== Tick {} ({} decisions) ===", tick, decisions)).bold().yellow());

    for report in reports {
        for decision in &report.decisions {
            println!("  {} {}", report.owner, describe(decision));
        }
        let summary = &report.summary;
        if summary.aborted + summary.pauses_denied > 0 {
            println!(
                "  {} {} aborted, {} pauses denied",
                report.owner, summary.aborted, summary.pauses_denied
            );
        }
        for ship in &report.sunk {
            println!("  {} {}", style("sunk").red(), ship);
        }
    }
}

fn describe(decision: &EngagementDecision) -> String {
    let group: Vec<String> = decision.group.iter().map(|ship| ship.to_string()).collect();
    let mut line = format!("{} [{}] {}", decision.kind, group.join(", "), decision.trigger);
    if !decision.enemies().is_empty() {
        line.push_str(&format!(" vs {} ships", decision.enemies().len()));
    }
    if let Some(balance) = &decision.power_balance {
        line.push_str(&format!(" (balance {})", balance));
    }
    line
}
