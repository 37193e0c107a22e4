mod resume;
mod rules;
mod run;

pub use resume::handle_resume;
pub use rules::handle_rules;
pub use run::handle_run;

use crate::autoplay::{self, TurnPlan};
use anyhow::{Context, Result};
use kanban_simulator_core_rs::{DayResult, GameEngine, GameMetrics};
use serde::Serialize;
use std::path::Path;

/// Output options shared by `run` and `resume`
pub struct SessionOptions<'a> {
    pub days: u32,
    pub json: bool,
    pub export: Option<&'a Path>,
}

/// Result of an autoplayed session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub start_day: u32,
    pub final_day: u32,
    pub days: Vec<DayResult>,
    pub metrics: GameMetrics,
}

/// Autoplay `days` days, print the outcome and optionally save the game
pub fn play_session(engine: &mut GameEngine, options: SessionOptions<'_>) -> Result<RunSummary> {
    let start_day = engine.current_day();
    let mut days = Vec::with_capacity(options.days as usize);

    for _ in 0..options.days {
        let (plan, result) = autoplay::play_day(engine).context("Failed to process day")?;
        if !options.json {
            print_day(&plan, &result);
        }
        days.push(result);
    }

    let summary = RunSummary {
        start_day,
        final_day: engine.current_day(),
        days,
        metrics: engine.metrics(),
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_metrics(&summary.metrics);
    }

    if let Some(path) = options.export {
        let saved = engine.export_state().context("Failed to export game state")?;
        std::fs::write(path, saved)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !options.json {
            println!("Saved game to {}", path.display());
        }
    }

    Ok(summary)
}

fn print_day(plan: &TurnPlan, result: &DayResult) {
    let dice = result
        .dice_results
        .iter()
        .map(|(agent, dice)| format!("{} {}", agent, dice))
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "Day {:>3} | {} | {} moved, {} pulled, {} staffed | {} card(s) worked | cost ${}",
        result.day,
        dice,
        plan.advanced,
        plan.pulled,
        plan.staffed,
        result.work_report.len(),
        result.daily_cost
    );
    for event in &result.events {
        println!("        ! {}: {}", event.title, event.description);
    }
    if result.horizon_reached {
        println!("        horizon reached");
    }
}

fn print_metrics(metrics: &GameMetrics) {
    println!();
    println!("Deployed:      {}", metrics.deployed_count);
    println!("Total value:   ${}", metrics.total_value);
    println!("Total cost:    ${}", metrics.total_cost);
    println!("Profit:        ${}", metrics.profit);
    println!("Avg lead time: {:.1} days", metrics.avg_lead_time);
    println!("Throughput:    {:.2} cards/day", metrics.throughput);
    println!("Blocked:       {}", metrics.blocked_count);
}
