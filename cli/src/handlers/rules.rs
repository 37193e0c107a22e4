use anyhow::{Context, Result};
use kanban_simulator_core_rs::rules::{rules_fingerprint, RuleTable};
use kanban_simulator_core_rs::Column;
use serde_json::json;

pub fn handle_rules(json: bool) -> Result<()> {
    let table = RuleTable::standard();
    let fingerprint = rules_fingerprint().context("Failed to fingerprint rule table")?;

    if json {
        let doc = json!({ "rules": table, "fingerprint": fingerprint });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Columns:");
    for column in Column::ALL {
        let limit = match table.wip_limits.get(&column).copied().flatten() {
            Some(limit) => limit.to_string(),
            None => "unlimited".to_string(),
        };
        println!("  {:<12} WIP {}", column.to_string(), limit);
    }
    println!(
        "Specialists:   at most {} per work column, ${} each per day",
        table.max_specialists_per_column, table.daily_cost_per_specialist
    );
    println!(
        "Random events: bug {:.0}%, absence {:.0}%, tester detection {:.0}%",
        table.bug_chance_per_day * 100.0,
        table.absence_chance_per_day * 100.0,
        table.tester_bug_detection * 100.0
    );
    println!(
        "Late penalty:  {:.0}% per day, at most {:.0}%",
        table.late_penalty_per_day * 100.0,
        table.max_late_penalty * 100.0
    );
    println!("Fingerprint:   {}", fingerprint);
    Ok(())
}
