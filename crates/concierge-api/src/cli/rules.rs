//! `concierge rules`: the intent table in evaluation order.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use concierge_core::assistant::RuleSummary;

use crate::state::AppState;

pub fn list_rules(state: &AppState, json: bool) -> Result<()> {
    let summaries: Vec<RuleSummary> = state.resolver.rules().iter().map(|r| r.summary()).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Rule").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Keywords").fg(Color::White),
        Cell::new("Navigates to").fg(Color::White),
    ]);

    for (position, rule) in summaries.iter().enumerate() {
        add_row(&mut table, (position + 1).to_string(), rule, false);
        for nested in &rule.nested {
            add_row(&mut table, String::new(), nested, true);
        }
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {}",
        console::style("First match wins; unmatched messages get the fallback reply.").dim()
    );
    println!();

    Ok(())
}

fn add_row(table: &mut Table, position: String, rule: &RuleSummary, nested: bool) {
    let name = if nested {
        Cell::new(format!("  \u{2514} {}", rule.name)).fg(Color::DarkCyan)
    } else {
        Cell::new(rule.name).fg(Color::Cyan)
    };

    table.add_row(vec![
        Cell::new(position).fg(Color::DarkGrey),
        name,
        Cell::new(rule.category.to_string()),
        Cell::new(rule.keywords.join(", ")),
        Cell::new(rule.navigate.unwrap_or("-")).fg(Color::DarkGrey),
    ]);
}
