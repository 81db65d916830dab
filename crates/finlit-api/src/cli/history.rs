//! `finlit history` -- print recent chat exchanges.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// Print the most recent exchanges, oldest first.
pub async fn show_history(state: &AppState, limit: Option<u32>, json: bool) -> Result<()> {
    let records = state.relay_service.history(limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!();
        println!("  {}", style("No chat history yet.").dim());
        println!(
            "  Start the server with {} and send a message to {}.",
            style("finlit serve").yellow(),
            style("POST /api/chat").cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Time").fg(Color::White),
        Cell::new("Message").fg(Color::White),
        Cell::new("Response").fg(Color::White),
    ]);

    for record in &records {
        table.add_row(vec![
            Cell::new(record.timestamp.format("%Y-%m-%d %H:%M:%S")).fg(Color::DarkGrey),
            Cell::new(truncate(&record.message, 60)).fg(Color::Cyan),
            Cell::new(truncate(&record.response, 80)),
        ]);
    }

    println!("{table}");
    println!(
        "  {}",
        style(format!("{} exchange(s), oldest first", records.len())).dim()
    );

    Ok(())
}

/// Shorten `text` to at most `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
