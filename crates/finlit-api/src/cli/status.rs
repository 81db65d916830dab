//! `finlit status` -- configuration and store statistics.

use anyhow::Result;
use console::style;

use finlit_infra::sqlite::pool::redact_database_url;

use crate::state::AppState;

/// Display the resolved configuration and the number of stored exchanges.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let records = state.relay_service.record_count().await?;
    let database = redact_database_url(&state.database_url);
    let config = &state.config;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
            "ai_service_url": config.ai_service_url,
            "ai_timeout_secs": config.ai_timeout_secs,
            "listen": format!("{}:{}", config.host, config.port),
            "records": records,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} FinLit relay v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Store ──").dim());
    println!("  Database: {}", style(&database).dim());
    println!("  Records:  {}", style(records).bold());
    println!();

    println!("  {}", style("── Inference ──").dim());
    println!("  Endpoint: {}", style(&config.ai_service_url).cyan());
    println!("  Timeout:  {}s", config.ai_timeout_secs);
    println!();

    println!("  {}", style("── Server ──").dim());
    println!("  Listen:   {}:{}", config.host, config.port);
    println!();

    Ok(())
}
