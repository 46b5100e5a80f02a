// apflow/src/commands/inspect.rs
//
// USE CASE: Inspect a table (schema + sample rows).

use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

use apflow_core::application::execute_query;
use apflow_core::domain::compiler::quote_identifier;
use apflow_core::ports::Connector;

use super::{load_config, open_existing_database, result_table};

pub async fn execute(project_dir: PathBuf, table: String, limit: usize) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let connector = open_existing_database(&project_dir, &config)?;
    let quoted = quote_identifier(&table)?;

    println!("\n🔍 Inspecting Table: '{}'", table);

    let columns = connector.fetch_columns(&table).await?;
    if columns.is_empty() {
        anyhow::bail!("❌ Table '{}' not found", table);
    }
    let mut schema = Table::new();
    schema.load_preset(UTF8_FULL);
    schema.set_header(vec!["Column", "Type", "Nullable"]);
    for c in &columns {
        schema.add_row(vec![
            c.name.clone(),
            c.data_type.clone(),
            if c.is_nullable { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{schema}");

    println!("   --- Rows (Limit {}) ---", limit);
    let rows = execute_query(&connector, &format!("SELECT * FROM {} LIMIT {}", quoted, limit)).await?;
    println!("{}", result_table(&rows));
    Ok(())
}
