// apflow/src/commands/query.rs
//
// USE CASE: Execute a raw SQL query (ad-hoc).

use std::path::PathBuf;

use apflow_core::application::execute_query;

use super::{load_config, open_existing_database, result_table};

pub async fn execute(project_dir: PathBuf, query: String) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let connector = open_existing_database(&project_dir, &config)?;

    match execute_query(&connector, &query).await {
        Ok(result) => {
            println!("{}", result_table(&result));
            println!("({} rows)", result.rows.len());
        }
        Err(e) => {
            eprintln!("❌ Query failed:");
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }
    Ok(())
}
