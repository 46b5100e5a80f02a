// apflow/src/commands/run.rs
//
// USE CASE: Run the pipeline.

use chrono::Utc;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

use apflow_core::application::run_pipeline;
use apflow_core::domain::report::RunResult;
use apflow_core::infrastructure::compiler::JinjaRenderer;
use apflow_core::ports::Connector;

use super::{database_path, load_config, open_database};

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_config(&project_dir)?;
    println!("   Project: {} (v{})", config.name, config.version);

    // B. Instantiate the DB Adapter
    let db_path = database_path(&project_dir, &config);
    let connector = open_database(&db_path)?;
    println!("   Engine: DuckDB 🦆 ({})", db_path);
    if config.strict {
        println!("   🔒 Strict mode: ON");
    }

    // C. Run the Pipeline (Application Layer)
    let template_engine = JinjaRenderer::new();
    let result = run_pipeline(
        &template_engine,
        &project_dir,
        &config,
        &connector as &dyn Connector,
        Utc::now(),
    )
    .await;

    match result {
        Ok(run_res) => {
            println!("{}", stage_table(&run_res));
            let warnings = run_res.warnings().count();
            if warnings > 0 {
                println!("⚠️  {} check(s) reported warnings, see run_results.json", warnings);
            }
            println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR:");
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }

    Ok(())
}

fn stage_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Stage", "Kind", "Rows", "Reads"]);
    for stage in &result.stages {
        table.add_row(vec![
            stage.name.clone(),
            format!("{:?}", stage.kind).to_lowercase(),
            stage
                .row_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            stage.upstream.join(", "),
        ]);
    }
    table
}
