// apflow/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug apflow run ... to see the executed SQL
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { project_dir } => commands::run::execute(project_dir).await,
        Commands::Generate {
            out_dir,
            seed,
            vendors,
            documents_per_year,
            years,
        } => commands::generate::execute(out_dir, seed, vendors, documents_per_year, years),
        Commands::Summary {
            project_dir,
            vendors,
        } => commands::summary::execute(project_dir, vendors).await,
        Commands::Inspect {
            table,
            limit,
            project_dir,
        } => commands::inspect::execute(project_dir, table, limit).await,
        Commands::Query { query, project_dir } => commands::query::execute(project_dir, query).await,
        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
    }
}
