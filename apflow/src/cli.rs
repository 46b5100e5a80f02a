// apflow/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apflow")]
#[command(about = "SAP Accounts Payable ETL: BKPF / BSEG / LFA1 extracts to an analytical fact table", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the pipeline (extracts -> staging -> fact -> summary views)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🏭 Writes synthetic SAP extracts (LFA1, BKPF, BSEG) as CSV
    Generate {
        /// Output directory
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,

        /// Random seed, same seed means same files
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of vendors in the master
        #[arg(long, default_value_t = 100)]
        vendors: usize,

        /// Accounting documents per fiscal year
        #[arg(long, default_value_t = 500)]
        documents_per_year: usize,

        /// Fiscal years, comma separated
        #[arg(long, value_delimiter = ',', default_value = "2023,2024")]
        years: Vec<i32>,
    },

    /// 📊 Prints the data quality summary and the top vendors
    Summary {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Number of vendors to list
        #[arg(long, default_value_t = 10)]
        vendors: usize,
    },

    /// 🔍 Inspects a table (schema + sample rows)
    Inspect {
        /// Table or view name
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// ⚡ Executes a raw SQL query (Ad-hoc)
    Query {
        query: String,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🧹 Cleans build artifacts (clean-targets of the project)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
