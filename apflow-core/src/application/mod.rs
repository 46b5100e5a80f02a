// apflow-core/src/application/mod.rs

pub mod clean;
pub mod engine;
pub mod materialization;
pub mod ports;
pub mod report;
pub mod sample_data;

pub mod pipeline;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI can write `use apflow_core::application::{run_pipeline, clean_project};`
// without knowing the file layout.

pub use clean::clean_project;
pub use engine::execute_query;
pub use materialization::Materializer;
pub use pipeline::run_pipeline;
pub use report::{load_quality_summary, load_vendor_summaries};
pub use sample_data::{
    DatasetStats, GenerateOptions, SampleDataset, WrittenExtract, generate_dataset, write_dataset,
};
pub use validation::run_checks;
