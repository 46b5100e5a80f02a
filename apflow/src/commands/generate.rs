// apflow/src/commands/generate.rs
//
// USE CASE: Write synthetic SAP extracts.

use std::path::PathBuf;

use apflow_core::application::{GenerateOptions, generate_dataset, write_dataset};

pub fn execute(
    out_dir: PathBuf,
    seed: u64,
    vendors: usize,
    documents_per_year: usize,
    years: Vec<i32>,
) -> anyhow::Result<()> {
    println!("🏭 Generating SAP sample data (seed {})...", seed);
    println!("   Vendors: {}", vendors);
    println!("   Documents per year: {}", documents_per_year);
    println!(
        "   Years: {}",
        years.iter().map(|y| y.to_string()).collect::<Vec<_>>().join(", ")
    );

    let options = GenerateOptions {
        seed,
        vendors,
        documents_per_year,
        years,
    };
    let dataset = generate_dataset(&options)?;
    let written = write_dataset(&dataset, &out_dir)?;

    let stats = dataset.stats();
    println!("\nLFA1 - Vendor Master:");
    println!("   Total vendors: {}", stats.vendors);
    println!("   Cities: {}", stats.cities);

    println!("\nBKPF - Document Headers:");
    println!("   Total documents: {}", stats.documents);
    for (doc_type, count) in &stats.documents_by_type {
        let pct = if stats.documents > 0 {
            *count as f64 / stats.documents as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "   {} ({}): {:4} ({:4.1}%)",
            doc_type,
            doc_type.description(),
            count,
            pct
        );
    }

    println!("\nBSEG - Line Items:");
    println!("   Total line items: {}", stats.line_items);
    println!("   K (Vendor): {}", stats.vendor_lines);
    println!("   S (GL Account): {}", stats.gl_lines);
    println!("   Vendors used: {}", stats.vendors_used);

    println!("\n✅ Files created:");
    for extract in written {
        println!("   {} ({} rows)", extract.path.display(), extract.rows);
    }
    Ok(())
}
