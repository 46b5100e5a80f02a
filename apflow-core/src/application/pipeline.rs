// apflow-core/src/application/pipeline.rs

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::error::ApflowError;
use crate::ports::connector::Connector;

// Application Services
use crate::application::materialization::Materializer;
use crate::application::ports::TemplateEngine;
use crate::application::validation;

// Domain
use crate::domain::compiler::{quote_identifier, referenced_relations};
use crate::domain::error::DomainError;
use crate::domain::project::{NetDueDateBasis, ProjectConfig};
use crate::domain::report::{
    CheckStatus, Manifest, ManifestSource, ManifestStage, RunResult, StageOutcome,
};
use crate::domain::transform::{StageDefinition, StageKind, StagePlan};

// Infrastructure
use crate::infrastructure::extracts::resolve_extracts;
use crate::infrastructure::fs::{atomic_write, write_json};

/// A stage rendered to its final DDL, ready to run.
struct CompiledStage<'a> {
    stage: &'a StageDefinition,
    ddl: String,
    upstream: Vec<String>,
}

/// Full recompute of the staging table, the fact table and both summary views.
///
/// Stages run strictly in order and the first failure aborts the run. The
/// compiled DDL and `manifest.json` are written before anything executes;
/// `run_results.json` is written once the post-flight checks have run.
pub async fn run_pipeline<T: TemplateEngine>(
    template_engine: &T,
    project_dir: &Path,
    config: &ProjectConfig,
    connector: &dyn Connector,
    load_timestamp: DateTime<Utc>,
) -> Result<RunResult, ApflowError> {
    println!("🚀 Starting AP pipeline ({})...", config.name);
    let start_time = Instant::now();

    // 1. SETUP
    let plan = StagePlan::for_config(config)?;
    let target_dir = project_dir.join(&config.target_path);
    if !target_dir.exists() {
        fs::create_dir_all(&target_dir)?;
    }

    // 2. SOURCE REGISTRATION
    println!("🔌 Registering SAP extracts...");
    let extracts = resolve_extracts(project_dir, config)?;
    let mut sources = Vec::with_capacity(extracts.len());
    for extract in extracts {
        let relation = extract.table.relation();
        connector
            .register_source(relation, &extract.path.to_string_lossy())
            .await?;
        println!("   📄 {} <- {}", extract.table, extract.path.display());
        sources.push(ManifestSource {
            table: extract.table,
            relation: relation.to_string(),
            path: extract.path,
        });
    }

    if config.net_due_date_basis == NetDueDateBasis::DiscountDays {
        warn!(
            "net-due-date-basis is 'discount-days': net_due_date and cash_discount_due_date \
             are both baseline date + ZBD1T and will be identical"
        );
    }

    // 3. COMPILATION
    println!("📦 Compiling {} stages...", plan.stages.len());
    let context = StagePlan::render_context(config, load_timestamp);
    let mut compiled = Vec::with_capacity(plan.stages.len());
    let mut manifest_stages = Vec::with_capacity(plan.stages.len());

    for stage in &plan.stages {
        let select_sql = template_engine
            .render(stage.template, &context)
            .map_err(|e| ApflowError::StageFailed {
                stage: stage.name.clone(),
                source: Box::new(e),
            })?;
        let ddl = Materializer::ddl(stage, &select_sql)?;

        let compiled_path = PathBuf::from("compiled")
            .join(stage.layer.as_str())
            .join(format!("{}.sql", stage.name));
        atomic_write(target_dir.join(&compiled_path), &ddl)?;

        let upstream = match referenced_relations(&select_sql) {
            Ok(relations) => relations,
            Err(e) => {
                warn!(stage = %stage.name, "Could not extract lineage: {:#}", e);
                Vec::new()
            }
        };

        manifest_stages.push(ManifestStage {
            name: stage.name.clone(),
            kind: stage.kind,
            layer: stage.layer,
            compiled_path,
            upstream: upstream.clone(),
        });
        compiled.push(CompiledStage {
            stage,
            ddl,
            upstream,
        });
    }

    let manifest = Manifest {
        project: config.name.clone(),
        version: config.version.clone(),
        engine: connector.engine_name().to_string(),
        net_due_date_basis: config.net_due_date_basis,
        sources,
        stages: manifest_stages,
    };
    write_json(&target_dir.join("manifest.json"), &manifest)?;

    // 4. EXECUTION (linear)
    println!("🟢 Processing stages...");
    let mut stages = Vec::with_capacity(compiled.len());
    for compiled_stage in compiled {
        let outcome = execute_stage(connector, compiled_stage).await?;
        match outcome.row_count {
            Some(rows) => println!("    ✅ Built table {} ({} rows)", outcome.name, rows),
            None => println!("    ✅ Built view {}", outcome.name),
        }
        stages.push(outcome);
    }

    // 5. POST-FLIGHT CHECKS
    println!("🧪 Running post-flight checks...");
    let checks = validation::run_checks(connector, config).await?;
    for check in &checks {
        let icon = match check.status {
            CheckStatus::Pass => "✅",
            CheckStatus::Warning => "⚠️ ",
            CheckStatus::Fail => "❌",
        };
        println!("    {} {}: {}", icon, check.name, check.message);
    }
    let failed: Vec<String> = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Fail)
        .map(|c| format!("{} ({})", c.name, c.message))
        .collect();

    // 6. FINALIZE
    if let Err(e) = connector.execute("CHECKPOINT").await {
        warn!("CHECKPOINT failed: {}", e);
    }

    let duration = start_time.elapsed();
    let result = RunResult {
        success: failed.is_empty(),
        load_timestamp: context["load_timestamp"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        stages,
        checks,
        duration_secs: duration.as_secs_f64(),
    };
    write_json(&target_dir.join("run_results.json"), &result)?;

    if !failed.is_empty() {
        return Err(DomainError::InvariantViolation {
            relation: config.tables.fact.clone(),
            message: failed.join("; "),
        }
        .into());
    }

    println!(
        "✨ Done in {:.2}s. Built {} relations.",
        duration.as_secs_f64(),
        result.stages.len()
    );
    Ok(result)
}

#[instrument(skip_all, fields(stage = %compiled.stage.name))]
async fn execute_stage(
    connector: &dyn Connector,
    compiled: CompiledStage<'_>,
) -> Result<StageOutcome, ApflowError> {
    let stage = compiled.stage;
    Materializer::materialize(connector, stage, &compiled.ddl).await?;

    let row_count = match stage.kind {
        StageKind::Table => {
            let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(&stage.name)?);
            Some(connector.query_scalar(&sql).await?)
        }
        StageKind::View => None,
    };
    info!(rows = ?row_count, "Stage materialized");

    Ok(StageOutcome {
        name: stage.name.clone(),
        kind: stage.kind,
        row_count,
        upstream: compiled.upstream,
    })
}
