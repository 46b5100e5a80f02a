// apflow-core/src/domain/transform/plan.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::project::ProjectConfig;
use crate::domain::sap::DocumentType;

use super::{rules, sql};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Table,
    View,
}

/// Where the compiled SQL of a stage is filed under `target/compiled/`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageLayer {
    Staging,
    Marts,
}

impl StageLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Marts => "marts",
        }
    }
}

/// One relation the pipeline materializes.
#[derive(Debug, Clone, PartialEq)]
pub struct StageDefinition {
    pub name: String,
    pub kind: StageKind,
    pub layer: StageLayer,
    pub template: &'static str,
}

/// The fixed, linear sequence of stages for a project.
#[derive(Debug, Clone)]
pub struct StagePlan {
    pub stages: Vec<StageDefinition>,
}

impl StagePlan {
    /// Casting stage, business rule stage, then both summary views.
    pub fn for_config(config: &ProjectConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let tables = &config.tables;

        let stages = vec![
            StageDefinition {
                name: tables.staging.clone(),
                kind: StageKind::Table,
                layer: StageLayer::Staging,
                template: sql::STAGING,
            },
            StageDefinition {
                name: tables.fact.clone(),
                kind: StageKind::Table,
                layer: StageLayer::Marts,
                template: sql::FACT,
            },
            StageDefinition {
                name: tables.quality_summary.clone(),
                kind: StageKind::View,
                layer: StageLayer::Marts,
                template: sql::QUALITY_SUMMARY,
            },
            StageDefinition {
                name: tables.vendor_summary.clone(),
                kind: StageKind::View,
                layer: StageLayer::Marts,
                template: sql::VENDOR_SUMMARY,
            },
        ];

        Ok(Self { stages })
    }

    /// Template context shared by every stage of one run.
    pub fn render_context(config: &ProjectConfig, load_timestamp: DateTime<Utc>) -> serde_json::Value {
        serde_json::json!({
            "project_name": config.name,
            "staging_table": config.tables.staging,
            "fact_table": config.tables.fact,
            "retained_account_types": rules::retained_account_types(),
            "net_due_days_column": config.net_due_date_basis.staging_column(),
            "invoice_code": DocumentType::Invoice.code(),
            "payment_code": DocumentType::Payment.code(),
            "load_timestamp": load_timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }
}
