// apflow-core/src/application/ports/renderer.rs

use crate::error::ApflowError;

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, ApflowError>;
}
