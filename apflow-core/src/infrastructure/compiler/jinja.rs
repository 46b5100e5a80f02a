// apflow-core/src/infrastructure/compiler/jinja.rs

// Turns the stage templates into SQL the engine can run. The casting and
// business-rule helpers are exposed as template functions so the templates
// read like the SQL they produce.

use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior};

use crate::application::ports::TemplateEngine;
use crate::domain::compiler::quote_identifier;
use crate::domain::sap::SapTable;
use crate::domain::transform::{casting, rules};
use crate::error::ApflowError;
use crate::infrastructure::error::InfrastructureError;

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        // A typo in a context variable must not silently render as ''.
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        // source('BSEG') -> "bseg"
        env.add_function("source", |table: String| -> Result<String, Error> {
            let sap_table = SapTable::from_relation(&table).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("unknown SAP source table '{}'", table),
                )
            })?;
            Ok(format!("\"{}\"", sap_table.relation()))
        });

        env.add_function("ref", |name: String| -> Result<String, Error> {
            quote_identifier(&name).map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
        });

        // Casting stage
        env.add_function("sap_date", |column: String| casting::sap_date(&column));
        env.add_function("sap_amount", |column: String| casting::sap_amount(&column));
        env.add_function("sap_int", |column: String| casting::sap_int(&column));
        env.add_function("blank_to_null", |column: String| casting::blank_to_null(&column));

        // Business rule stage
        env.add_function("signed_amount", |indicator: String, amount: String| {
            rules::signed_amount(&indicator, &amount)
        });
        env.add_function("vendor_liability", |account_type: String, amount: String| {
            rules::vendor_liability(&account_type, &amount)
        });
        env.add_function("document_type_description", |code: String| {
            rules::document_type_description(&code)
        });
        env.add_function("due_date", |base: String, days: String| rules::due_date(&base, &days));
        env.add_function("flag", |condition: String| rules::flag(&condition));

        Self { env }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, ApflowError> {
        self.env
            .render_str(template, context)
            .map_err(|e| ApflowError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
