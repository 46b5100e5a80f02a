// apflow-core/src/domain/compiler/relations.rs

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use sqlparser::ast::visit_relations;
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;

/// Relations read by a SELECT, lowercased and unquoted, in sorted order.
/// Used for the lineage section of `manifest.json`.
pub fn referenced_relations(sql: &str) -> Result<Vec<String>, anyhow::Error> {
    let statements = Parser::parse_sql(&DuckDbDialect {}, sql)?;

    let mut relations = BTreeSet::new();
    let flow = visit_relations(&statements, |name| {
        let rendered = name.to_string().replace('"', "").to_lowercase();
        relations.insert(rendered);
        ControlFlow::<()>::Continue(())
    });
    debug_assert!(flow.is_continue());

    Ok(relations.into_iter().collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_join_relations_are_collected() {
        let sql = r#"SELECT a.x FROM "bseg" AS a
            INNER JOIN bkpf AS b ON a.k = b.k
            LEFT JOIN LFA1 AS c ON a.v = c.v"#;
        let relations = referenced_relations(sql).unwrap();
        assert_eq!(relations, vec!["bkpf", "bseg", "lfa1"]);
    }

    #[test]
    fn test_invalid_sql_is_an_error() {
        assert!(referenced_relations("SELEC nothing FROM").is_err());
    }
}
