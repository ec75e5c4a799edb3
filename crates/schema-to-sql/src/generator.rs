//! DDL generation across targets.
//!
//! This module resolves target identifiers against the dialect registry
//! and routes either the full current schema or the diff between two
//! schema versions to every requested dialect.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::autodetector::Autodetector;
use crate::dialect::{MigrationDialect, PostgresDialect, RedshiftDialect};
use crate::error::{DdlError, Result};
use crate::schema::Schema;

/// Every dialect that can be requested as a target.
static DIALECTS: [&dyn MigrationDialect; 2] = [&PostgresDialect, &RedshiftDialect];

/// Generated SQL keyed by target identifier.
pub type DdlOutput = BTreeMap<String, String>;

/// Returns the identifiers of all registered targets.
#[must_use]
pub fn supported_targets() -> Vec<&'static str> {
    DIALECTS.iter().map(|d| d.name()).collect()
}

/// Looks up the dialect registered under `target`.
///
/// # Errors
///
/// Returns [`DdlError::UnsupportedTarget`] if no dialect has that name.
pub fn dialect_for(target: &str) -> Result<&'static dyn MigrationDialect> {
    DIALECTS
        .iter()
        .copied()
        .find(|d| d.name() == target)
        .ok_or_else(|| DdlError::UnsupportedTarget(target.to_string()))
}

/// Generates DDL for every target.
///
/// Without `previous`, each target receives `CREATE TABLE` statements for
/// the whole `current` schema. With `previous`, the schemas are diffed once
/// and each target renders the resulting operations.
///
/// Either every target produces SQL or the call fails; no partial output
/// is returned.
///
/// # Errors
///
/// - [`DdlError::InvalidArgument`] if `targets` is empty.
/// - [`DdlError::UnsupportedTarget`] if any target is unknown.
/// - [`DdlError::UnsupportedType`] if an attribute type cannot be mapped.
pub fn generate_ddl<S: AsRef<str>>(
    targets: &[S],
    current: &Schema,
    previous: Option<&Schema>,
) -> Result<DdlOutput> {
    if targets.is_empty() {
        return Err(DdlError::InvalidArgument(
            "Targets must contain at least one target".to_string(),
        ));
    }

    let dialects = targets
        .iter()
        .map(|target| dialect_for(target.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    debug!(targets = ?supported_targets(), requested = dialects.len(), "Resolved dialects");

    let mut output = DdlOutput::new();
    match previous {
        None => {
            for dialect in dialects {
                output.insert(dialect.name().to_string(), dialect.emit_schema(current)?);
            }
        }
        Some(previous) => {
            let operations = Autodetector::new().diff(previous, current);
            for dialect in dialects {
                output.insert(dialect.name().to_string(), dialect.emit_diff(&operations)?);
            }
        }
    }

    info!(
        targets = output.len(),
        models = current.models.len(),
        diff = previous.is_some(),
        "Generated DDL"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Model};

    fn schema() -> Schema {
        Schema::new().model(
            Model::new(1, "users")
                .attribute(Attribute::new(1, "id", "auto-generated"))
                .attribute(Attribute::new(2, "created", "timestamp")),
        )
    }

    #[test]
    fn test_supported_targets() {
        assert_eq!(supported_targets(), vec!["pg", "redshift"]);
    }

    #[test]
    fn test_dialect_lookup() {
        assert_eq!(dialect_for("pg").unwrap().name(), "pg");
        assert_eq!(dialect_for("redshift").unwrap().name(), "redshift");
        assert!(matches!(
            dialect_for("mysql"),
            Err(DdlError::UnsupportedTarget(t)) if t == "mysql"
        ));
    }

    #[test]
    fn test_empty_targets_rejected() {
        let targets: [&str; 0] = [];
        assert!(matches!(
            generate_ddl(&targets, &schema(), None),
            Err(DdlError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_target_aborts_whole_call() {
        let result = generate_ddl(&["pg", "pg1", "redshift"], &schema(), None);
        assert!(matches!(result, Err(DdlError::UnsupportedTarget(t)) if t == "pg1"));
    }

    #[test]
    fn test_generate_per_target() {
        let output = generate_ddl(&["pg", "redshift"], &schema(), None).unwrap();
        assert_eq!(output.len(), 2);
        assert!(output["pg"].contains("\"created\" TIMESTAMP "));
        assert!(output["redshift"].contains("\"created\" TIMESTAMPTZ "));
    }

    #[test]
    fn test_unsupported_type_aborts() {
        let broken = Schema::new().model(
            Model::new(1, "parcels").attribute(Attribute::new(1, "shape", "polygon")),
        );
        let result = generate_ddl(&["pg"], &broken, None);
        assert!(matches!(
            result,
            Err(DdlError::UnsupportedType { ref model, .. }) if model == "parcels"
        ));
    }
}
