//! Amazon Redshift dialect.
//!
//! Redshift accepts most PostgreSQL DDL but stores semi-structured data in
//! `SUPER`, spatial data in `GEOMETRY`, and keeps timestamps zone-aware.

use super::{MigrationDialect, TypeMapping, TypeTable, UniqueConstraintStyle};

const REDSHIFT_TYPES: &TypeTable = &[
    ("auto-generated", TypeMapping::quoted("VARCHAR(255)")),
    ("boolean", TypeMapping::bare("BOOLEAN")),
    ("computed", TypeMapping::quoted("VARCHAR(255)")),
    ("currency", TypeMapping::bare("MONEY")),
    ("date", TypeMapping::quoted("DATE")),
    ("datetime", TypeMapping::quoted("TIMESTAMP")),
    ("document", TypeMapping::quoted("SUPER")),
    ("integer", TypeMapping::bare("INTEGER")),
    ("list", TypeMapping::quoted("SUPER")),
    ("location", TypeMapping::quoted("GEOMETRY")),
    ("number", TypeMapping::bare("DECIMAL")),
    ("string", TypeMapping::bounded_varchar()),
    ("text", TypeMapping::quoted("TEXT")),
    ("timestamp", TypeMapping::quoted("TIMESTAMPTZ")),
    ("reference", TypeMapping::quoted("SUPER")),
];

/// Redshift dialect, registered as `redshift`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedshiftDialect;

impl RedshiftDialect {
    /// Creates a new Redshift dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MigrationDialect for RedshiftDialect {
    fn name(&self) -> &'static str {
        "redshift"
    }

    fn type_table(&self) -> &'static TypeTable {
        REDSHIFT_TYPES
    }

    fn unique_constraint_style(&self) -> UniqueConstraintStyle {
        UniqueConstraintStyle::Named
    }

    // Redshift treats backslash as an escape character inside literals.
    fn escape_literal(&self, value: &str) -> String {
        value.replace('\\', "\\\\").replace('\'', "''")
    }
}
