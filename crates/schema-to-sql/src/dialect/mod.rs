//! Database dialect implementations.
//!
//! A dialect is mostly data: a lookup table from logical attribute type to
//! column type and literal style, a quote character and a unique
//! constraint style. The rendering of tables, columns and diff operations
//! lives in the default methods of [`MigrationDialect`] and is shared by
//! every dialect, so adding a target means adding a table, not logic.

mod postgres;
mod redshift;

pub use postgres::PostgresDialect;
pub use redshift::RedshiftDialect;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DdlError, Result};
use crate::operations::SchemaOperation;
use crate::schema::{Attribute, AttributeType, Model, Schema};

/// Length used for `string` columns without a positive `max`.
pub const DEFAULT_VARCHAR_LENGTH: u64 = 255;

/// How the SQL column type is derived from a logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// A fixed SQL type.
    Fixed(&'static str),
    /// `VARCHAR(n)` where `n` is the attribute's `max`.
    BoundedVarchar,
}

/// How a default value is written as a SQL literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralStyle {
    /// Wrapped in single quotes.
    Quoted,
    /// Written as is (numbers and booleans).
    Bare,
}

/// Column type and literal style for one logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// SQL column type.
    pub column_type: ColumnType,
    /// Default literal style.
    pub literal: LiteralStyle,
}

impl TypeMapping {
    /// A fixed type with quoted literals.
    #[must_use]
    pub const fn quoted(sql_type: &'static str) -> Self {
        Self {
            column_type: ColumnType::Fixed(sql_type),
            literal: LiteralStyle::Quoted,
        }
    }

    /// A fixed type with bare literals.
    #[must_use]
    pub const fn bare(sql_type: &'static str) -> Self {
        Self {
            column_type: ColumnType::Fixed(sql_type),
            literal: LiteralStyle::Bare,
        }
    }

    /// A `VARCHAR` sized by the attribute, with quoted literals.
    #[must_use]
    pub const fn bounded_varchar() -> Self {
        Self {
            column_type: ColumnType::BoundedVarchar,
            literal: LiteralStyle::Quoted,
        }
    }
}

/// Type table of a dialect, keyed by the document spelling of the type.
pub type TypeTable = [(&'static str, TypeMapping)];

/// How a model's unique attributes are declared in `CREATE TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueConstraintStyle {
    /// `UNIQUE(a,b)`
    Inline,
    /// `CONSTRAINT "uc_<model>" UNIQUE(a,b)`
    Named,
}

/// Trait for database-specific DDL generation.
pub trait MigrationDialect: Send + Sync {
    /// Returns the target identifier this dialect is registered under.
    fn name(&self) -> &'static str;

    /// Returns the logical type to column type table.
    fn type_table(&self) -> &'static TypeTable;

    /// Returns how unique constraints are declared in `CREATE TABLE`.
    fn unique_constraint_style(&self) -> UniqueConstraintStyle;

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let q = self.quote_char();
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Escapes the body of a single-quoted string literal.
    fn escape_literal(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Looks up the mapping for a logical type.
    fn type_mapping(&self, attribute_type: &AttributeType) -> Option<TypeMapping> {
        let name = attribute_type.as_str();
        self.type_table()
            .iter()
            .find(|(type_name, _)| *type_name == name)
            .map(|(_, mapping)| *mapping)
    }

    /// Resolves the mapping of an attribute, failing on unknown types.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if the type is not in the table.
    fn resolve_mapping(&self, attribute: &Attribute, model: &str) -> Result<TypeMapping> {
        self.type_mapping(&attribute.attribute_type)
            .ok_or_else(|| DdlError::UnsupportedType {
                type_name: attribute.attribute_type.to_string(),
                attribute: attribute.name.clone(),
                model: model.to_string(),
            })
    }

    /// Returns the SQL column type of an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if the type is not in the table.
    fn column_type(&self, attribute: &Attribute, model: &str) -> Result<String> {
        let mapping = self.resolve_mapping(attribute, model)?;
        Ok(match mapping.column_type {
            ColumnType::Fixed(sql_type) => sql_type.to_string(),
            ColumnType::BoundedVarchar => {
                let length = attribute
                    .max
                    .as_ref()
                    .and_then(positive_whole_number)
                    .unwrap_or(DEFAULT_VARCHAR_LENGTH);
                format!("VARCHAR({length})")
            }
        })
    }

    /// Returns the `DEFAULT` literal of an attribute, or `None` when the
    /// attribute has no default value.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if the type is not in the table.
    fn default_literal(&self, attribute: &Attribute, model: &str) -> Result<Option<String>> {
        let mapping = self.resolve_mapping(attribute, model)?;
        let Some(value) = &attribute.default_value else {
            return Ok(None);
        };
        let literal = match (mapping.literal, value) {
            (_, Value::Null) => return Ok(None),
            (LiteralStyle::Bare, Value::Bool(b)) => String::from(if *b { "TRUE" } else { "FALSE" }),
            (LiteralStyle::Bare, Value::Number(n)) => n.to_string(),
            (LiteralStyle::Bare, Value::String(s)) if is_bare_literal(s) => s.trim().to_uppercase(),
            (_, Value::String(s)) => format!("'{}'", self.escape_literal(s)),
            (_, other) => format!("'{}'", self.escape_literal(&other.to_string())),
        };
        Ok(Some(literal))
    }

    /// Name of the constraint holding a model's unique attributes.
    fn unique_constraint_name(&self, model: &str) -> String {
        format!("uc_{model}")
    }

    /// Returns `UNIQUE(a,b)` over the unique attributes, or `None`.
    fn unique_columns(&self, model: &Model) -> Option<String> {
        let columns = model.unique_attribute_names();
        if columns.is_empty() {
            return None;
        }
        let quoted: Vec<String> = columns.iter().map(|c| self.quote_identifier(c)).collect();
        Some(format!("UNIQUE({})", quoted.join(",")))
    }

    /// Returns the named unique constraint of a model, or `None`.
    fn named_unique_constraint(&self, model: &Model) -> Option<String> {
        self.unique_columns(model).map(|unique| {
            format!(
                "CONSTRAINT {} {}",
                self.quote_identifier(&self.unique_constraint_name(&model.name)),
                unique
            )
        })
    }

    /// Returns the unique clause used inside `CREATE TABLE`, or `None` when
    /// the model has no unique attributes.
    fn unique_constraint_clause(&self, model: &Model) -> Option<String> {
        match self.unique_constraint_style() {
            UniqueConstraintStyle::Inline => self.unique_columns(model),
            UniqueConstraintStyle::Named => self.named_unique_constraint(model),
        }
    }

    /// Generates a column definition line.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if the type is not in the table.
    fn column_definition(&self, attribute: &Attribute, model: &str, add_comma: bool) -> Result<String> {
        let column_type = self.column_type(attribute, model)?;
        let default = self
            .default_literal(attribute, model)?
            .map(|literal| format!("DEFAULT {literal} "))
            .unwrap_or_default();
        Ok(format!(
            "  {} {} {}{}{}{} ",
            self.quote_identifier(&attribute.name),
            column_type,
            default,
            if attribute.is_primary_key() { "PRIMARY KEY " } else { "" },
            if attribute.is_required { "NOT NULL " } else { "" },
            if add_comma { "," } else { "" },
        ))
    }

    /// Generates SQL for creating a model's table.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if an attribute type is not in
    /// the table.
    fn create_table(&self, model: &Model) -> Result<String> {
        if model.primary_key().is_none() {
            warn!(model = %model.name, dialect = self.name(), "Model has no primary key attribute");
        }
        let unique = self.unique_constraint_clause(model);
        let mut lines = vec![format!(
            "CREATE TABLE IF NOT EXISTS {} (",
            self.quote_identifier(&model.name)
        )];
        let last = model.attributes.len().saturating_sub(1);
        for (index, attribute) in model.attributes.iter().enumerate() {
            let add_comma = unique.is_some() || index != last;
            lines.push(self.column_definition(attribute, &model.name, add_comma)?);
        }
        if let Some(unique) = unique {
            lines.push(format!("  {unique}"));
        }
        lines.push(");\n".to_string());
        Ok(lines.join("\n"))
    }

    /// Generates SQL creating every model of a schema, in schema order.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if an attribute type is not in
    /// the table.
    fn emit_schema(&self, schema: &Schema) -> Result<String> {
        let tables = schema
            .models
            .iter()
            .map(|model| self.create_table(model))
            .collect::<Result<Vec<_>>>()?;
        debug!(dialect = self.name(), tables = tables.len(), "Generated schema DDL");
        Ok(tables.join("\n"))
    }

    /// Generates SQL for dropping a table.
    fn drop_table(&self, name: &str) -> String {
        format!("DROP TABLE IF EXISTS {};", self.quote_identifier(name))
    }

    /// Generates SQL for renaming a table.
    fn rename_table(&self, previous_name: &str, current_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {};",
            self.quote_identifier(previous_name),
            self.quote_identifier(current_name)
        )
    }

    /// Generates SQL for adding a column.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if the type is not in the table.
    fn add_column(&self, model: &str, attribute: &Attribute) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {}\nADD COLUMN {};\n",
            self.quote_identifier(model),
            self.column_definition(attribute, model, false)?
        ))
    }

    /// Generates SQL for dropping a column.
    fn drop_column(&self, model: &str, column: &str) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {};",
            self.quote_identifier(model),
            self.quote_identifier(column)
        )
    }

    /// Generates SQL for renaming a column.
    fn rename_column(&self, model: &str, previous_name: &str, current_name: &str) -> String {
        format!(
            "ALTER TABLE {}\nRENAME COLUMN {} TO {};\n",
            self.quote_identifier(model),
            self.quote_identifier(previous_name),
            self.quote_identifier(current_name)
        )
    }

    /// Generates SQL setting or dropping NOT NULL from the attribute's
    /// current `isRequired` value.
    fn alter_column_nullability(&self, model: &str, attribute: &Attribute) -> String {
        format!(
            "ALTER TABLE {}\nALTER COLUMN {} {};",
            self.quote_identifier(model),
            self.quote_identifier(&attribute.name),
            if attribute.is_required { "SET NOT NULL" } else { "DROP NOT NULL" }
        )
    }

    /// Generates SQL changing a column's type.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if the type is not in the table.
    fn alter_column_type(&self, model: &str, attribute: &Attribute) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {}\nALTER COLUMN {} TYPE {};\n",
            self.quote_identifier(model),
            self.quote_identifier(&attribute.name),
            self.column_type(attribute, model)?
        ))
    }

    /// Generates SQL dropping the unique constraint of a model.
    fn drop_unique_constraint(&self, model: &str) -> String {
        format!(
            "ALTER TABLE {}\nDROP CONSTRAINT {};",
            self.quote_identifier(model),
            self.quote_identifier(&self.unique_constraint_name(model))
        )
    }

    /// Generates SQL replacing the unique constraint of a model. The new
    /// constraint is always named so that a later change can drop it.
    fn change_unique_constraints(&self, model: &Model) -> String {
        let mut sql = self.drop_unique_constraint(&model.name);
        if let Some(constraint) = self.named_unique_constraint(model) {
            sql.push_str(&format!(
                "\nALTER TABLE {}\nADD {};",
                self.quote_identifier(&model.name),
                constraint
            ));
        }
        sql.push('\n');
        sql
    }

    /// Generates SQL for one operation.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if an attribute type is not in
    /// the table.
    fn generate_sql(&self, operation: &SchemaOperation) -> Result<String> {
        match operation {
            SchemaOperation::ModelDropped { name } => Ok(self.drop_table(name)),
            SchemaOperation::ModelAdded { model } => self.create_table(model),
            SchemaOperation::ModelNameChanged {
                previous_name,
                current_name,
            } => Ok(self.rename_table(previous_name, current_name)),
            SchemaOperation::AttributeAdded { model, attribute } => {
                self.add_column(&model.name, attribute)
            }
            SchemaOperation::AttributeDropped { model, attribute } => {
                Ok(self.drop_column(&model.name, &attribute.name))
            }
            SchemaOperation::AttributeNameChanged {
                model,
                previous_name,
                current_name,
            } => Ok(self.rename_column(&model.name, previous_name, current_name)),
            SchemaOperation::AttributeIsNullChanged { model, attribute } => {
                Ok(self.alter_column_nullability(&model.name, attribute))
            }
            SchemaOperation::AttributeModified { model, attribute } => {
                self.alter_column_type(&model.name, attribute)
            }
            SchemaOperation::UniqueConstraintsChanged { model } => {
                Ok(self.change_unique_constraints(model))
            }
        }
    }

    /// Generates SQL for a list of operations, in order, with exactly one
    /// blank line between statements.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedType`] if an attribute type is not in
    /// the table.
    fn emit_diff(&self, operations: &[SchemaOperation]) -> Result<String> {
        let mut sql = String::new();
        for operation in operations {
            let statement = self.generate_sql(operation)?;
            debug!(dialect = self.name(), kind = operation.kind(), sql = %statement, "Rendered operation");
            if !sql.is_empty() {
                if !sql.ends_with('\n') {
                    sql.push('\n');
                }
                sql.push('\n');
            }
            sql.push_str(&statement);
        }
        Ok(sql)
    }
}

/// Returns a bound as a positive whole number. `100` and `100.0` both
/// yield `100`.
fn positive_whole_number(value: &serde_json::Number) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        })
        .filter(|n| *n > 0)
}

/// Returns true for strings that are safe to emit unquoted as a number or
/// boolean literal.
fn is_bare_literal(value: &str) -> bool {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        return true;
    }
    !value.is_empty()
        && value.parse::<f64>().is_ok_and(f64::is_finite)
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
}
