//! PostgreSQL dialect.

use super::{MigrationDialect, TypeMapping, TypeTable, UniqueConstraintStyle};

const POSTGRES_TYPES: &TypeTable = &[
    ("auto-generated", TypeMapping::quoted("VARCHAR(255)")),
    ("boolean", TypeMapping::bare("BOOLEAN")),
    ("computed", TypeMapping::quoted("VARCHAR(255)")),
    ("currency", TypeMapping::bare("MONEY")),
    ("date", TypeMapping::quoted("DATE")),
    ("datetime", TypeMapping::quoted("TIMESTAMP")),
    ("document", TypeMapping::quoted("JSON")),
    ("integer", TypeMapping::bare("INTEGER")),
    ("list", TypeMapping::quoted("JSON")),
    ("location", TypeMapping::quoted("POINT")),
    ("number", TypeMapping::bare("DECIMAL")),
    ("string", TypeMapping::bounded_varchar()),
    ("text", TypeMapping::quoted("TEXT")),
    ("timestamp", TypeMapping::quoted("TIMESTAMP")),
    ("reference", TypeMapping::quoted("JSON")),
];

/// PostgreSQL dialect, registered as `pg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MigrationDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "pg"
    }

    fn type_table(&self) -> &'static TypeTable {
        POSTGRES_TYPES
    }

    fn unique_constraint_style(&self) -> UniqueConstraintStyle {
        UniqueConstraintStyle::Inline
    }

    // The constraint created inline by CREATE TABLE is unnamed, so the
    // first change after it may find nothing called uc_<model>.
    fn drop_unique_constraint(&self, model: &str) -> String {
        format!(
            "ALTER TABLE {}\nDROP CONSTRAINT IF EXISTS {};",
            self.quote_identifier(model),
            self.quote_identifier(&self.unique_constraint_name(model))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::SchemaOperation;
    use crate::schema::{Attribute, Model, Schema};

    fn dialect() -> PostgresDialect {
        PostgresDialect::new()
    }

    fn users() -> Model {
        Model::new(1, "users")
            .attribute(Attribute::new(1, "id", "auto-generated"))
            .attribute(Attribute::new(2, "email", "string").required().unique())
            .attribute(Attribute::new(3, "nickname", "string").max(40).unique())
    }

    #[test]
    fn test_postgres_column_types() {
        let d = dialect();
        let cases = [
            ("auto-generated", "VARCHAR(255)"),
            ("boolean", "BOOLEAN"),
            ("computed", "VARCHAR(255)"),
            ("currency", "MONEY"),
            ("date", "DATE"),
            ("datetime", "TIMESTAMP"),
            ("document", "JSON"),
            ("integer", "INTEGER"),
            ("list", "JSON"),
            ("location", "POINT"),
            ("number", "DECIMAL"),
            ("string", "VARCHAR(255)"),
            ("text", "TEXT"),
            ("timestamp", "TIMESTAMP"),
            ("reference", "JSON"),
        ];
        for (logical, expected) in cases {
            let attr = Attribute::new(1, "col", logical);
            assert_eq!(d.column_type(&attr, "t").unwrap(), expected, "type {logical}");
        }
    }

    #[test]
    fn test_string_uses_max_length() {
        let d = dialect();
        let attr = Attribute::new(1, "code", "string").max(12);
        assert_eq!(d.column_type(&attr, "t").unwrap(), "VARCHAR(12)");

        let zero = Attribute::new(1, "code", "string").max(0);
        assert_eq!(d.column_type(&zero, "t").unwrap(), "VARCHAR(255)");
    }

    #[test]
    fn test_string_max_written_as_float() {
        let schema = Schema::from_json(
            r#"{"models":[{"id":1,"name":"codes","attributes":[
                {"id":1,"name":"code","type":"string","max":100.0},
                {"id":2,"name":"label","type":"string","max":12.5}
            ]}]}"#,
        )
        .unwrap();
        let sql = dialect().emit_schema(&schema).unwrap();
        assert!(sql.contains("\"code\" VARCHAR(100) "));
        assert!(sql.contains("\"label\" VARCHAR(255) "));
    }

    #[test]
    fn test_unsupported_type_names_attribute_and_model() {
        let attr = Attribute::new(1, "shape", "polygon");
        let err = dialect().column_type(&attr, "parcels").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("polygon"));
        assert!(message.contains("shape"));
        assert!(message.contains("parcels"));
    }

    #[test]
    fn test_default_literals() {
        let d = dialect();
        let literal = |attr: Attribute| d.default_literal(&attr, "t").unwrap();

        assert_eq!(literal(Attribute::new(1, "a", "string")), None);
        assert_eq!(
            literal(Attribute::new(1, "a", "string").default_value("draft")),
            Some("'draft'".to_string())
        );
        assert_eq!(
            literal(Attribute::new(1, "a", "text").default_value("it's")),
            Some("'it''s'".to_string())
        );
        assert_eq!(
            literal(Attribute::new(1, "a", "date").default_value("2024-01-01")),
            Some("'2024-01-01'".to_string())
        );
        assert_eq!(
            literal(Attribute::new(1, "a", "integer").default_value(7)),
            Some("7".to_string())
        );
        assert_eq!(
            literal(Attribute::new(1, "a", "boolean").default_value(false)),
            Some("FALSE".to_string())
        );
        assert_eq!(
            literal(Attribute::new(1, "a", "number").default_value("2.5")),
            Some("2.5".to_string())
        );
        assert_eq!(
            literal(Attribute::new(1, "a", "integer").default_value("0; DROP TABLE x")),
            Some("'0; DROP TABLE x'".to_string())
        );
    }

    #[test]
    fn test_column_definition_layout() {
        let d = dialect();
        let id = Attribute::new(1, "id", "auto-generated").required();
        assert_eq!(
            d.column_definition(&id, "users", true).unwrap(),
            "  \"id\" VARCHAR(255) PRIMARY KEY NOT NULL , "
        );

        let active = Attribute::new(2, "active", "boolean").default_value(true);
        assert_eq!(
            d.column_definition(&active, "users", false).unwrap(),
            "  \"active\" BOOLEAN DEFAULT TRUE  "
        );
    }

    #[test]
    fn test_inline_unique_clause() {
        assert_eq!(
            dialect().unique_constraint_clause(&users()),
            Some("UNIQUE(\"email\",\"nickname\")".to_string())
        );
        let plain = Model::new(2, "tags").attribute(Attribute::new(1, "id", "auto-generated"));
        assert_eq!(dialect().unique_constraint_clause(&plain), None);
    }

    #[test]
    fn test_create_table() {
        let sql = dialect().emit_schema(&Schema::new().model(users())).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"users\" (\n\
             \x20 \"id\" VARCHAR(255) PRIMARY KEY , \n\
             \x20 \"email\" VARCHAR(255) NOT NULL , \n\
             \x20 \"nickname\" VARCHAR(40) , \n\
             \x20 UNIQUE(\"email\",\"nickname\")\n\
             );\n"
        );
    }

    #[test]
    fn test_create_table_without_unique_has_no_trailing_comma() {
        let model = Model::new(1, "tags")
            .attribute(Attribute::new(1, "id", "auto-generated"))
            .attribute(Attribute::new(2, "label", "text"));
        let sql = dialect().create_table(&model).unwrap();
        assert!(sql.contains("\"id\" VARCHAR(255) PRIMARY KEY , \n"));
        assert!(sql.contains("\"label\" TEXT  \n);"));
    }

    #[test]
    fn test_change_unique_constraints() {
        let op = SchemaOperation::UniqueConstraintsChanged { model: users() };
        assert_eq!(
            dialect().generate_sql(&op).unwrap(),
            "ALTER TABLE \"users\"\nDROP CONSTRAINT IF EXISTS \"uc_users\";\n\
             ALTER TABLE \"users\"\nADD CONSTRAINT \"uc_users\" UNIQUE(\"email\",\"nickname\");\n"
        );
    }

    #[test]
    fn test_alter_column_sql() {
        let d = dialect();
        let users = Model::new(1, "users").to_ref();

        let required = Attribute::new(2, "email", "string").required();
        let op = SchemaOperation::AttributeIsNullChanged {
            model: users.clone(),
            attribute: required,
        };
        assert_eq!(
            d.generate_sql(&op).unwrap(),
            "ALTER TABLE \"users\"\nALTER COLUMN \"email\" SET NOT NULL;"
        );

        let optional = Attribute::new(2, "email", "string");
        let op = SchemaOperation::AttributeIsNullChanged {
            model: users.clone(),
            attribute: optional,
        };
        assert_eq!(
            d.generate_sql(&op).unwrap(),
            "ALTER TABLE \"users\"\nALTER COLUMN \"email\" DROP NOT NULL;"
        );

        let op = SchemaOperation::AttributeModified {
            model: users,
            attribute: Attribute::new(3, "age", "number"),
        };
        assert_eq!(
            d.generate_sql(&op).unwrap(),
            "ALTER TABLE \"users\"\nALTER COLUMN \"age\" TYPE DECIMAL;\n"
        );
    }
}
