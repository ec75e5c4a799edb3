//! Dialect-aware DDL generation for logical data models.
//!
//! `schema-to-sql` turns a schema document (models with typed attributes)
//! into `CREATE TABLE` statements, or, given the previous version of the
//! document, into the `ALTER`/`DROP`/`CREATE` statements that migrate one
//! version into the other.
//!
//! # Architecture
//!
//! - **Schema** - Models, attributes and their stable identifiers
//! - **Operations** - Schema changes like `ModelAdded`, `AttributeNameChanged`, etc.
//! - **Autodetector** - Diffs two schemas into an ordered list of operations
//! - **Dialect** - Per-target type tables and SQL rendering (PostgreSQL, Redshift)
//! - **Generator** - Resolves targets and routes schemas or operations to dialects
//!
//! # Example
//!
//! ```rust
//! use schema_to_sql::prelude::*;
//!
//! let previous = Schema::new().model(
//!     Model::new(1, "users").attribute(Attribute::new(1, "id", AttributeType::AutoGenerated)),
//! );
//! let current = Schema::new().model(
//!     Model::new(1, "users")
//!         .attribute(Attribute::new(1, "id", AttributeType::AutoGenerated))
//!         .attribute(Attribute::new(2, "email", AttributeType::String).required()),
//! );
//!
//! let sql = generate_ddl(&["pg"], &current, Some(&previous)).unwrap();
//! assert_eq!(
//!     sql["pg"],
//!     "ALTER TABLE \"users\"\nADD COLUMN   \"email\" VARCHAR(255) NOT NULL  ;\n"
//! );
//! ```

pub mod autodetector;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod operations;
pub mod schema;

pub use generator::generate_ddl;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::autodetector::{diff, Autodetector};
    pub use crate::dialect::{MigrationDialect, PostgresDialect, RedshiftDialect};
    pub use crate::error::{DdlError, Result};
    pub use crate::generator::{dialect_for, generate_ddl, supported_targets, DdlOutput};
    pub use crate::operations::SchemaOperation;
    pub use crate::schema::{
        Attribute, AttributeRef, AttributeType, Model, ModelRef, ObjectId, Schema,
    };
}
