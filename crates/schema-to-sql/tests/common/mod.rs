#![allow(dead_code)]

use schema_to_sql::prelude::*;

pub fn id_attribute() -> Attribute {
    Attribute::new(1, "id", AttributeType::AutoGenerated)
}

/// `users` with `id`, `name` and `weddingDate`.
pub fn users() -> Model {
    Model::new(1, "users")
        .attribute(id_attribute())
        .attribute(Attribute::new(2, "name", AttributeType::String))
        .attribute(Attribute::new(3, "weddingDate", AttributeType::Date))
}

/// `posts` with a unique slug and a required body.
pub fn posts() -> Model {
    Model::new(2, "posts")
        .attribute(id_attribute())
        .attribute(Attribute::new(2, "slug", AttributeType::String).max(120).unique())
        .attribute(Attribute::new(3, "body", AttributeType::Text).required())
        .attribute(Attribute::new(4, "published", AttributeType::Boolean).default_value(false))
}

pub fn schema(models: impl IntoIterator<Item = Model>) -> Schema {
    models.into_iter().fold(Schema::new(), Schema::model)
}

pub fn generate(target: &str, current: &Schema, previous: Option<&Schema>) -> String {
    let mut output = generate_ddl(&[target], current, previous)
        .unwrap_or_else(|e| panic!("Failed to generate DDL for {target}: {e}"));
    output
        .remove(target)
        .unwrap_or_else(|| panic!("No output for {target}"))
}

pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
