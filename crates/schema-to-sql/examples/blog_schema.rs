//! Example: Blog Schema Evolution
//!
//! This example walks a blog data model through three versions and prints
//! the DDL every registered target needs at each step.
//!
//! Run with: cargo run --example blog_schema -p schema-to-sql

use schema_to_sql::prelude::*;

// =============================================================================
// Schema Versions
// =============================================================================

fn id() -> Attribute {
    Attribute::new("id", "id", AttributeType::AutoGenerated)
}

/// Initial version: users and posts.
fn v1() -> Schema {
    Schema::new()
        .model(
            Model::new("users", "users")
                .attribute(id())
                .attribute(Attribute::new("username", "username", AttributeType::String).max(100).required().unique())
                .attribute(Attribute::new("email", "email", AttributeType::String).required())
                .attribute(Attribute::new("active", "is_active", AttributeType::Boolean).default_value(true)),
        )
        .model(
            Model::new("posts", "posts")
                .attribute(id())
                .attribute(Attribute::new("title", "title", AttributeType::String).max(200).required())
                .attribute(Attribute::new("body", "body", AttributeType::Text))
                .attribute(Attribute::new("published", "published_at", AttributeType::Timestamp)),
        )
}

/// Second version: posts renamed to articles, email made unique, tags added.
fn v2() -> Schema {
    Schema::new()
        .model(
            Model::new("users", "users")
                .attribute(id())
                .attribute(Attribute::new("username", "username", AttributeType::String).max(100).required().unique())
                .attribute(Attribute::new("email", "email", AttributeType::String).required().unique())
                .attribute(Attribute::new("active", "is_active", AttributeType::Boolean).default_value(true)),
        )
        .model(
            Model::new("posts", "articles")
                .attribute(id())
                .attribute(Attribute::new("title", "headline", AttributeType::String).max(255).required())
                .attribute(Attribute::new("body", "body", AttributeType::Text).required())
                .attribute(Attribute::new("published", "published_at", AttributeType::Timestamp))
                .attribute(Attribute::new("meta", "metadata", AttributeType::Document)),
        )
        .model(
            Model::new("tags", "tags")
                .attribute(id())
                .attribute(Attribute::new("label", "label", AttributeType::String).max(50).unique()),
        )
}

/// Third version: tags removed again, `is_active` dropped.
fn v3() -> Schema {
    let mut schema = v2();
    schema.models.retain(|m| m.name != "tags");
    schema.models[0].attributes.retain(|a| a.name != "is_active");
    schema
}

// =============================================================================
// Main
// =============================================================================

fn print_output(output: &DdlOutput) {
    for (target, sql) in output {
        println!("--- {target} {}", "-".repeat(60 - target.len()));
        println!("{sql}");
    }
    println!();
}

fn main() -> Result<()> {
    let targets = supported_targets();

    println!("{}", "=".repeat(70));
    println!(" Blog Schema Evolution ({})", targets.join(", "));
    println!("{}", "=".repeat(70));
    println!();

    println!("[1] Creating tables for v1...\n");
    print_output(&generate_ddl(&targets, &v1(), None)?);

    println!("[2] Detected changes v1 -> v2:\n");
    for op in diff(&v1(), &v2()) {
        let marker = if op.is_destructive() { "!" } else { "+" };
        println!("    [{marker}] {} on {}", op.kind(), op.table_name());
    }
    println!();

    println!("[3] Migrating v1 -> v2...\n");
    print_output(&generate_ddl(&targets, &v2(), Some(&v1()))?);

    println!("[4] Migrating v2 -> v3...\n");
    print_output(&generate_ddl(&targets, &v3(), Some(&v2()))?);

    println!("[5] Operations v2 -> v3 as JSON:\n");
    let ops = diff(&v2(), &v3());
    println!("{}", serde_json::to_string_pretty(&ops)?);

    println!();
    println!("{}", "=".repeat(70));
    println!(" Example completed successfully!");
    println!("{}", "=".repeat(70));

    Ok(())
}
