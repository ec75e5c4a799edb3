//! schema-to-sql CLI
//!
//! Command-line front end: reads schema documents from disk and prints or
//! writes the generated DDL for each requested target.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use schema_to_sql::prelude::*;

/// Generate dialect-specific DDL from schema documents.
#[derive(Parser)]
#[command(name = "schema-to-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target dialects (pg, redshift).
    #[arg(
        short,
        long = "target",
        env = "SCHEMA_TO_SQL_TARGETS",
        value_delimiter = ',',
        default_value = "pg"
    )]
    targets: Vec<String>,

    /// Current schema document.
    #[arg(short, long)]
    current: PathBuf,

    /// Previous schema document; when given, migration DDL is generated.
    #[arg(short, long)]
    previous: Option<PathBuf>,

    /// Write `<target>.sql` files into this directory instead of printing.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the detected schema operations as JSON instead of SQL.
    #[arg(long, requires = "previous")]
    operations: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so that SQL on stdout can be piped.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let current = Schema::from_path(&cli.current)?;
    let previous = cli.previous.as_ref().map(Schema::from_path).transpose()?;

    if cli.operations {
        let Some(previous) = previous else {
            bail!("--operations requires --previous");
        };
        let operations = diff(&previous, &current);
        println!("{}", serde_json::to_string_pretty(&operations)?);
        return Ok(());
    }

    let output = generate_ddl(&cli.targets, &current, previous.as_ref())?;

    match cli.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            for (target, sql) in &output {
                let file_path = dir.join(format!("{target}.sql"));
                std::fs::write(&file_path, sql)?;
                info!("Wrote {}", file_path.display());
            }
        }
        None => {
            for (target, sql) in &output {
                println!("-- {target}");
                println!("{sql}");
            }
        }
    }

    Ok(())
}
