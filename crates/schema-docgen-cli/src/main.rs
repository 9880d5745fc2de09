//! schema-docgen CLI - render database schema metadata into a Word document.

use clap::Parser;
use schema_docgen::{Config, DocGenerator, DocgenError, ReaderImpl, Target};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: schema-docgen <schema_name> [table_name] [table_comment]";

#[derive(Parser)]
#[command(name = "schema-docgen")]
#[command(about = "Render database schema metadata into a Word document")]
#[command(version)]
struct Cli {
    /// Schema to document
    schema: Option<String>,

    /// Document only this table
    table: Option<String>,

    /// Title comment for the table, overriding the catalog comment
    comment: Option<String>,

    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the template document path
    #[arg(long)]
    template: Option<PathBuf>,

    /// Override the output document path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the database type: mysql or postgres
    #[arg(long)]
    dialect: Option<String>,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

impl Cli {
    fn target(&self) -> Option<Target> {
        let schema = self.schema.clone()?;
        Some(match &self.table {
            Some(table) => Target::Table {
                schema,
                table: table.clone(),
                comment: self.comment.clone(),
            },
            None => Target::Schema { schema },
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), DocgenError> {
    let cli = Cli::parse();

    let Some(target) = cli.target() else {
        println!("{}", USAGE);
        return Ok(());
    };
    if target.schema().trim().is_empty() {
        return Err(DocgenError::Usage(format!(
            "schema name must not be empty\n{}",
            USAGE
        )));
    }

    setup_logging(&cli.verbosity, &cli.log_format);

    let mut config = Config::parse_file(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    if let Some(template) = cli.template {
        config.document.template = template;
    }
    if let Some(output) = cli.output {
        config.document.output = output;
    }
    if let Some(dialect) = cli.dialect {
        config.database.r#type = dialect;
    }
    config.validate()?;

    let reader = ReaderImpl::connect(&config).await?;
    let generator = DocGenerator::with_config(reader, &config);

    let result = generator
        .generate(&target, &config.document.template, &config.document.output)
        .await;
    generator.reader().close().await;
    let report = result?;

    match &report.output {
        Some(path) => {
            println!("\nDocument written: {}", path.display());
            println!("  Sections: {}", report.sections.len());
        }
        None => println!("\nNothing to document; no file written."),
    }
    if !report.skipped.is_empty() {
        println!("  Skipped tables:");
        for skipped in &report.skipped {
            println!("    {} ({})", skipped.table, skipped.reason);
        }
    }

    Ok(())
}

/// `RUST_LOG`, when set, takes precedence over `--verbosity`.
fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
