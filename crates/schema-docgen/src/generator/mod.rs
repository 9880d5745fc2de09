//! Documentation pipeline.
//!
//! Queries the catalog through a [`SchemaReader`], turns each table into a
//! [`RenderedSection`], and writes all sections into one copy of the template.
//! The document is written once, at the end, and only when at least one
//! section was rendered.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::SchemaReader;
use crate::docx::{DocxTemplate, SchemaDocument};
use crate::error::Result;
use crate::render::{resolve_title, RenderOptions, RenderedSection};
use crate::typemap::TypeNormalizer;

/// What to document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every base table of a schema, in catalog order.
    Schema { schema: String },
    /// One table. `comment` overrides the catalog comment in the title.
    Table {
        schema: String,
        table: String,
        comment: Option<String>,
    },
}

impl Target {
    /// Schema being documented.
    pub fn schema(&self) -> &str {
        match self {
            Target::Schema { schema } | Target::Table { schema, .. } => schema,
        }
    }
}

/// A table left out of the document, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTable {
    pub table: String,
    pub reason: String,
}

/// Sections rendered for a target, before anything touches the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub sections: Vec<RenderedSection>,
    pub skipped: Vec<SkippedTable>,
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Titles of the sections written, in document order.
    pub sections: Vec<String>,
    /// Tables that produced no section.
    pub skipped: Vec<SkippedTable>,
    /// Where the document was written; `None` when there was nothing to write.
    pub output: Option<PathBuf>,
}

/// Drives one documentation run.
pub struct DocGenerator<R> {
    reader: R,
    normalizer: TypeNormalizer,
    options: RenderOptions,
}

impl<R: SchemaReader> DocGenerator<R> {
    /// Create a generator from its parts.
    pub fn new(reader: R, normalizer: TypeNormalizer, options: RenderOptions) -> Self {
        Self {
            reader,
            normalizer,
            options,
        }
    }

    /// Create a generator with the normalizer and layout the config describes.
    pub fn with_config(reader: R, config: &Config) -> Self {
        let normalizer =
            TypeNormalizer::for_dialect(reader.dialect()).with_aliases(&config.type_aliases);
        let options = RenderOptions {
            heading_style: config.document.heading_style.clone(),
            table_width: config.document.table_width,
        };
        Self::new(reader, normalizer, options)
    }

    /// The reader this generator queries.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Load the template, render `target`, and save to `output`.
    pub async fn generate(
        &self,
        target: &Target,
        template: &Path,
        output: &Path,
    ) -> Result<GenerationReport> {
        let template = DocxTemplate::load(template)?;
        let rendered = self.render(target).await?;

        let sections = rendered.sections.iter().map(|s| s.title.clone()).collect();
        if rendered.sections.is_empty() {
            info!("Nothing to document in schema '{}'; no file written", target.schema());
            return Ok(GenerationReport {
                sections,
                skipped: rendered.skipped,
                output: None,
            });
        }

        let mut document = SchemaDocument::new(template, self.options.clone());
        for section in rendered.sections {
            document.append_section(section);
        }
        document.save(output)?;

        Ok(GenerationReport {
            sections,
            skipped: rendered.skipped,
            output: Some(output.to_path_buf()),
        })
    }

    /// Render every section for `target` without touching the filesystem.
    pub async fn render(&self, target: &Target) -> Result<Rendered> {
        match target {
            Target::Schema { schema } => self.render_schema(schema).await,
            Target::Table {
                schema,
                table,
                comment,
            } => self.render_table(schema, table, comment.as_deref()).await,
        }
    }

    /// Render all base tables of a schema. A table whose columns cannot be
    /// read, or that has none, is skipped with a warning.
    pub async fn render_schema(&self, schema: &str) -> Result<Rendered> {
        let tables = self.reader.list_tables(schema).await?;
        let mut rendered = Rendered::default();

        if tables.is_empty() {
            info!("Cannot find any table in schema '{}'", schema);
            return Ok(rendered);
        }
        info!("Documenting {} tables in schema '{}'", tables.len(), schema);

        for table in tables {
            match self.reader.list_columns(schema, &table.name).await {
                Ok(columns) if columns.is_empty() => {
                    warn!("Cannot find columns for table {}.{}; skipped", schema, table.name);
                    rendered.skipped.push(SkippedTable {
                        table: table.name,
                        reason: "no columns".to_string(),
                    });
                }
                Ok(columns) => {
                    let title = resolve_title(&table.name, table.comment.as_deref());
                    debug!("Rendering '{}' ({} columns)", title, columns.len());
                    rendered
                        .sections
                        .push(RenderedSection::build(title, &columns, &self.normalizer));
                }
                Err(e) => {
                    warn!("Skipping table {}.{}: {}", schema, table.name, e);
                    rendered.skipped.push(SkippedTable {
                        table: table.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(rendered)
    }

    /// Render a single table. The title comment is `comment` when given
    /// (an empty one yields the bare table name), else the catalog comment.
    pub async fn render_table(
        &self,
        schema: &str,
        table: &str,
        comment: Option<&str>,
    ) -> Result<Rendered> {
        let mut rendered = Rendered::default();

        let columns = self.reader.list_columns(schema, table).await?;
        if columns.is_empty() {
            warn!("Cannot find table {}.{}", schema, table);
            rendered.skipped.push(SkippedTable {
                table: table.to_string(),
                reason: "no columns".to_string(),
            });
            return Ok(rendered);
        }

        // An explicit comment, even an empty one, replaces the catalog comment.
        let comment = match comment {
            Some(c) => Some(c.to_string()),
            None => self.reader.table_comment(schema, table).await?,
        };

        let title = resolve_title(table, comment.as_deref());
        debug!("Rendering '{}' ({} columns)", title, columns.len());
        rendered
            .sections
            .push(RenderedSection::build(title, &columns, &self.normalizer));
        Ok(rendered)
    }
}
