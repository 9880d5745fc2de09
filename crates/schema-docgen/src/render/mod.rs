//! Per-table sections and their WordprocessingML.
//!
//! A section is a heading paragraph, a four-column table (name, type,
//! description, required) and a trailing blank paragraph that separates it
//! from the next section. Styling beyond that comes from the template.

mod xml;

pub use xml::escape_text;

use crate::core::{normalize_comment, ColumnDescriptor};
use crate::typemap::TypeNormalizer;

/// Header labels, in cell order.
pub const HEADER_LABELS: [&str; 4] = ["字段名称", "字段类型", "字段说明", "是否必须"];

/// Required-cell token for NOT NULL columns.
pub const REQUIRED_TOKEN: &str = "是";

/// Required-cell token for nullable columns.
pub const OPTIONAL_TOKEN: &str = "否";

/// Fill color of header cells.
pub const HEADER_SHADING: &str = "CCCCCC";

/// Layout settings taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Paragraph style id for headings, as defined in the template.
    pub heading_style: String,
    /// Total table width in twentieths of a point.
    pub table_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_style: "1".to_string(),
            table_width: 8000,
        }
    }
}

/// Heading text for a table: `"{comment} ({table})"`, or the bare name.
pub fn resolve_title(table: &str, comment: Option<&str>) -> String {
    match normalize_comment(comment.map(str::to_string)) {
        Some(comment) => format!("{} ({})", comment, table),
        None => table.to_string(),
    }
}

/// Required-cell text: the required/optional token plus a default note.
pub fn required_cell(column: &ColumnDescriptor) -> String {
    let token = if column.nullable {
        OPTIONAL_TOKEN
    } else {
        REQUIRED_TOKEN
    };
    match &column.default_value {
        Some(default) => format!("{} (默认值：{})", token, default),
        None => token.to_string(),
    }
}

/// One table's worth of display text, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub title: String,
    pub rows: Vec<[String; 4]>,
}

impl RenderedSection {
    /// Build a section; rows follow `columns` order exactly.
    pub fn build(
        title: impl Into<String>,
        columns: &[ColumnDescriptor],
        normalizer: &TypeNormalizer,
    ) -> Self {
        let rows = columns
            .iter()
            .map(|col| {
                [
                    col.name.clone(),
                    normalizer.normalize(&col.raw_type),
                    col.comment.clone().unwrap_or_default(),
                    required_cell(col),
                ]
            })
            .collect();

        Self {
            title: title.into(),
            rows,
        }
    }

    /// Serialize as body-level WordprocessingML.
    pub fn to_xml(&self, options: &RenderOptions) -> String {
        let cell_width = options.table_width / HEADER_LABELS.len() as u32;
        let mut out = String::new();

        xml::heading(&mut out, &options.heading_style, &self.title);

        xml::table_start(&mut out, options.table_width, cell_width, HEADER_LABELS.len());
        xml::header_row(&mut out, &HEADER_LABELS, cell_width, HEADER_SHADING);
        for row in &self.rows {
            xml::body_row(&mut out, row, cell_width);
        }
        xml::table_end(&mut out);

        xml::blank_paragraph(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dialect;

    fn column(name: &str, raw_type: &str, nullable: bool, default: Option<&str>) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            raw_type: raw_type.to_string(),
            comment: None,
            nullable,
            default_value: default.map(str::to_string),
        }
    }

    #[test]
    fn test_title_with_comment() {
        assert_eq!(resolve_title("orders", Some("订单表")), "订单表 (orders)");
        assert_eq!(resolve_title("t", Some("Users")), "Users (t)");
    }

    #[test]
    fn test_title_without_comment() {
        assert_eq!(resolve_title("orders", None), "orders");
        assert_eq!(resolve_title("orders", Some("")), "orders");
        assert_eq!(resolve_title("orders", Some("null")), "orders");
    }

    #[test]
    fn test_required_cell_tokens() {
        assert_eq!(required_cell(&column("id", "integer", false, None)), REQUIRED_TOKEN);
        assert_eq!(required_cell(&column("n", "text", true, None)), OPTIONAL_TOKEN);
    }

    #[test]
    fn test_required_cell_default_suffix() {
        let cell = required_cell(&column("note", "text", true, Some("''")));
        assert_eq!(cell, "否 (默认值：'')");

        let cell = required_cell(&column("qty", "integer", false, Some("0")));
        assert!(cell.starts_with(REQUIRED_TOKEN));
        assert!(cell.ends_with("(默认值：0)"));
    }

    #[test]
    fn test_build_keeps_column_order() {
        let n = TypeNormalizer::for_dialect(Dialect::Postgres);
        let cols = vec![
            column("z", "integer", false, None),
            column("a", "text", true, None),
            column("m", "integer", true, None),
        ];
        let section = RenderedSection::build("t", &cols, &n);
        let names: Vec<&str> = section.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);

        let reversed: Vec<ColumnDescriptor> = cols.into_iter().rev().collect();
        let section = RenderedSection::build("t", &reversed, &n);
        let names: Vec<&str> = section.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, ["m", "a", "z"]);
    }

    #[test]
    fn test_build_row_cells() {
        let n = TypeNormalizer::for_dialect(Dialect::Postgres);
        let mut col = column("note", "character varying", true, Some("''"));
        col.comment = Some("备注".to_string());

        let section = RenderedSection::build("t", &[col], &n);
        assert_eq!(
            section.rows[0],
            [
                "note".to_string(),
                "varchar".to_string(),
                "备注".to_string(),
                "否 (默认值：'')".to_string(),
            ]
        );
    }

    #[test]
    fn test_to_xml_structure() {
        let n = TypeNormalizer::for_dialect(Dialect::Postgres);
        let section = RenderedSection::build(
            "订单表 (orders)",
            &[column("id", "integer", false, None)],
            &n,
        );
        let xml = section.to_xml(&RenderOptions::default());

        assert!(xml.starts_with("<w:p><w:pPr><w:pStyle w:val=\"1\"/></w:pPr>"));
        assert!(xml.contains("订单表 (orders)"));
        assert!(xml.contains("<w:tblW w:w=\"8000\" w:type=\"dxa\"/>"));
        assert_eq!(xml.matches("<w:gridCol ").count(), 4);
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("w:fill=\"CCCCCC\"").count(), 4);
        assert_eq!(xml.matches("<w:b/>").count(), 4);
        for label in HEADER_LABELS {
            assert!(xml.contains(label));
        }
        assert!(xml.ends_with("<w:p><w:pPr><w:jc w:val=\"left\"/></w:pPr></w:p>"));
    }

    #[test]
    fn test_to_xml_escapes_text() {
        let n = TypeNormalizer::default();
        let mut col = column("a<b", "text", true, Some("'x' & \"y\""));
        col.comment = Some("<script>".to_string());
        let xml = RenderedSection::build("t&t", &[col], &n).to_xml(&RenderOptions::default());

        assert!(xml.contains("t&amp;t"));
        assert!(xml.contains("a&lt;b"));
        assert!(xml.contains("&lt;script&gt;"));
        assert!(!xml.contains("<script>"));
    }
}
