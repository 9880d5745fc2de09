//! Template-backed `.docx` output.
//!
//! A `.docx` is a zip of OOXML parts. The template is read fully into memory;
//! on save every part is copied through unchanged except `word/document.xml`,
//! whose body receives the rendered sections just before its trailing
//! `<w:sectPr>`. Styles, numbering, headers and footers therefore all come from
//! the template.
//!
//! Saving writes a sibling temporary file and renames it over the target, so a
//! failed run never leaves a truncated document behind.

use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{DocgenError, Result};
use crate::render::{RenderOptions, RenderedSection};

/// Main document part inside the archive.
pub const DOCUMENT_PART: &str = "word/document.xml";

struct Part {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// A loaded template archive.
pub struct DocxTemplate {
    path: PathBuf,
    parts: Vec<Part>,
    document_xml: String,
}

impl DocxTemplate {
    /// Read a template `.docx` from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| DocgenError::template(path, e))?;
        let template = Self::from_bytes(path, bytes)?;
        info!("Loaded template {}", path.display());
        Ok(template)
    }

    /// Parse a template from an in-memory archive. `path` is used for messages.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DocgenError::template(&path, format!("not a .docx archive: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        let mut document_xml = None;

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| DocgenError::template(&path, e))?;
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| DocgenError::template(&path, format!("reading {}: {}", name, e)))?;

            if name == DOCUMENT_PART {
                let xml = String::from_utf8(data.clone()).map_err(|_| {
                    DocgenError::template(&path, format!("{} is not UTF-8", DOCUMENT_PART))
                })?;
                document_xml = Some(xml);
            }

            parts.push(Part {
                name,
                data,
                compression: file.compression(),
                is_dir: file.is_dir(),
            });
        }

        let document_xml = document_xml
            .ok_or_else(|| DocgenError::template(&path, format!("missing {}", DOCUMENT_PART)))?;
        if !document_xml.contains("<w:body") {
            return Err(DocgenError::template(
                &path,
                format!("{} has no <w:body>", DOCUMENT_PART),
            ));
        }

        debug!("Template {} has {} parts", path.display(), parts.len());
        Ok(Self {
            path,
            parts,
            document_xml,
        })
    }

    /// Path the template was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The document being generated: a template plus appended sections.
pub struct SchemaDocument {
    template: DocxTemplate,
    options: RenderOptions,
    sections: Vec<RenderedSection>,
}

impl SchemaDocument {
    /// Start a document from a loaded template.
    pub fn new(template: DocxTemplate, options: RenderOptions) -> Self {
        Self {
            template,
            options,
            sections: Vec::new(),
        }
    }

    /// Append a section after those already added.
    pub fn append_section(&mut self, section: RenderedSection) {
        self.sections.push(section);
    }

    /// Sections in output order.
    pub fn sections(&self) -> &[RenderedSection] {
        &self.sections
    }

    /// The final `word/document.xml` with all sections spliced into the body.
    pub fn document_xml(&self) -> Result<String> {
        let fragment: String = self
            .sections
            .iter()
            .map(|s| s.to_xml(&self.options))
            .collect();
        splice_body(&self.template.document_xml, &fragment)
            .ok_or_else(|| DocgenError::template(&self.template.path, "malformed <w:body>"))
    }

    /// Serialize to `path`, replacing any existing file atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let document_xml = self.document_xml()?;

        let file_name = path
            .file_name()
            .ok_or_else(|| DocgenError::output(path, "not a file path"))?;
        let temp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        let result = self
            .write_archive(&temp_path, &document_xml)
            .and_then(|()| std::fs::rename(&temp_path, path).map_err(|e| DocgenError::output(path, e)));

        if result.is_err() && temp_path.exists() {
            if let Err(e) = std::fs::remove_file(&temp_path) {
                warn!("Could not remove {}: {}", temp_path.display(), e);
            }
        }
        result?;

        info!(
            "Wrote {} section(s) to {}",
            self.sections.len(),
            path.display()
        );
        Ok(())
    }

    fn write_archive(&self, temp_path: &Path, document_xml: &str) -> Result<()> {
        let file = File::create(temp_path).map_err(|e| DocgenError::output(temp_path, e))?;
        let mut writer = ZipWriter::new(file);

        for part in &self.template.parts {
            let method = match part.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);

            if part.is_dir {
                writer.add_directory(part.name.as_str(), options)?;
                continue;
            }

            writer.start_file(part.name.as_str(), options)?;
            let data = if part.name == DOCUMENT_PART {
                document_xml.as_bytes()
            } else {
                part.data.as_slice()
            };
            writer
                .write_all(data)
                .map_err(|e| DocgenError::output(temp_path, e))?;
        }

        let file = writer.finish()?;
        file.sync_all().map_err(|e| DocgenError::output(temp_path, e))?;
        Ok(())
    }
}

/// Insert `fragment` as the last content of `<w:body>`, ahead of the
/// body-level `<w:sectPr>` when there is one.
fn splice_body(document_xml: &str, fragment: &str) -> Option<String> {
    if let Some(body_end) = document_xml.rfind("</w:body>") {
        let body = &document_xml[..body_end];
        let last_block = [body.rfind("</w:p>"), body.rfind("</w:tbl>"), body.rfind("<w:body")]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(0);
        let insert_at = find_element(&body[last_block..], "w:sectPr")
            .map(|pos| last_block + pos)
            .unwrap_or(body_end);

        let mut out = String::with_capacity(document_xml.len() + fragment.len());
        out.push_str(&document_xml[..insert_at]);
        out.push_str(fragment);
        out.push_str(&document_xml[insert_at..]);
        return Some(out);
    }

    let empty = document_xml.find("<w:body/>")?;
    let mut out = String::with_capacity(document_xml.len() + fragment.len() + 16);
    out.push_str(&document_xml[..empty]);
    out.push_str("<w:body>");
    out.push_str(fragment);
    out.push_str("</w:body>");
    out.push_str(&document_xml[empty + "<w:body/>".len()..]);
    Some(out)
}

/// Offset of the first `<name>`, `<name ...>` or `<name/>` start tag.
/// Longer names sharing the prefix (`<w:sectPrChange>`) do not match.
fn find_element(xml: &str, name: &str) -> Option<usize> {
    let open = format!("<{}", name);
    let mut from = 0;
    while let Some(pos) = xml[from..].find(&open) {
        let start = from + pos;
        let after = start + open.len();
        match xml[after..].chars().next() {
            Some('>' | '/') => return Some(start),
            Some(c) if c.is_ascii_whitespace() => return Some(start),
            _ => from = after,
        }
    }
    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::ColumnDescriptor;
    use crate::typemap::TypeNormalizer;
    use tempfile::TempDir;

    pub(crate) const TEMPLATE_DOCUMENT: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:body><w:p><w:r><w:t>Schema</w:t></w:r></w:p>"#,
        r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body></w:document>"#
    );

    pub(crate) const STYLES: &str =
        r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#;

    /// Build a minimal template archive.
    pub(crate) fn template_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file("word/styles.xml", options).unwrap();
        writer.write_all(STYLES.as_bytes()).unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    /// Read one part of a written archive.
    pub(crate) fn read_part(path: &Path, name: &str) -> String {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut out = String::new();
        part.read_to_string(&mut out).unwrap();
        out
    }

    fn sample_section() -> RenderedSection {
        let col = ColumnDescriptor::from_catalog("id", "integer", None, "NO", None);
        RenderedSection::build("orders", &[col], &TypeNormalizer::default())
    }

    #[test]
    fn test_splice_before_body_sect_pr() {
        let out = splice_body(TEMPLATE_DOCUMENT, "<w:p>NEW</w:p>").unwrap();
        let new_at = out.find("<w:p>NEW</w:p>").unwrap();
        assert!(new_at > out.find("Schema").unwrap());
        assert!(new_at < out.find("<w:sectPr>").unwrap());
    }

    #[test]
    fn test_splice_ignores_paragraph_level_sect_pr() {
        let xml = "<w:document><w:body><w:p><w:pPr><w:sectPr/></w:pPr></w:p></w:body></w:document>";
        let out = splice_body(xml, "<X/>").unwrap();
        assert!(out.ends_with("</w:p><X/></w:body></w:document>"));
    }

    #[test]
    fn test_splice_before_sect_pr_with_tracked_change() {
        let xml = concat!(
            "<w:document><w:body><w:p><w:r><w:t>Schema</w:t></w:r></w:p>",
            "<w:sectPr><w:pgSz/><w:sectPrChange w:id=\"1\"><w:sectPr/></w:sectPrChange></w:sectPr>",
            "</w:body></w:document>"
        );
        let out = splice_body(xml, "<NEW/>").unwrap();
        assert!(out.contains("</w:p><NEW/><w:sectPr><w:pgSz/>"));
        assert!(out.contains("<w:sectPrChange w:id=\"1\"><w:sectPr/></w:sectPrChange>"));
    }

    #[test]
    fn test_find_element_skips_longer_names() {
        assert_eq!(find_element("<w:sectPrChange/><w:sectPr>", "w:sectPr"), Some(17));
        assert_eq!(find_element("<w:sectPr w:rsidR=\"1\">", "w:sectPr"), Some(0));
        assert_eq!(find_element("<w:sectPrChange/>", "w:sectPr"), None);
    }

    #[test]
    fn test_splice_empty_body() {
        let out = splice_body("<w:document><w:body/></w:document>", "<X/>").unwrap();
        assert_eq!(out, "<w:document><w:body><X/></w:body></w:document>");
    }

    #[test]
    fn test_load_rejects_non_zip() {
        let err = DocxTemplate::from_bytes("t.docx", b"plain text".to_vec()).err().unwrap();
        assert!(matches!(err, DocgenError::Template { .. }));
    }

    #[test]
    fn test_load_rejects_missing_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/styles.xml", SimpleFileOptions::default()).unwrap();
        writer.write_all(STYLES.as_bytes()).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = DocxTemplate::from_bytes("t.docx", bytes).err().unwrap();
        assert!(err.to_string().contains("missing word/document.xml"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DocxTemplate::load("/no/such/template.docx").err().unwrap();
        assert!(matches!(err, DocgenError::Template { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_save_round_trip_keeps_other_parts() {
        let dir = TempDir::new().unwrap();
        let template = DocxTemplate::from_bytes("t.docx", template_bytes(TEMPLATE_DOCUMENT)).unwrap();
        let mut doc = SchemaDocument::new(template, RenderOptions::default());
        doc.append_section(sample_section());

        let out = dir.path().join("out.docx");
        doc.save(&out).unwrap();

        assert_eq!(read_part(&out, "word/styles.xml"), STYLES);
        let body = read_part(&out, DOCUMENT_PART);
        assert!(body.contains("<w:t xml:space=\"preserve\">orders</w:t>"));
        assert!(body.contains("字段名称"));
        assert!(!dir.path().join(".out.docx.tmp").exists());
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.docx");
        std::fs::write(&out, b"old contents").unwrap();

        let template = DocxTemplate::from_bytes("t.docx", template_bytes(TEMPLATE_DOCUMENT)).unwrap();
        let mut doc = SchemaDocument::new(template, RenderOptions::default());
        doc.append_section(sample_section());
        doc.save(&out).unwrap();

        assert!(read_part(&out, DOCUMENT_PART).contains("orders"));
    }

    #[test]
    fn test_save_to_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("missing").join("out.docx");

        let template = DocxTemplate::from_bytes("t.docx", template_bytes(TEMPLATE_DOCUMENT)).unwrap();
        let doc = SchemaDocument::new(template, RenderOptions::default());
        let err = doc.save(&out).unwrap_err();

        assert!(matches!(err, DocgenError::Output { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_sections_kept_in_append_order() {
        let template = DocxTemplate::from_bytes("t.docx", template_bytes(TEMPLATE_DOCUMENT)).unwrap();
        let mut doc = SchemaDocument::new(template, RenderOptions::default());
        for title in ["b", "a", "c"] {
            let mut s = sample_section();
            s.title = title.to_string();
            doc.append_section(s);
        }

        let titles: Vec<&str> = doc.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["b", "a", "c"]);

        let xml = doc.document_xml().unwrap();
        let pos = |t: &str| xml.find(&format!(">{}</w:t>", t)).unwrap();
        assert!(pos("b") < pos("a") && pos("a") < pos("c"));
    }
}
