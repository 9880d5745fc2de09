//! WordprocessingML fragment writers.

/// Escape text for element content and attribute values.
///
/// Characters XML 1.0 cannot carry (C0 controls other than tab, newline and
/// carriage return) are dropped.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

fn run(out: &mut String, text: &str, bold: bool) {
    out.push_str("<w:r>");
    if bold {
        out.push_str("<w:rPr><w:b/></w:rPr>");
    }
    out.push_str(&format!(
        "<w:t xml:space=\"preserve\">{}</w:t></w:r>",
        escape_text(text)
    ));
}

pub(super) fn heading(out: &mut String, style: &str, title: &str) {
    out.push_str(&format!(
        "<w:p><w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>",
        escape_text(style)
    ));
    run(out, title, false);
    out.push_str("</w:p>");
}

pub(super) fn table_start(out: &mut String, width: u32, cell_width: u32, columns: usize) {
    out.push_str(&format!(
        "<w:tbl><w:tblPr><w:tblW w:w=\"{}\" w:type=\"dxa\"/><w:tblBorders>",
        width
    ));
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        out.push_str(&format!(
            "<w:{} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
            edge
        ));
    }
    out.push_str("</w:tblBorders><w:tblLayout w:type=\"fixed\"/></w:tblPr><w:tblGrid>");
    for _ in 0..columns {
        out.push_str(&format!("<w:gridCol w:w=\"{}\"/>", cell_width));
    }
    out.push_str("</w:tblGrid>");
}

pub(super) fn header_row(out: &mut String, labels: &[&str], cell_width: u32, fill: &str) {
    out.push_str("<w:tr>");
    for label in labels {
        out.push_str(&format!(
            "<w:tc><w:tcPr><w:tcW w:w=\"{}\" w:type=\"dxa\"/>\
             <w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/></w:tcPr>\
             <w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr>",
            cell_width, fill
        ));
        run(out, label, true);
        out.push_str("</w:p></w:tc>");
    }
    out.push_str("</w:tr>");
}

pub(super) fn body_row(out: &mut String, cells: &[String], cell_width: u32) {
    out.push_str("<w:tr>");
    for cell in cells {
        out.push_str(&format!(
            "<w:tc><w:tcPr><w:tcW w:w=\"{}\" w:type=\"dxa\"/></w:tcPr>",
            cell_width
        ));
        if cell.is_empty() {
            out.push_str("<w:p/>");
        } else {
            out.push_str("<w:p>");
            run(out, cell, false);
            out.push_str("</w:p>");
        }
        out.push_str("</w:tc>");
    }
    out.push_str("</w:tr>");
}

pub(super) fn table_end(out: &mut String) {
    out.push_str("</w:tbl>");
}

pub(super) fn blank_paragraph(out: &mut String) {
    out.push_str("<w:p><w:pPr><w:jc w:val=\"left\"/></w:pPr></w:p>");
}
