//! Standalone markup and data export.
//!
//! The static markup avoids flexbox and other layout features that
//! headless PDF converters handle poorly. Every element is absolutely
//! positioned inside a paper-sized container.

use crate::markup::{self, Surface, css_num};
use crate::node::{VisualNode, escape};
use crate::renderer::RenderResult;
use formdesign_core::{Document, PageSize};
use std::fmt::Write;
use std::path::Path;

/// Title written into exported documents.
pub const DOCUMENT_TITLE: &str = "Form Template";

const BASE_STYLES: &str = "\
@page { margin: 0; }
* { box-sizing: border-box; margin: 0; padding: 0; }
body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
.form-container { background: white; position: relative; margin: 0 auto; page-break-after: avoid; page-break-inside: avoid; border: 1px solid #ddd; }
.a4-paper { width: 210mm; height: 297mm; min-height: 297mm; }
.letter-paper { width: 216mm; height: 279mm; min-height: 279mm; }
.legal-paper { width: 216mm; height: 356mm; min-height: 356mm; }
";

const ELEMENT_STYLES: &str = "\
.text-field-element { background: transparent; overflow: hidden; }
.label-element { background: transparent; overflow: hidden; }
.rectangle-element { background: transparent; }
.vline-element { background: transparent; }
.hline-element { background: transparent; }
.table-element { background: white; border-collapse: collapse; overflow: hidden; }
.table-row { min-height: 10px; display: block; width: 100%; overflow: hidden; }
.table-row:after { content: \"\"; display: table; clear: both; }
.table-cell { padding: 8px; min-height: 20px; position: relative; line-height: 1.2; vertical-align: top; float: left; box-sizing: border-box; }
.table-header { color: #2c3e50; font-weight: bold; min-height: 10px; }
.checkbox-element { display: block; overflow: hidden; }
.checkbox-label { display: inline-block; line-height: 1.4; }
.signature-element { overflow: hidden; }
@media print {
  body { background: white !important; }
  .form-container { box-shadow: none !important; page-break-inside: avoid; }
  .vline-element { background: transparent !important; }
  .hline-element { background: transparent !important; }
}
";

/// Value of the converter's page-size hint for preset papers.
fn pdf_page_size(page_size: &PageSize) -> Option<&'static str> {
    match page_size {
        PageSize::A4 => Some("A4"),
        PageSize::Letter => Some("Letter"),
        PageSize::Legal => Some("Legal"),
        PageSize::Custom { .. } => None,
    }
}

fn page_metas(page_size: &PageSize, out: &mut String) {
    match pdf_page_size(page_size) {
        Some(name) => {
            let _ = writeln!(out, "<meta name=\"pdfkit-page_size\" content=\"{name}\"/>");
        }
        None => {
            let (w, h) = page_size.size_mm();
            let _ = writeln!(
                out,
                "<meta name=\"pdfkit-page-width\" content=\"{}mm\"/>",
                css_num(w)
            );
            let _ = writeln!(
                out,
                "<meta name=\"pdfkit-page-height\" content=\"{}mm\"/>",
                css_num(h)
            );
        }
    }
    out.push_str("<meta name=\"pdfkit-orientation\" content=\"Portrait\"/>\n");
}

/// Visual node for one element in exported markup.
fn export_node(element: &formdesign_core::Element) -> VisualNode {
    VisualNode::div()
        .with_attr("id", element.markup_id())
        .with_class(markup::kind_class(element))
        .with_styles(markup::position_styles(element, Surface::Export))
        .with_styles(markup::kind_styles(element))
        .with_children(markup::element_content(element, Surface::Export))
}

/// Produce a self-contained HTML document for the layout.
pub fn to_static_markup(document: &Document) -> String {
    let page_size = &document.page_size;
    let paper_class = format!("{}-paper", page_size.name());
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    page_metas(page_size, &mut out);
    let _ = writeln!(out, "<title>{}</title>", escape(DOCUMENT_TITLE));
    out.push_str("<style>\n");
    out.push_str(BASE_STYLES);
    if let PageSize::Custom { .. } = page_size {
        let (w, h) = page_size.size_mm();
        let _ = writeln!(
            out,
            ".custom-paper {{ width: {0}mm; height: {1}mm; min-height: {1}mm; }}",
            css_num(w),
            css_num(h)
        );
    }
    out.push_str(ELEMENT_STYLES);
    out.push_str("</style>\n</head>\n<body>\n");

    let _ = writeln!(out, "<div class=\"form-container {paper_class}\">");
    for element in document.iter() {
        export_node(element).write_html(&mut out);
        out.push('\n');
    }
    out.push_str("</div>\n</body>\n</html>\n");

    log::debug!(
        "Exported {} element(s) as {} markup",
        document.len(),
        page_size.name()
    );
    out
}

/// Write the static markup for `document` to `path`.
pub fn write_static_markup(document: &Document, path: &Path) -> RenderResult<()> {
    std::fs::write(path, to_static_markup(document))?;
    log::info!("Wrote markup to {}", path.display());
    Ok(())
}

/// Pretty JSON data export, accepted back by import.
pub fn export_data(document: &Document) -> RenderResult<String> {
    Ok(document.to_json()?)
}
