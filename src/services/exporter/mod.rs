//! Document exporters
//!
//! - `display` - parsed blocks to the on-screen HTML page
//! - `markup` - raw text to a Word-compatible `.doc`
//! - `pdf` - display page rasterized into a paginated A4 PDF

pub mod display;
pub mod markup;
pub mod pdf;
pub mod signature;

pub use display::render_display_html;
pub use markup::{export_markup, write_markup, MarkupDocument};
pub use pdf::{plan_pages, PagePlan, PdfExporter};
pub use signature::{export_file_name, format_long_date, SignatureBlock};

/// Escapes text for use inside HTML element content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
