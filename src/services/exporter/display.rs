//! On-screen rendering of a generated document.
//!
//! The page produced here is also what the PDF exporter rasterizes.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use super::escape_html;
use super::signature::{SignatureBlock, NAME_LINE};
use crate::models::LessonPlanRequest;
use crate::services::output_parser::Block;

/// Width of the rendered region in CSS pixels (A4 at 96 dpi)
pub const PAGE_WIDTH_PX: u32 = 794;

static INLINE_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold pattern"));

const STYLE: &str = "body{margin:0;background:#fff;color:#1e293b;font-family:'Segoe UI',Arial,sans-serif;font-size:16px;line-height:1.6}\
#rpm-output{box-sizing:border-box;width:794px;padding:32px 40px}\
h2{font-size:20px;font-weight:700;margin:16px 0 8px}\
h3{font-size:18px;font-weight:600;margin:12px 0 4px;color:#334155}\
p{margin:0 0 8px;min-height:1em}\
li{margin-left:20px;list-style:disc}\
.label{font-weight:600}\
.signatures{display:flex;justify-content:space-between;margin-top:48px;padding-top:32px;font-size:14px}\
.signatures p{margin:0}\
.signatures .right{text-align:right}\
.signatures .gap{height:72px}";

/// Converts `**bold**` inside a body into `<strong>` after escaping
fn inline(text: &str) -> String {
    INLINE_BOLD
        .replace_all(&escape_html(text), "<strong>$1</strong>")
        .into_owned()
}

/// Renders one block as an HTML fragment
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { text } => format!("<h2>{}</h2>", escape_html(text)),
        Block::SubHeading { text } => format!("<h3>{}</h3>", escape_html(text)),
        Block::LabeledParagraph { label } => {
            let label = label.strip_suffix(':').unwrap_or(label.as_str());
            format!("<p><span class=\"label\">{}:</span></p>", escape_html(label))
        }
        Block::ListItem { text } => format!("<li>{}</li>", inline(text)),
        Block::Paragraph { text } => format!("<p>{}</p>", inline(text)),
    }
}

fn signature_column(lines: &[String; 4], class: &str) -> String {
    let mut html = format!("<div class=\"{class}\">");
    for (i, line) in lines.iter().enumerate() {
        if i == NAME_LINE {
            html.push_str("<div class=\"gap\"></div>");
            let _ = write!(html, "<p><strong>{}</strong></p>", escape_html(line));
        } else {
            let _ = write!(html, "<p>{}</p>", escape_html(line));
        }
    }
    html.push_str("</div>");
    html
}

/// Full standalone HTML page: the parsed blocks followed by the signature
/// block.
pub fn render_display_html(blocks: &[Block], req: &LessonPlanRequest) -> String {
    let mut body = String::new();
    for block in blocks {
        body.push_str(&render_block(block));
    }

    let signature = SignatureBlock::from_request(req);
    format!(
        "<!DOCTYPE html><html lang=\"id\"><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head>\
<body><div id=\"rpm-output\"><div>{body}</div><div class=\"signatures\">{left}{right}</div></div></body></html>",
        title = escape_html(&format!("RPM {}", req.subject)),
        left = signature_column(&signature.left, "left"),
        right = signature_column(&signature.right, "right"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::output_parser::parse_blocks;

    #[test]
    fn fixture_renders_each_kind() {
        let blocks = parse_blocks("**Title**\n*Sub*\n1. Intro\n- **Label:**\n- item\nplain text");
        let html: Vec<String> = blocks.iter().map(render_block).collect();
        assert_eq!(
            html,
            vec![
                "<h2>Title</h2>",
                "<h3>Sub</h3>",
                "<h3>1. Intro</h3>",
                "<p><span class=\"label\">Label:</span></p>",
                "<li>item</li>",
                "<p>plain text</p>",
            ]
        );
    }

    #[test]
    fn bold_inside_list_item() {
        let block = Block::ListItem {
            text: "**Siswa:** aktif & kritis".to_string(),
        };
        assert_eq!(render_block(&block), "<li><strong>Siswa:</strong> aktif &amp; kritis</li>");
    }

    #[test]
    fn page_has_output_region_and_signatures() {
        let req = LessonPlanRequest {
            subject: "IPA".to_string(),
            teacher_name: "Siti".to_string(),
            principal_name: "Budi".to_string(),
            place: "Bogor".to_string(),
            creation_date: "2025-03-05".to_string(),
            ..LessonPlanRequest::default()
        };
        let html = render_display_html(&parse_blocks("**RPM**"), &req);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div id=\"rpm-output\"><div><h2>RPM</h2></div>"));
        assert!(html.contains("<p>Bogor, 5 Maret 2025</p>"));
        assert!(html.contains("<p><strong>Budi</strong></p>"));
        assert!(html.contains("<title>RPM IPA</title>"));
    }
}
