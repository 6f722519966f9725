//! Word-processor export
//!
//! Produces the HTML envelope Word opens as a `.doc`: one `<p>` per line of
//! the raw response, emphasis markers removed, then the two-column
//! signature table.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use super::escape_html;
use super::signature::{export_file_name, SignatureBlock, NAME_LINE};
use crate::error::ExportError;
use crate::models::LessonPlanRequest;

pub const MARKUP_MIME_TYPE: &str = "application/vnd.ms-word";

const ENVELOPE_HEADER: &str = "<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'><head><meta charset='utf-8'><title>Export HTML to Word Document</title></head><body>";
const ENVELOPE_FOOTER: &str = "</body></html>";

static SINGLE_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("valid emphasis pattern"));

/// A ready-to-save markup document
#[derive(Debug, Clone)]
pub struct MarkupDocument {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Removes `**bold**` and `*italic*` markers, keeping their text
pub fn strip_emphasis(text: &str) -> String {
    let text = text.replace("**", "");
    SINGLE_EMPHASIS.replace_all(&text, "$1").into_owned()
}

/// Builds the `.doc` export for a raw response
pub fn export_markup(raw: &str, req: &LessonPlanRequest) -> MarkupDocument {
    let mut content = String::from(ENVELOPE_HEADER);

    for line in strip_emphasis(raw).split('\n') {
        let _ = write!(content, "<p>{}</p>", escape_html(line));
    }
    content.push_str(&signature_table(&SignatureBlock::from_request(req)));
    content.push_str(ENVELOPE_FOOTER);

    MarkupDocument {
        file_name: export_file_name(&req.subject, "doc"),
        mime_type: MARKUP_MIME_TYPE,
        content,
    }
}

fn signature_cell(lines: &[String; 4], align: &str) -> String {
    let mut cell = format!("<td style=\"width:50%; text-align:{align};\">");
    for (i, line) in lines.iter().enumerate() {
        if i == NAME_LINE {
            cell.push_str("<br/><br/><br/>");
            let _ = write!(cell, "<p><strong>{}</strong></p>", escape_html(line));
        } else {
            let _ = write!(cell, "<p>{}</p>", escape_html(line));
        }
    }
    cell.push_str("</td>");
    cell
}

fn signature_table(block: &SignatureBlock) -> String {
    format!(
        "<br/><br/><br/><table style=\"width:100%;\"><tr>{}{}</tr></table>",
        signature_cell(&block.left, "left"),
        signature_cell(&block.right, "right")
    )
}

/// Writes the document into `out_dir`, returning the full path
pub async fn write_markup(doc: &MarkupDocument, out_dir: &Path) -> Result<PathBuf, ExportError> {
    let path = out_dir.join(&doc.file_name);
    let write = async {
        tokio::fs::create_dir_all(out_dir).await?;
        tokio::fs::write(&path, doc.content.as_bytes()).await
    };
    write.await.map_err(|source| ExportError::WriteFailed {
        path: path.display().to_string(),
        source,
    })?;

    info!("💾 Dokumen Word disimpan: {}", path.display());
    Ok(path)
}
