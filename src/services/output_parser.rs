//! Output parser - classifies each line of the generated text
//!
//! Single pass, one block per input line. A line's kind depends only on the
//! line itself; multi-line structures such as tables are not recognized and
//! come out as plain paragraphs.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static NUMBERED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\.\s").expect("valid numbered-title pattern"));

/// One classified line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    SubHeading { text: String },
    /// `- **Label:**` with nothing after the closing marker
    LabeledParagraph { label: String },
    ListItem { text: String },
    /// Anything else, including empty lines
    Paragraph { text: String },
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::SubHeading { .. } => "sub_heading",
            Block::LabeledParagraph { .. } => "labeled_paragraph",
            Block::ListItem { .. } => "list_item",
            Block::Paragraph { .. } => "paragraph",
        }
    }
}

/// Classifies one trimmed line. Rules are tried in order; the first match wins.
pub fn classify_line(line: &str) -> Block {
    let line = line.trim();

    if line.starts_with("**") && line.ends_with("**") {
        return Block::Heading {
            text: line.replace("**", ""),
        };
    }
    if line.starts_with('*') && line.ends_with('*') {
        return Block::SubHeading {
            text: line.replace('*', ""),
        };
    }
    if NUMBERED_TITLE.is_match(line) {
        return Block::SubHeading {
            text: line.to_string(),
        };
    }
    if line.starts_with("- **") && line.ends_with("**") && line.len() >= "- ****".len() {
        return Block::LabeledParagraph {
            label: line["- **".len()..line.len() - "**".len()].to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix('-') {
        return Block::ListItem {
            text: rest.trim().to_string(),
        };
    }

    Block::Paragraph {
        text: line.to_string(),
    }
}

/// Splits `text` on `\n` and classifies every line
pub fn parse_blocks(text: &str) -> Vec<Block> {
    text.split('\n').map(classify_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_line_fixture() {
        let text = ["**Title**", "*Sub*", "1. Intro", "- **Label:**", "- item", "plain text"].join("\n");
        let blocks = parse_blocks(&text);
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    text: "Title".to_string()
                },
                Block::SubHeading {
                    text: "Sub".to_string()
                },
                Block::SubHeading {
                    text: "1. Intro".to_string()
                },
                Block::LabeledParagraph {
                    label: "Label:".to_string()
                },
                Block::ListItem {
                    text: "item".to_string()
                },
                Block::Paragraph {
                    text: "plain text".to_string()
                },
            ]
        );
    }

    #[test]
    fn lines_are_trimmed_before_matching() {
        assert_eq!(
            classify_line("   **Pertemuan 1 (Inkuiri)**  "),
            Block::Heading {
                text: "Pertemuan 1 (Inkuiri)".to_string()
            }
        );
        assert_eq!(
            classify_line("     - Pertemuan 1: Diskusi"),
            Block::ListItem {
                text: "Pertemuan 1: Diskusi".to_string()
            }
        );
    }

    #[test]
    fn labeled_line_with_body_is_a_list_item() {
        assert_eq!(
            classify_line("- **Siswa:** Rata-rata berusia 8 tahun."),
            Block::ListItem {
                text: "**Siswa:** Rata-rata berusia 8 tahun.".to_string()
            }
        );
    }

    #[test]
    fn numbered_title_needs_single_digit_and_space() {
        assert_eq!(classify_line("2. DESAIN").kind(), "sub_heading");
        assert_eq!(classify_line("10. Catatan").kind(), "paragraph");
        assert_eq!(classify_line("3.5 persen").kind(), "paragraph");
    }

    #[test]
    fn empty_lines_stay_paragraphs() {
        let blocks = parse_blocks("a\n\nb");
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                text: String::new()
            }
        );
    }

    #[test]
    fn heading_wins_over_sub_heading() {
        assert_eq!(classify_line("***").kind(), "heading");
        assert_eq!(classify_line("*a*").kind(), "sub_heading");
        assert_eq!(classify_line("- **").kind(), "list_item");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&classify_line("- x")).unwrap();
        assert_eq!(json, r#"{"kind":"list_item","text":"x"}"#);
    }
}
