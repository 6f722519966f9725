pub mod exporter;
pub mod llm_service;
pub mod output_parser;
pub mod prompt_builder;

pub use exporter::{export_markup, render_display_html, PdfExporter};
pub use llm_service::{LlmService, TextGenerator};
pub use output_parser::{parse_blocks, Block};
pub use prompt_builder::build_prompt;
