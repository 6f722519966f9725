use serde::Serialize;

use super::lesson_plan::LessonPlanRequest;
use crate::services::output_parser::{parse_blocks, Block};

/// Text returned for one submission, with its parsed blocks.
///
/// Keeps a snapshot of the request it was generated from; editing the form
/// afterwards makes the document stale without discarding it.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub raw: String,
    pub blocks: Vec<Block>,
    #[serde(skip)]
    pub source: LessonPlanRequest,
}

impl GeneratedDocument {
    pub fn new(raw: String, source: LessonPlanRequest) -> Self {
        let blocks = parse_blocks(&raw);
        Self { raw, blocks, source }
    }

    /// Whether `current` differs from the request this document was built from
    pub fn is_stale(&self, current: &LessonPlanRequest) -> bool {
        &self.source != current
    }
}
