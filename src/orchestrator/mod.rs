//! Orchestration layer
//!
//! ```text
//! batch_processor (Vec<LessonPlanRequest>)
//!     ↓
//! workflow::PlanSession (one request)
//!     ↓
//! services (prompt / llm / parser / exporter)
//!     ↓
//! infrastructure (PageRenderer, PDF only)
//! ```
//!
//! Only this layer decides where files go and keeps the run totals.

pub mod batch_processor;

pub use batch_processor::{App, ProcessingStats, RequestOutcome};
