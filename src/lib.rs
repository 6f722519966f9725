//! # RPM Generator
//!
//! Builds Indonesian deep-learning lesson plans (Rencana Pembelajaran
//! Mendalam) from a filled-in form with an OpenAI-compatible model, then
//! exports them as a Word-compatible document and a paginated PDF.
//!
//! ## Layers
//!
//! ### ① Infrastructure
//! - `infrastructure::PageRenderer` - sole owner of a headless page
//!
//! ### ② Services
//! - `prompt_builder` - form → prompt
//! - `llm_service` - `TextGenerator` port and the `LlmService` client
//! - `output_parser` - generated text → `Block`s
//! - `exporter` - display HTML, `.doc` markup, PDF
//!
//! ### ③ Workflow
//! - `PlanSession` - one form, one submission at a time
//!
//! ### ④ Orchestration
//! - `orchestrator::App` - batch mode over a folder of request TOML files

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{EducationLevel, GeneratedDocument, LessonPlanRequest, Phase};
pub use orchestrator::App;
pub use services::{LlmService, TextGenerator};
pub use workflow::PlanSession;
