pub mod document;
pub mod lesson_plan;
pub mod level;
pub mod loaders;
pub mod options;
pub mod phase;
pub mod validation;

pub use document::GeneratedDocument;
pub use lesson_plan::LessonPlanRequest;
pub use level::EducationLevel;
pub use loaders::{load_all_requests, load_request, save_request};
pub use phase::{resolve_phase, Phase};
pub use validation::{is_submittable, missing_fields, validate};
