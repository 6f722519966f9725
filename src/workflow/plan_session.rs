//! Editing session - workflow layer
//!
//! Holds the form being edited together with the outcome of the last
//! submission. One submission runs at a time:
//!
//! ```text
//! normalize → validate → clear previous result → build prompt → generate → parse
//! ```
//!
//! A failure leaves no output behind; a success keeps the document until the
//! next submit, even when the form is edited in between (it is then stale).

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{validate, GeneratedDocument, LessonPlanRequest};
use crate::services::llm_service::TextGenerator;
use crate::services::prompt_builder::build_prompt;
use crate::utils::BusyGuard;

/// One lesson-plan editing session
#[derive(Debug, Default)]
pub struct PlanSession {
    request: LessonPlanRequest,
    busy: AtomicBool,
    last_error: Option<String>,
    output: Option<GeneratedDocument>,
}

impl PlanSession {
    pub fn new(request: LessonPlanRequest) -> Self {
        Self {
            request,
            ..Self::default()
        }
    }

    pub fn request(&self) -> &LessonPlanRequest {
        &self.request
    }

    /// Mutable access to the form; edits after a submit mark the output stale
    pub fn request_mut(&mut self) -> &mut LessonPlanRequest {
        &mut self.request
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// User-facing message of the last failed submit
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn output(&self) -> Option<&GeneratedDocument> {
        self.output.as_ref()
    }

    /// Whether the current form differs from the one that produced the output
    pub fn is_stale(&self) -> bool {
        self.output
            .as_ref()
            .is_some_and(|doc| doc.is_stale(&self.request))
    }

    /// Submits the current form.
    ///
    /// The form is normalized first, so edits made through [`request_mut`]
    /// cannot leave a grade outside the level or a practice list of the
    /// wrong length. A validation failure is returned without touching the
    /// previous result. Otherwise the previous error and output are cleared
    /// before calling the generator.
    ///
    /// [`request_mut`]: Self::request_mut
    pub async fn submit(&mut self, generator: &dyn TextGenerator) -> AppResult<&GeneratedDocument> {
        let Self {
            request,
            busy,
            last_error,
            output,
        } = self;
        let _guard = BusyGuard::acquire(busy).ok_or(AppError::Busy)?;

        request.normalize();
        if let Err(e) = validate(request) {
            warn!("⚠️ {}", e);
            return Err(e.into());
        }

        *last_error = None;
        *output = None;

        let prompt = build_prompt(request);
        info!(
            "📝 Membuat RPM: {} / {} (kelas {})",
            request.subject, request.material_topic, request.grade
        );

        match generator.generate(&prompt).await {
            Ok(raw) => {
                let doc = GeneratedDocument::new(raw, request.clone());
                info!("✓ RPM dibuat: {} blok", doc.blocks.len());
                Ok(&*output.insert(doc))
            }
            Err(e) => {
                *last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, GENERATION_FAILED_MESSAGE};
    use crate::models::EducationLevel;
    use crate::services::output_parser::Block;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedGenerator {
        reply: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedGenerator {
        fn ok(reply: &'static str) -> Self {
            Self {
                reply: Some(reply),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .map(str::to_string)
                .ok_or_else(|| GenerationError::new("koneksi terputus"))
        }
    }

    fn filled() -> LessonPlanRequest {
        let mut req = LessonPlanRequest {
            institution_name: "SMP Negeri 2 Cimahi".to_string(),
            teacher_name: "Rina Marlina".to_string(),
            teacher_id: "198203152006042003".to_string(),
            principal_name: "Agus Salim".to_string(),
            principal_id: "197011111995121001".to_string(),
            place: "Cimahi".to_string(),
            creation_date: "2025-03-05".to_string(),
            subject: "Matematika".to_string(),
            learning_outcome: "Peserta didik dapat menyelesaikan persamaan linear.".to_string(),
            material_topic: "Persamaan Linear Satu Variabel".to_string(),
            ..LessonPlanRequest::default()
        };
        req.set_education_level(EducationLevel::SMP);
        req.toggle_dimension("Kolaborasi", true);
        req
    }

    #[tokio::test]
    async fn success_stores_parsed_document() {
        let generator = FixedGenerator::ok("**RPM**\n- item");
        let mut session = PlanSession::new(filled());

        let doc = session.submit(&generator).await.unwrap();
        assert_eq!(doc.raw, "**RPM**\n- item");
        assert_eq!(
            doc.blocks[0],
            Block::Heading {
                text: "RPM".to_string()
            }
        );
        assert!(session.last_error().is_none());
        assert!(!session.is_stale());
        assert!(!session.is_busy());
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn failure_clears_output_and_records_error() {
        let mut session = PlanSession::new(filled());
        session.submit(&FixedGenerator::ok("lama")).await.unwrap();

        let err = session.submit(&FixedGenerator::failing()).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert!(session.output().is_none());
        assert_eq!(session.last_error(), Some(GENERATION_FAILED_MESSAGE));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn next_submit_clears_previous_error() {
        let mut session = PlanSession::new(filled());
        let _ = session.submit(&FixedGenerator::failing()).await;
        assert!(session.last_error().is_some());

        session.submit(&FixedGenerator::ok("baru")).await.unwrap();
        assert!(session.last_error().is_none());
        assert_eq!(session.output().map(|d| d.raw.as_str()), Some("baru"));
    }

    #[tokio::test]
    async fn validation_blocks_without_calling_generator() {
        let generator = FixedGenerator::ok("tidak dipakai");
        let mut session = PlanSession::new(LessonPlanRequest::default());

        let err = session.submit(&generator).await.unwrap_err();
        match err {
            AppError::Validation(v) => assert!(!v.missing.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(generator.calls(), 0);
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn editing_after_submit_makes_output_stale() {
        let mut session = PlanSession::new(filled());
        session.submit(&FixedGenerator::ok("isi")).await.unwrap();

        session.request_mut().material_topic = "Pertidaksamaan Linear".to_string();
        assert!(session.is_stale());
        assert_eq!(session.output().map(|d| d.raw.as_str()), Some("isi"));
    }

    #[tokio::test]
    async fn prompt_reflects_current_form() {
        let generator = FixedGenerator::ok("ok");
        let mut session = PlanSession::new(filled());
        session.request_mut().set_session_count(2);
        session.submit(&generator).await.unwrap();

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Persamaan Linear Satu Variabel"));
        assert!(prompts[0].contains("Pertemuan 2"));
    }

    #[tokio::test]
    async fn direct_edits_are_normalized_before_submit() {
        let generator = FixedGenerator::ok("ok");
        let mut req = filled();
        req.set_education_level(EducationLevel::SD);
        let mut session = PlanSession::new(req);
        session.request_mut().session_count = 3;
        session.request_mut().grade = "12".to_string();

        session.submit(&generator).await.unwrap();
        assert_eq!(session.request().pedagogical_practices.len(), 3);
        assert_eq!(session.request().grade, "1");

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("- Fase: A"));
        assert!(!prompts[0].contains("- Fase: -"));
        assert!(!prompts[0].contains("()"));
        assert!(prompts[0].contains("**Pertemuan 3 (Inkuiri)**"));
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("terlambat".to_string())
        }
    }

    #[tokio::test]
    async fn cancelled_submit_releases_busy_flag() {
        let mut session = PlanSession::new(filled());

        let timed_out = tokio::time::timeout(Duration::from_millis(50), session.submit(&SlowGenerator))
            .await
            .is_err();
        assert!(timed_out);
        assert!(!session.is_busy());

        let doc = session.submit(&FixedGenerator::ok("ulang")).await.unwrap();
        assert_eq!(doc.raw, "ulang");
    }
}
