use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rpm_generator::error::GenerationError;
use rpm_generator::models::{load_all_requests, load_request, save_request};
use rpm_generator::orchestrator::ProcessingStats;
use rpm_generator::services::exporter::{export_markup, render_display_html, write_markup};
use rpm_generator::services::output_parser::Block;
use rpm_generator::{App, Config, EducationLevel, LessonPlanRequest, PlanSession, TextGenerator};

const GENERATED: &str = "**RENCANA PEMBELAJARAN MENDALAM (RPM)**\n\
**1. IDENTIFIKASI**\n\
- **Siswa:**\n\
- Rata-rata berusia 13 tahun\n\
**2. DESAIN PEMBELAJARAN**\n\
*Pertemuan 1 (Diskusi)*\n\
Peserta didik membaca teks pengantar.";

/// Replies with a fixed text for prompts that mention a known topic
struct TopicGenerator {
    replies: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl TextGenerator for TopicGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.replies
            .iter()
            .find(|(topic, _)| prompt.contains(topic))
            .map(|(_, reply)| reply.to_string())
            .ok_or_else(|| GenerationError::new("topik tidak dikenal"))
    }
}

const REQUEST_TOML: &str = r#"
institution_name = "SMP Negeri 2 Cimahi"
teacher_name = "Rina Marlina"
teacher_id = "198203152006042003"
principal_name = "Agus Salim"
principal_id = "197011111995121001"
place = "Cimahi"
creation_date = "2025-03-05"
academic_year = "2024/2025"
education_level = "SMP"
grade = "8"
subject = "Bahasa Indonesia"
learning_outcome = "Peserta didik mampu memahami teks eksposisi."
material_topic = "Teks Eksposisi"
session_count = 2
session_duration = "2 x 40 menit"
pedagogical_practices = ["Diskusi"]
graduate_dimensions = ["Komunikasi", "Penalaran Kritis"]
"#;

fn write_request(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn loaded_request_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_request(dir.path(), "bindo.toml", REQUEST_TOML);

    let req = load_request(&path).await.unwrap();
    assert_eq!(req.education_level, EducationLevel::SMP);
    assert_eq!(req.session_count, 2);
    assert_eq!(req.pedagogical_practices, vec!["Diskusi", "Inkuiri"]);
    assert_eq!(req.phase().code(), "D");
}

#[tokio::test]
async fn saved_default_form_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kosong.toml");
    let original = LessonPlanRequest::default();

    save_request(&path, &original).await.unwrap();
    let loaded = load_request(&path).await.unwrap();
    assert_eq!(loaded, original);
}

#[tokio::test]
async fn folder_load_skips_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    write_request(dir.path(), "a.toml", REQUEST_TOML);
    write_request(dir.path(), "b.toml", "session_count = \"banyak\"");
    write_request(dir.path(), "catatan.txt", "bukan toml");

    let requests = load_all_requests(dir.path().to_str().unwrap()).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].0.ends_with("a.toml"));
}

#[tokio::test]
async fn session_generates_parses_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let req = load_request(&write_request(dir.path(), "bindo.toml", REQUEST_TOML))
        .await
        .unwrap();
    let generator = TopicGenerator {
        replies: vec![("Teks Eksposisi", GENERATED)],
    };

    let mut session = PlanSession::new(req);
    let doc = session.submit(&generator).await.unwrap().clone();
    assert_eq!(doc.blocks.len(), 7);
    assert_eq!(
        doc.blocks[2],
        Block::LabeledParagraph {
            label: "Siswa:".to_string()
        }
    );

    let markup = export_markup(&doc.raw, session.request());
    assert_eq!(markup.file_name, "RPM-Bahasa_Indonesia.doc");
    assert!(markup.content.contains("<p>RENCANA PEMBELAJARAN MENDALAM (RPM)</p>"));
    assert!(markup.content.contains("Cimahi, 5 Maret 2025"));

    let out = dir.path().join("out");
    let path = write_markup(&markup, &out).await.unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), markup.content);

    let html = render_display_html(&doc.blocks, session.request());
    assert!(html.contains("<span class=\"label\">Siswa:</span>"));
    assert!(html.contains("<strong>Rina Marlina</strong>"));
}

#[test]
fn unknown_topic_records_generic_error() {
    let generator = TopicGenerator { replies: vec![] };
    let mut req = LessonPlanRequest::default();
    for field in [
        &mut req.institution_name,
        &mut req.teacher_name,
        &mut req.teacher_id,
        &mut req.principal_name,
        &mut req.principal_id,
        &mut req.place,
        &mut req.subject,
        &mut req.learning_outcome,
        &mut req.material_topic,
    ] {
        *field = "x".to_string();
    }
    req.toggle_dimension("Kemandirian", true);

    let mut session = PlanSession::new(req);
    let failed = tokio_test::block_on(session.submit(&generator)).is_err();
    assert!(failed);
    assert_eq!(
        session.last_error(),
        Some("Gagal berkomunikasi dengan server AI. Silakan coba lagi.")
    );
    assert!(session.output().is_none());
}

#[tokio::test]
async fn batch_counts_successes_and_failures() {
    let dir = tempfile::tempdir().unwrap();
    let requests = dir.path().join("requests");
    std::fs::create_dir(&requests).unwrap();
    write_request(&requests, "1-bindo.toml", REQUEST_TOML);
    write_request(
        &requests,
        "2-ipa.toml",
        &REQUEST_TOML
            .replace("Bahasa Indonesia", "IPA")
            .replace("Teks Eksposisi", "Fotosintesis"),
    );
    write_request(&requests, "3-kosong.toml", "grade = \"1\"");

    let config = Config {
        request_folder: requests.display().to_string(),
        output_dir: dir.path().join("out").display().to_string(),
        output_log_file: dir.path().join("batch.log").display().to_string(),
        ..Config::with_api_key("test")
    };
    let generator = Arc::new(TopicGenerator {
        replies: vec![("Teks Eksposisi", GENERATED)],
    });

    let stats = App::with_generator(config, generator).unwrap().run().await.unwrap();
    assert_eq!(
        stats,
        ProcessingStats {
            success: 1,
            failed: 2,
            total: 3
        }
    );
    assert!(dir.path().join("out/RPM-Bahasa_Indonesia.doc").exists());
    assert!(!dir.path().join("out/RPM-IPA.doc").exists());

    let log = std::fs::read_to_string(dir.path().join("batch.log")).unwrap();
    assert_eq!(log.matches("❌").count(), 2);
}
