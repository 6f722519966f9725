//! Batch runner - orchestration layer
//!
//! Loads every request TOML in the request folder and runs each one through
//! a [`PlanSession`], one at a time. Each successful generation is exported
//! as markup, plus PDF when enabled. A failing request is logged and
//! counted; the run continues with the next one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::{load_all_requests, LessonPlanRequest};
use crate::services::exporter::{export_markup, render_display_html, write_markup, PdfExporter};
use crate::services::llm_service::{LlmService, TextGenerator};
use crate::utils::logging::{
    append_log_line, init_log_file, log_request_start, log_requests_loaded, log_startup,
    print_final_stats,
};
use crate::workflow::PlanSession;

/// Batch application
pub struct App {
    config: Config,
    generator: Arc<dyn TextGenerator>,
    pdf_exporter: Option<PdfExporter>,
}

/// Files written for one request
#[derive(Debug, Clone, Default)]
pub struct RequestOutcome {
    pub markup_path: PathBuf,
    pub pdf_path: Option<PathBuf>,
}

/// Processing totals
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl App {
    /// Initializes the app with the endpoint-backed generator
    pub async fn initialize(config: Config) -> Result<Self> {
        let generator = Arc::new(LlmService::new(&config));
        Self::with_generator(config, generator)
    }

    /// Initializes the app with any generator
    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(&config);

        let pdf_exporter = config.export_pdf.then(|| PdfExporter::new(&config));
        Ok(Self {
            config,
            generator,
            pdf_exporter,
        })
    }

    /// Runs the whole batch
    pub async fn run(&self) -> Result<ProcessingStats> {
        info!("\n📁 Memindai folder permintaan...");
        let requests = load_all_requests(&self.config.request_folder)
            .await
            .with_context(|| format!("gagal memuat permintaan dari {}", self.config.request_folder))?;

        if requests.is_empty() {
            warn!("⚠️ Tidak ada berkas TOML yang perlu diproses, program selesai");
            return Ok(ProcessingStats::default());
        }

        let total = requests.len();
        log_requests_loaded(total);

        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };
        for (index, (path, request)) in requests.into_iter().enumerate() {
            log_request_start(index + 1, total, &request.subject);

            let line = match self.process_request(request).await {
                Ok(outcome) => {
                    stats.success += 1;
                    format!("✓ {} -> {}", path.display(), outcome.markup_path.display())
                }
                Err(e) => {
                    error!("[{}/{}] ❌ {}: {:#}", index + 1, total, path.display(), e);
                    stats.failed += 1;
                    format!("❌ {}: {:#}", path.display(), e)
                }
            };
            if let Err(e) = append_log_line(&self.config.output_log_file, &line) {
                warn!("⚠️ Gagal menulis log: {:#}", e);
            }
        }

        print_final_stats(stats.success, stats.failed, stats.total, &self.config.output_log_file);
        Ok(stats)
    }

    /// Generates and exports one request
    pub async fn process_request(&self, request: LessonPlanRequest) -> Result<RequestOutcome> {
        let mut session = PlanSession::new(request);
        let doc = session.submit(self.generator.as_ref()).await?.clone();
        let req = session.request();
        let out_dir = Path::new(&self.config.output_dir);

        let markup = export_markup(&doc.raw, req);
        let markup_path = write_markup(&markup, out_dir).await?;
        info!("💾 Dokumen disimpan: {}", markup_path.display());

        let pdf_path = match &self.pdf_exporter {
            Some(exporter) => {
                let html = render_display_html(&doc.blocks, req);
                Some(exporter.export(&html, req, out_dir).await?)
            }
            None => None,
        };

        Ok(RequestOutcome {
            markup_path,
            pdf_path,
        })
    }
}
