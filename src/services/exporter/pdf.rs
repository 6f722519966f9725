//! Paginated image export
//!
//! 1. load the display page in a headless browser
//! 2. rasterize the whole output region at [`RASTER_SCALE`]
//! 3. slice the image across A4 portrait pages ([`plan_pages`])
//! 4. print the slices to PDF
//!
//! Every failure collapses into [`ExportError::RenderFailed`]; the target
//! file is only written once the PDF bytes exist.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use tracing::{debug, error, info};

use super::display::PAGE_WIDTH_PX;
use super::signature::export_file_name;
use crate::browser::launch_headless_browser;
use crate::config::Config;
use crate::error::ExportError;
use crate::infrastructure::PageRenderer;
use crate::models::LessonPlanRequest;
use crate::utils::BusyGuard;

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;
const MM_PER_INCH: f64 = 25.4;

/// Upscale factor applied when rasterizing
pub const RASTER_SCALE: f64 = 2.0;

const RASTER_FILE: &str = "raster.png";
const SLICES_FILE: &str = "slices.html";

/// Tolerance below which leftover height does not start a new page
const SLIVER_MM: f64 = 1e-6;

/// Where the rasterized image lands on each page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Image height once scaled to the page width
    pub image_height_mm: f64,
    /// Vertical offset of the image on each page; 0 for the first page,
    /// then one page height further up per page
    pub offsets_mm: Vec<f64>,
}

impl PagePlan {
    pub fn page_count(&self) -> usize {
        self.offsets_mm.len()
    }
}

/// Plans A4 pages for an image of the given pixel size.
///
/// The image is scaled to the full page width; every page shows the next
/// page-height window of it. An exact multiple of the page height does not
/// produce a trailing blank page.
pub fn plan_pages(image_width_px: u32, image_height_px: u32) -> Result<PagePlan, ExportError> {
    if image_width_px == 0 || image_height_px == 0 {
        return Err(ExportError::render_failed(format!(
            "gambar kosong ({image_width_px}x{image_height_px})"
        )));
    }

    let image_height_mm = f64::from(image_height_px) * A4_WIDTH_MM / f64::from(image_width_px);

    let mut offsets_mm = vec![0.0];
    let mut height_left = image_height_mm - A4_HEIGHT_MM;
    while height_left > SLIVER_MM {
        offsets_mm.push(height_left - image_height_mm);
        height_left -= A4_HEIGHT_MM;
    }

    Ok(PagePlan {
        image_height_mm,
        offsets_mm,
    })
}

/// HTML laying out one image window per A4 page
pub fn slices_html(plan: &PagePlan, image_src: &str) -> String {
    let mut html = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>\
@page{{size:A4;margin:0}}html,body{{margin:0;padding:0}}\
.page{{position:relative;width:{w}mm;height:{h}mm;overflow:hidden;break-after:page}}\
.page:last-child{{break-after:auto}}\
.page img{{position:absolute;left:0;width:{w}mm;height:{ih:.3}mm}}\
</style></head><body>",
        w = A4_WIDTH_MM,
        h = A4_HEIGHT_MM,
        ih = plan.image_height_mm,
    );
    for offset in &plan.offsets_mm {
        let _ = write!(
            html,
            "<div class=\"page\"><img src=\"{image_src}\" style=\"top:{offset:.3}mm\"></div>"
        );
    }
    html.push_str("</body></html>");
    html
}

fn a4_print_params() -> PrintToPdfParams {
    PrintToPdfParams {
        paper_width: Some(A4_WIDTH_MM / MM_PER_INCH),
        paper_height: Some(A4_HEIGHT_MM / MM_PER_INCH),
        margin_top: Some(0.0),
        margin_bottom: Some(0.0),
        margin_left: Some(0.0),
        margin_right: Some(0.0),
        print_background: Some(true),
        prefer_css_page_size: Some(true),
        ..Default::default()
    }
}

/// PDF exporter with its own busy flag
pub struct PdfExporter {
    browser_executable: Option<String>,
    busy: AtomicBool,
}

impl PdfExporter {
    pub fn new(config: &Config) -> Self {
        Self {
            browser_executable: config.browser_executable.clone(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Rasterizes `display_html` and writes `RPM-<subject>.pdf` into `out_dir`
    pub async fn export(
        &self,
        display_html: &str,
        req: &LessonPlanRequest,
        out_dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let _guard = BusyGuard::acquire(&self.busy).ok_or(ExportError::InProgress)?;
        let path = out_dir.join(export_file_name(&req.subject, "pdf"));

        info!("🖨️ Membuat PDF: {}", path.display());
        let bytes = self.render(display_html).await.map_err(|e| {
            error!("❌ Gagal membuat PDF: {:#}", e);
            ExportError::render_failed(e)
        })?;

        let write = async {
            tokio::fs::create_dir_all(out_dir).await?;
            tokio::fs::write(&path, &bytes).await
        };
        if let Err(source) = write.await {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(ExportError::WriteFailed {
                path: path.display().to_string(),
                source,
            });
        }

        info!("💾 PDF disimpan: {} ({} byte)", path.display(), bytes.len());
        Ok(path)
    }

    async fn render(&self, display_html: &str) -> Result<Vec<u8>> {
        let workdir = tempfile::tempdir()?;
        let browser = launch_headless_browser(self.browser_executable.as_deref()).await?;

        let result = async {
            let renderer = PageRenderer::new(browser.new_page().await?);
            rasterize_and_print(&renderer, display_html, workdir.path()).await
        }
        .await;

        browser.close().await;
        result
    }
}

async fn rasterize_and_print(renderer: &PageRenderer, html: &str, workdir: &Path) -> Result<Vec<u8>> {
    renderer.set_viewport(PAGE_WIDTH_PX, 1024).await?;
    renderer.load_html(html).await?;

    let size = renderer.content_size().await?;
    debug!("Ukuran konten: {}x{} px", size.width, size.height);
    renderer
        .set_viewport(size.width.ceil() as u32, size.height.ceil() as u32)
        .await?;

    let png = renderer.screenshot_png(size, RASTER_SCALE).await?;
    let plan = plan_pages(
        (size.width * RASTER_SCALE).round() as u32,
        (size.height * RASTER_SCALE).round() as u32,
    )?;
    debug!("{} halaman, tinggi gambar {:.1} mm", plan.page_count(), plan.image_height_mm);

    tokio::fs::write(workdir.join(RASTER_FILE), &png).await?;
    let slices_path = workdir.join(SLICES_FILE);
    tokio::fs::write(&slices_path, slices_html(&plan, RASTER_FILE)).await?;

    renderer
        .goto(&format!("file://{}", slices_path.display()))
        .await?;
    renderer.print_pdf(a4_print_params()).await
}
