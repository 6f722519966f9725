use std::path::Path;

use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// A launched headless browser plus the task draining its event stream
pub struct HeadlessBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl HeadlessBrowser {
    /// Opens a blank page
    pub async fn new_page(&self) -> Result<Page> {
        self.browser.new_page("about:blank").await.map_err(|e| {
            error!("Gagal membuat halaman: {}", e);
            anyhow::anyhow!("Gagal membuat halaman: {}", e)
        })
    }

    /// Closes the browser and waits for the event task to finish
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!("Menutup browser gagal: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
    }
}

/// Launches a headless Chrome/Edge.
///
/// `executable` overrides chromiumoxide's own detection of the browser
/// binary.
pub async fn launch_headless_browser(executable: Option<&str>) -> Result<HeadlessBrowser> {
    info!("🚀 Menjalankan browser headless...");

    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--allow-file-access-from-files",
    ]);
    if let Some(path) = executable {
        debug!("Executable browser: {}", path);
        builder = builder.chrome_executable(Path::new(path));
    }

    let config = builder.build().map_err(|e| {
        error!("Konfigurasi browser headless gagal: {}", e);
        anyhow::anyhow!("Konfigurasi browser headless gagal: {}", e)
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("Browser headless gagal dijalankan: {}", e);
        anyhow::anyhow!("Browser headless gagal dijalankan: {}", e)
    })?;
    debug!("Browser headless berjalan");

    let handler = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    sleep(tokio::time::Duration::from_millis(300)).await;

    Ok(HeadlessBrowser { browser, handler })
}
