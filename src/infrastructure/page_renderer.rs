//! Page renderer - infrastructure layer
//!
//! Owns one browser page and exposes only rendering capabilities. It knows
//! nothing about lesson plans.

use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, PrintToPdfParams, Viewport,
};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Size of the rendered document in CSS pixels
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ContentSize {
    pub width: f64,
    pub height: f64,
}

const CONTENT_SIZE_JS: &str = "({ width: Math.ceil(document.documentElement.scrollWidth), height: Math.ceil(document.documentElement.scrollHeight) })";

pub struct PageRenderer {
    page: Page,
}

impl PageRenderer {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Evaluates JS and returns the JSON result
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// Evaluates JS and deserializes the result
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// Resizes the viewport, in CSS pixels
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        self.page
            .execute(SetDeviceMetricsOverrideParams::new(
                i64::from(width),
                i64::from(height),
                1.0,
                false,
            ))
            .await?;
        Ok(())
    }

    /// Replaces the page content with `html`
    pub async fn load_html(&self, html: &str) -> Result<()> {
        self.page.set_content(html).await?;
        Ok(())
    }

    /// Navigates and waits for the load event
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    pub async fn content_size(&self) -> Result<ContentSize> {
        self.eval_as(CONTENT_SIZE_JS).await
    }

    /// PNG of the region `size`, upscaled by `scale`
    pub async fn screenshot_png(&self, size: ContentSize, scale: f64) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .clip(Viewport {
                x: 0.0,
                y: 0.0,
                width: size.width,
                height: size.height,
                scale,
            })
            .capture_beyond_viewport(true)
            .build();
        Ok(self.page.screenshot(params).await?)
    }

    pub async fn print_pdf(&self, params: PrintToPdfParams) -> Result<Vec<u8>> {
        Ok(self.page.pdf(params).await?)
    }
}
