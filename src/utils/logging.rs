//! Logging helpers
//!
//! Subscriber setup plus the banner/summary lines shared by the CLI and the
//! batch runner. Everything goes to stderr so stdout stays clean for
//! `rpm generate --raw`.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const RULE_WIDTH: usize = 60;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when `verbose`.
/// Calling it twice is harmless.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Creates (or truncates) the batch log file with a timestamped header
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let header = format!(
        "{}\nLog Pembuatan RPM - {}\n{}\n\n",
        "=".repeat(RULE_WIDTH),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(RULE_WIDTH)
    );
    fs::write(log_file_path, header)
        .with_context(|| format!("gagal membuat berkas log {log_file_path}"))
}

/// Appends one line to the batch log file
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("gagal membuka berkas log {log_file_path}"))?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        line
    )?;
    Ok(())
}

pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(RULE_WIDTH));
    info!("🚀 Program dimulai - mode batch RPM");
    info!("🤖 Model: {}", config.llm_model_name);
    info!("📁 Folder permintaan: {}", config.request_folder);
    info!("💾 Folder keluaran: {}", config.output_dir);
    if config.export_pdf {
        info!("🖨️ Ekspor PDF: aktif");
    }
    info!("{}", "=".repeat(RULE_WIDTH));
}

pub fn log_requests_loaded(total: usize) {
    info!("✓ Ditemukan {} permintaan RPM", total);
    info!("📋 Diproses satu per satu\n");
}

pub fn log_request_start(index: usize, total: usize, subject: &str) {
    info!("\n{}", "─".repeat(RULE_WIDTH));
    info!("📄 [{}/{}] {}", index, total, subject);
    info!("{}", "─".repeat(RULE_WIDTH));
}

/// Prints the end-of-run summary
pub fn print_final_stats(success: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(RULE_WIDTH));
    info!("📊 Ringkasan pemrosesan");
    info!(
        "Selesai pada: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(RULE_WIDTH));
    info!("✅ Berhasil: {}/{}", success, total);
    info!("❌ Gagal: {}", failed);
    info!("{}", "=".repeat(RULE_WIDTH));
    info!("\nLog disimpan di: {}", log_file_path);
}

/// Cuts `text` to `max_len` characters for log previews
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
