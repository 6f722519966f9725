use crate::error::{AppResult, FileError};
use crate::models::lesson_plan::LessonPlanRequest;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Parses a request from TOML text and repairs its invariants
pub fn parse_request(content: &str, path: &Path) -> AppResult<LessonPlanRequest> {
    let mut request: LessonPlanRequest =
        toml::from_str(content).map_err(|source| FileError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
    request.normalize();
    Ok(request)
}

/// Loads one request TOML file
pub async fn load_request(path: &Path) -> AppResult<LessonPlanRequest> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

    parse_request(&content, path)
}

/// Loads every `*.toml` request in a folder, sorted by file name.
///
/// Files that fail to load are logged and skipped.
pub async fn load_all_requests(folder_path: &str) -> AppResult<Vec<(PathBuf, LessonPlanRequest)>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: folder_path.to_string(),
            source,
        })?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| FileError::ReadFailed {
            path: folder_path.to_string(),
            source,
        })?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut requests = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::info!(
            "📄 Memuat: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        match load_request(&path).await {
            Ok(request) => {
                tracing::info!("✓ {} / Kelas {} - {}", request.education_level, request.grade, request.subject);
                requests.push((path, request));
            }
            Err(e) => {
                tracing::warn!("⚠️ Gagal memuat {}: {}", path.display(), e);
            }
        }
    }

    Ok(requests)
}

/// Writes a request as TOML, e.g. a fresh form template
pub async fn save_request(path: &Path, request: &LessonPlanRequest) -> AppResult<()> {
    let content = toml::to_string_pretty(request).map_err(FileError::from)?;
    fs::write(path, content)
        .await
        .map_err(|source| FileError::WriteFailed {
            path: path.display().to_string(),
            source,
        })?;
    Ok(())
}
