//! Error taxonomy for the RPM generator.
//!
//! Library code returns [`AppResult`]; the binary wraps it in `anyhow` where
//! it only needs to report and exit.

use std::fmt;

use thiserror::Error;

/// Generic message shown whenever the generation call fails.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Gagal berkomunikasi dengan server AI. Silakan coba lagi.";

/// Generic message shown whenever the PDF export fails.
pub const EXPORT_FAILED_MESSAGE: &str = "Gagal membuat PDF. Silakan coba lagi.";

/// Hint shown next to a blocked submission.
pub const VALIDATION_HINT: &str = "Harap isi semua kolom untuk melanjutkan.";

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Startup configuration problems, fatal
    #[error("Kesalahan konfigurasi: {0}")]
    Config(#[from] ConfigError),
    /// Submission blocked by empty fields
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Generation call failed
    #[error("{0}")]
    Generation(#[from] GenerationError),
    /// Export failed
    #[error("{0}")]
    Export(#[from] ExportError),
    /// File operations
    #[error("Kesalahan berkas: {0}")]
    File(#[from] FileError),
    /// A generation call is already in flight for this session
    #[error("Permintaan sebelumnya masih diproses")]
    Busy,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The generation endpoint credential is absent
    #[error("kredensial API tidak ditemukan (setel {var_name})")]
    MissingCredential { var_name: String },
    /// An environment variable could not be converted
    #[error("variabel lingkungan {var_name} bernilai '{value}', diharapkan {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// One required field that is still empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    /// Rust field name, as used in request TOML files
    pub field: &'static str,
    /// Form label shown to the teacher
    pub label: &'static str,
}

/// Submission was blocked because at least one required field is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub hint: &'static str,
    pub missing: Vec<MissingField>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.missing.iter().map(|m| m.label).collect();
        write!(f, "{} (kolom kosong: {})", self.hint, labels.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(missing: Vec<MissingField>) -> Self {
        Self {
            hint: VALIDATION_HINT,
            missing,
        }
    }
}

/// Any failure of the generation call.
///
/// The display text is always the same generic message; the cause is only
/// kept for diagnostics.
#[derive(Debug, Error)]
#[error("{}", GENERATION_FAILED_MESSAGE)]
pub struct GenerationError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GenerationError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    /// Failure with no underlying error, e.g. an empty response
    pub fn empty() -> Self {
        Self { source: None }
    }
}

/// Export failures
#[derive(Debug, Error)]
pub enum ExportError {
    /// Rasterization, pagination or printing failed
    #[error("{}", EXPORT_FAILED_MESSAGE)]
    RenderFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Another export is still running on this exporter
    #[error("Ekspor PDF sedang berjalan")]
    InProgress,
    /// Writing the exported file failed
    #[error("gagal menulis {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn render_failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ExportError::RenderFailed {
            source: source.into(),
        }
    }
}

/// File operation errors
#[derive(Debug, Error)]
pub enum FileError {
    /// Reading a file failed
    #[error("gagal membaca {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Writing a file failed
    #[error("gagal menulis {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing failed
    #[error("TOML tidak valid ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML serialization failed
    #[error("gagal menyusun TOML: {0}")]
    TomlWriteFailed(#[from] toml::ser::Error),
    /// Directory does not exist
    #[error("direktori tidak ditemukan: {path}")]
    DirectoryNotFound { path: String },
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
