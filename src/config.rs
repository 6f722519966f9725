use crate::error::ConfigError;

/// Environment variables holding the generation credential, in lookup order
pub const API_KEY_VARS: [&str; 2] = ["LLM_API_KEY", "API_KEY"];

/// Program configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Folder scanned by batch mode for request TOML files
    pub request_folder: String,
    /// Directory that receives exported documents
    pub output_dir: String,
    /// Also produce the paginated PDF export
    pub export_pdf: bool,
    /// Chrome/Edge executable for PDF export; auto-detected when unset
    pub browser_executable: Option<String>,
    /// Show debug logging
    pub verbose_logging: bool,
    /// Batch summary log
    pub output_log_file: String,
    // --- LLM ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_folder: "requests".to_string(),
            output_dir: "output".to_string(),
            export_pdf: false,
            browser_executable: None,
            verbose_logging: false,
            output_log_file: "rpm_batch.log".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// A missing API key is fatal: the caller must not go on to serve
    /// requests.
    pub fn from_env() -> Result<Self, ConfigError> {
        let llm_api_key = API_KEY_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| ConfigError::MissingCredential {
                var_name: API_KEY_VARS[0].to_string(),
            })?;

        Ok(Self {
            llm_api_key,
            ..Self::from_env_without_credential()?
        })
    }

    /// Same as [`Config::from_env`] but leaves the API key empty, for
    /// commands that never call the generation endpoint
    pub fn from_env_without_credential() -> Result<Self, ConfigError> {
        let default = Self::default();

        Ok(Self {
            request_folder: std::env::var("REQUEST_FOLDER").unwrap_or(default.request_folder),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            export_pdf: parse_bool_var("EXPORT_PDF", default.export_pdf)?,
            browser_executable: std::env::var("BROWSER_EXECUTABLE").ok(),
            verbose_logging: parse_bool_var("VERBOSE_LOGGING", default.verbose_logging)?,
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            llm_api_key: default.llm_api_key,
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        })
    }

    /// Default configuration with an explicit credential
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            llm_api_key: api_key.into(),
            ..Self::default()
        }
    }
}

fn parse_bool_var(var_name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: "bool".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_api_key_keeps_defaults() {
        let config = Config::with_api_key("secret");
        assert_eq!(config.llm_api_key, "secret");
        assert_eq!(config.llm_model_name, "gemini-2.5-flash");
        assert_eq!(config.output_dir, "output");
        assert!(!config.export_pdf);
    }

    #[test]
    fn independent_instances() {
        let a = Config::with_api_key("a");
        let b = Config {
            llm_model_name: "other-model".to_string(),
            ..Config::with_api_key("b")
        };
        assert_eq!(a.llm_api_key, "a");
        assert_eq!(b.llm_api_key, "b");
        assert_ne!(a.llm_model_name, b.llm_model_name);
    }
}
