//! LLM service - the only component that talks to the network
//!
//! ## Stack
//! - `async-openai` for the chat-completions call
//! - any OpenAI-compatible endpoint (Gemini, Azure, local gateways)
//!
//! The rest of the crate only sees the [`TextGenerator`] port, so tests can
//! swap in a fixed-response stub.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::GenerationError;
use crate::utils::logging::truncate_text;

/// Turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Horizontal rule the template wraps the expected output in
const RULE_MARKER: &str = "---";

/// Removes the first `---` and trims surrounding whitespace
pub fn clean_response(text: &str) -> String {
    text.replacen(RULE_MARKER, "", 1).trim().to_string()
}

/// Cleans the first choice of a reply; nothing left after cleaning counts
/// as an empty reply
fn extract_text(content: Option<String>) -> Result<String, GenerationError> {
    content
        .map(|c| clean_response(&c))
        .filter(|text| !text.is_empty())
        .ok_or_else(GenerationError::empty)
}

/// Generation client backed by an OpenAI-compatible endpoint
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// Builds a client from explicit configuration; each instance carries
    /// its own credential.
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn request(&self, prompt: &str) -> Result<String, GenerationError> {
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(GenerationError::new)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .build()
            .map_err(GenerationError::new)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(GenerationError::new)?;

        extract_text(
            response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content),
        )
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!("Memanggil LLM API, model: {}", self.model_name);
        debug!("Panjang prompt: {} karakter", prompt.chars().count());

        match self.request(prompt).await {
            Ok(text) => {
                info!("✓ Respons diterima ({} karakter)", text.chars().count());
                debug!("Cuplikan: {}", truncate_text(&text, 80));
                Ok(text)
            }
            Err(e) => {
                match std::error::Error::source(&e) {
                    Some(cause) => error!("❌ Panggilan LLM gagal (model: {}): {}", self.model_name, cause),
                    None => error!("❌ LLM mengembalikan respons kosong (model: {})", self.model_name),
                }
                Err(e)
            }
        }
    }
}
