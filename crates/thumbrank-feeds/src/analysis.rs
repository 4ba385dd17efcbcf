//! Thumbnail commentary from a multimodal model.
//!
//! [`GeminiAnalyst`] downloads the thumbnail when it can and sends it inline
//! (base64) together with the prompt from [`thumbrank_core::prompt`]. When the
//! image cannot be fetched the request goes out text-only and the prompt says
//! so.

use base64::{engine::general_purpose::STANDARD as Base64Engine, Engine as _};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thumbrank_core::{config::AnalysisConfig, prompt::build_prompt, ThumbnailRecord};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
const INVALID_KEY_MARKER: &str = "API key not valid";

/// Shown when the model answers with no text.
pub const EMPTY_ANSWER: &str = "無法產生分析結果。";

/// Commentary provider interface.
#[async_trait::async_trait]
pub trait Analyst: Send + Sync {
    /// Produce commentary for one record.
    async fn analyze(&self, record: &ThumbnailRecord) -> Result<String, AnalysisError>;

    /// Provider label for the popup title.
    fn provider(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No API key: set the {env} environment variable")]
    MissingApiKey { env: String },

    #[error("API key rejected: {0}")]
    InvalidApiKey(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AnalysisError {
    /// Localized text shown in the commentary popup.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::MissingApiKey { env } => {
                format!("找不到 API Key。請確認您已設定名為 '{env}' 的環境變數，然後重新啟動。")
            }
            AnalysisError::InvalidApiKey(_) => {
                "分析失敗：API Key 無效。請檢查您的 Google AI Studio 金鑰是否正確複製，且沒有多餘空格。"
                    .to_string()
            }
            AnalysisError::Api(_) | AnalysisError::Network(_) => {
                "分析失敗。請檢查您的網路連線或 API Key 設定。".to_string()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct GeminiAnalyst {
    client: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    endpoint: String,
    model: String,
    low_ctr_threshold: f64,
}

impl GeminiAnalyst {
    /// Build from config, reading the API key from the environment.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key(),
            api_key_env: config.api_key_env.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            low_ctr_threshold: config.low_ctr_threshold,
        })
    }

    /// Replace the key read from the environment.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Download the thumbnail for inline upload. Any failure means text-only.
    async fn fetch_image(&self, url: &str) -> Option<InlineData> {
        if url.is_empty() {
            return None;
        }

        let response = match self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%url, %err, "could not fetch thumbnail; sending metadata only");
                return None;
            }
        };

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_ascii_lowercase())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());

        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => Some(InlineData {
                mime_type,
                data: Base64Engine.encode(&bytes),
            }),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(%url, %err, "thumbnail body unreadable; sending metadata only");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl Analyst for GeminiAnalyst {
    async fn analyze(&self, record: &ThumbnailRecord) -> Result<String, AnalysisError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AnalysisError::MissingApiKey {
                env: self.api_key_env.clone(),
            });
        };

        let image = self.fetch_image(&record.thumbnail_url).await;
        let prompt = build_prompt(record, self.low_ctr_threshold, image.is_some());
        tracing::debug!(id = %record.id, with_image = image.is_some(), "requesting commentary");

        let mut parts = Vec::with_capacity(2);
        if let Some(inline_data) = image {
            parts.push(Part::InlineData { inline_data });
        }
        parts.push(Part::Text { text: &prompt });
        let request = GenerateRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AnalysisError::Api(format!("Failed to parse response: {e}")))?;

        let text = parsed.text();
        if text.trim().is_empty() {
            Ok(EMPTY_ANSWER.to_string())
        } else {
            Ok(text)
        }
    }

    fn provider(&self) -> String {
        self.model.clone()
    }
}

fn classify_api_error(status: u16, body: &str) -> AnalysisError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    if message.contains(INVALID_KEY_MARKER) {
        AnalysisError::InvalidApiKey(message)
    } else {
        AnalysisError::Api(format!("HTTP {status}: {message}"))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData { inline_data: InlineData },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}
