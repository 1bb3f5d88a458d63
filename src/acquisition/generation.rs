use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::constants::prompts;
use crate::errors::{AppError, AppResult};
use crate::models::{Category, Difficulty, ProfYear, Question};

/// Black-box question generation service. Both operations return the raw
/// question sequence; set-level validation happens in the acquirer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate_quiz(
        &self,
        category: Category,
        year: ProfYear,
        difficulty: Difficulty,
        topic: &str,
    ) -> AppResult<Vec<Question>>;

    /// `data` is the base64-encoded document body, as produced by the upload
    /// surface.
    async fn extract_from_file(&self, data: &str, mime_type: &str) -> AppResult<Vec<Question>>;
}

/// Gemini REST client with structured JSON output.
pub struct GeminiClient {
    http: reqwest::Client,
    config: Config,
}

impl GeminiClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn generate_content(
        &self,
        body: Value,
        wrap: fn(String) -> AppError,
    ) -> AppResult<Vec<Question>> {
        let api_key = self.config.require_api_key()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.gemini_api_base,
            self.config.gemini_model,
            api_key.expose_secret()
        );

        log::info!(
            "Requesting question generation from model {}",
            self.config.gemini_model
        );

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| wrap(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Generation service returned status {}", status);
            return Err(wrap(format!("service returned status {}", status)));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| wrap(format!("unreadable response body: {}", e)))?;

        parse_questions(&response_text(&payload))
            .map_err(|e| wrap(format!("unparseable question payload: {}", e)))
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate_quiz(
        &self,
        category: Category,
        year: ProfYear,
        difficulty: Difficulty,
        topic: &str,
    ) -> AppResult<Vec<Question>> {
        let body = json!({
            "systemInstruction": {
                "parts": [
                    { "text": prompts::quiz_system_instruction(category, year, difficulty, topic) }
                ]
            },
            "contents": [
                { "parts": [ { "text": prompts::quiz_user_prompt(category, year, difficulty, topic) } ] }
            ],
            "generationConfig": generation_config(),
        });

        self.generate_content(body, AppError::GenerationError).await
    }

    async fn extract_from_file(&self, data: &str, mime_type: &str) -> AppResult<Vec<Question>> {
        let body = json!({
            "contents": [
                {
                    "parts": [
                        { "inlineData": { "data": data, "mimeType": mime_type } },
                        { "text": prompts::FILE_EXTRACTION_PROMPT }
                    ]
                }
            ],
            "generationConfig": generation_config(),
        });

        self.generate_content(body, AppError::ExtractionError).await
    }
}

fn generation_config() -> Value {
    json!({
        "responseMimeType": "application/json",
        "responseJsonSchema": response_schema(),
    })
}

/// JSON schema constraining service output to the canonical question array.
fn response_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(Vec<Question>)).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Long payloads can arrive split across several parts; all text parts of
/// the first candidate are concatenated.
fn response_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default()
}

/// Absent or empty text counts as an empty array; the acquirer rejects it.
fn parse_questions(text: &str) -> serde_json::Result<Vec<Question>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text)
}
