//! Story generation API client
//!
//! Talks to an OpenAI-compatible chat completions endpoint to rewrite a
//! free-text dream description as a short cinematic narrative.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const USER_AGENT: &str = "dreamtell/0.1.0 (https://github.com/dreamtell/dreamtell)";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const RATE_LIMIT_MS: u64 = 500; // 2 requests per second toward the chat API

/// System prompt steering the model toward narratives that downstream
/// video/audio generation could consume.
const STORY_SYSTEM_PROMPT: &str = "You are a creative storyteller who transforms dreams into vivid, cinematic narratives.\n\
Your task is to take a dream description and convert it into a well-structured story with:\n\
1. Clear scene descriptions suitable for video generation\n\
2. Engaging narrative flow\n\
3. Rich visual details\n\
4. Emotional depth\n\
5. A coherent beginning, middle, and end\n\
\n\
Keep the story between 200-500 words and make it suitable for video/audio generation.";

/// Story client errors
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Model returned an empty completion")]
    EmptyCompletion,
}

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

/// Rate limiter for the chat API
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Story API rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Story generation API client
pub struct StoryClient {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    api_key: String,
    base_url: String,
    model: String,
}

impl StoryClient {
    pub fn new(api_key: String) -> Result<Self, StoryError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoryError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(RATE_LIMIT_MS)),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Override the API base URL (config, stub servers in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Rewrite a dream description as a short cinematic narrative
    pub async fn generate_story(&self, dream_text: &str) -> Result<String, StoryError> {
        // Rate limit
        self.rate_limiter.wait().await;

        let user_message = format!("Transform this dream into a compelling story: {}", dream_text);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: STORY_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %self.model, "Querying chat completions API");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoryError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 401 {
            return Err(StoryError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoryError::ApiError(status.as_u16(), error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| StoryError::ParseError(e.to_string()))?;

        let story = Self::extract_story(&completion).ok_or(StoryError::EmptyCompletion)?;

        tracing::info!(
            model = %self.model,
            story_chars = story.len(),
            "Story generation successful"
        );

        Ok(story)
    }

    /// Get the narrative text from a completion response
    ///
    /// Returns None when the response carries no non-empty content.
    pub fn extract_story(response: &ChatCompletionResponse) -> Option<String> {
        let content = response.choices.first()?.message.content.as_deref()?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
