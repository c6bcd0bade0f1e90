//! HTTP client for the Gemini generateContent API.
//!
//! One user turn is one outbound request: classify the input, render the
//! coach prompt, POST it, and either hand back the generated challenge text
//! or a classified error. Failures are never retried; each turn surfaces a
//! single outcome.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::category::{match_category, ChallengeCategory};
use crate::constants::{API_KEY_PLACEHOLDER, GEMINI_API_KEY, GEMINI_API_URL};
use crate::prompt::build_prompt;

/// Everything that can go wrong during one challenge turn.
///
/// Display strings are the user-facing messages; only `Provider` carries text
/// from the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChallengeError {
    #[error("Gemini API key is not configured. Please set GEMINI_API_KEY in your .env file.")]
    ConfigurationMissing,
    #[error("Invalid request to Gemini API. Please check your input.")]
    BadRequest,
    #[error("Invalid API key. Please check your configuration.")]
    Unauthorized,
    #[error("Too many requests. Please try again later.")]
    RateLimited,
    #[error("Gemini API Error: {0}")]
    Provider(String),
    #[error("Invalid response format from Gemini API")]
    InvalidResponseShape,
    #[error("Failed to generate challenge. Please try again.")]
    Unknown,
}

/// A successfully generated challenge.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub text: String,
    pub category: ChallengeCategory,
}

// Request body for generateContent: a single content block carrying the prompt.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

// Response shape. Every level is optional so that a structural mismatch
// surfaces as a classified error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

// Error body Gemini attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

pub struct GeminiClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Client backed by the environment-configured endpoint and credential.
    pub fn from_env() -> Self {
        Self::new(GEMINI_API_URL.clone(), GEMINI_API_KEY.clone())
    }

    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            api_key,
        }
    }

    /// Whether a usable credential is present. The `.env.example` placeholder
    /// counts as missing.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != API_KEY_PLACEHOLDER
    }

    /// Run one full challenge turn for the given user input.
    ///
    /// The credential is checked before any network I/O happens. On success
    /// the returned text has leading/trailing whitespace trimmed.
    #[instrument(skip(self, input))]
    pub async fn request_challenge(&self, input: &str) -> Result<Challenge, ChallengeError> {
        if !self.is_configured() {
            return Err(ChallengeError::ConfigurationMissing);
        }

        let category = match_category(input);
        let prompt = build_prompt(input, category);
        debug!(category = category.label(), "dispatching challenge request");

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("failed to reach Gemini API: {e}");
                ChallengeError::Unknown
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "Gemini API request failed");
            return Err(classify_failure(status, &body));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| ChallengeError::InvalidResponseShape)?;

        let text = extract_text(payload).ok_or(ChallengeError::InvalidResponseShape)?;
        debug!(category = category.label(), "challenge generated");

        Ok(Challenge {
            text: text.trim().to_string(),
            category,
        })
    }
}

// 400/401/429 classify by status alone; any other failing status is a
// provider error when the body carries a message, otherwise unknown.
fn classify_failure(status: StatusCode, body: &str) -> ChallengeError {
    match status {
        StatusCode::BAD_REQUEST => ChallengeError::BadRequest,
        StatusCode::UNAUTHORIZED => ChallengeError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => ChallengeError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message);
            match message {
                Some(message) => ChallengeError::Provider(message),
                None => ChallengeError::Unknown,
            }
        }
    }
}

// First candidate, first content part, text. Anything missing means the
// response shape is not what we expect.
fn extract_text(payload: GenerateContentResponse) -> Option<String> {
    payload
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()?
        .text
}
