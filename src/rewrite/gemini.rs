use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{RewriteError, Rewriter, build_prompt, strip_wrapping_fence};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Env vars checked for the API key, in order.
const KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

/// Rewrites text with a Gemini model over the REST API.
#[derive(Debug, Clone)]
pub struct GeminiRewriter {
    api_key: Option<String>,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiRewriter {
    pub fn new(api_key: Option<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout,
        }
    }

    /// Read the API key from the environment after loading `.env.local`
    /// and `.env` from the working directory.
    ///
    /// A missing key is not an error here; requests fail with
    /// [`RewriteError::MissingCredentials`] instead so the editor still
    /// starts.
    pub fn from_env(model: impl Into<String>, timeout: Duration) -> Self {
        // .env.local wins because dotenvy never overrides existing vars
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();

        let api_key = KEY_VARS.iter().find_map(|var| std::env::var(var).ok());
        if api_key.is_none() {
            tracing::warn!("no Gemini API key in the environment; rewrites will fail");
        }
        Self::new(api_key, model, timeout)
    }

    /// Point requests at a different API root (used by tests).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub const fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl Rewriter for GeminiRewriter {
    fn improve(&self, text: &str) -> Result<String, RewriteError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RewriteError::MissingCredentials)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| RewriteError::Request(e.to_string()))?;

        tracing::info!(model = %self.model, chars = text.len(), "requesting rewrite");
        let response = client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&GenerateRequest::for_text(&build_prompt(text)))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    RewriteError::TimedOut(self.timeout.as_secs())
                } else {
                    RewriteError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RewriteError::Request(e.to_string()))?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "rewrite request rejected");
            return Err(RewriteError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let reply = parse_reply(&body)?;
        Ok(finish_reply(text, &reply))
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn for_text(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Concatenate the text parts of the first candidate.
fn parse_reply(body: &str) -> Result<String, RewriteError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| RewriteError::Malformed(e.to_string()))?;
    Ok(response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().map(|p| p.text).collect::<String>())
        .unwrap_or_default())
}

/// Empty replies leave the text as it was.
fn finish_reply(original: &str, reply: &str) -> String {
    let improved = strip_wrapping_fence(reply);
    if improved.trim().is_empty() {
        tracing::debug!("empty rewrite reply; keeping input");
        original.to_string()
    } else {
        improved.to_string()
    }
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| body.trim().chars().take(200).collect(),
        |envelope| envelope.error.message,
    )
}
