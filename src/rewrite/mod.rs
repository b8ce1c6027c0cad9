//! AI-assisted rewriting of the working draft.
//!
//! The [`Rewriter`] trait is the seam between the editor and whatever
//! service improves the text. [`GeminiRewriter`] talks to Google's
//! Generative Language API; [`RewriteWorker`] runs one request at a time
//! off the UI thread and enforces a deadline.

mod gemini;
mod worker;

pub use gemini::{DEFAULT_MODEL, GeminiRewriter};
pub use worker::RewriteWorker;

use thiserror::Error;

/// Errors from a rewrite request.
///
/// Every variant means "the rewrite failed" to the user; the message is
/// shown as-is in the error banner.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error(
        "API key is missing. Set GEMINI_API_KEY (or VITE_GEMINI_API_KEY) in the environment or a .env.local file."
    )]
    MissingCredentials,

    #[error("Failed to improve text with AI: {0}")]
    Request(String),

    #[error("Failed to improve text with AI: the service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to improve text with AI: unexpected response ({0})")]
    Malformed(String),

    #[error("A rewrite is already in progress")]
    Busy,

    #[error("The rewrite timed out after {0}s. Please try again.")]
    TimedOut(u64),

    #[error("The rewrite worker stopped unexpectedly")]
    WorkerLost,
}

/// Improves Markdown text.
pub trait Rewriter: Send + Sync {
    /// Returns the improved text. Implementations block until done.
    fn improve(&self, text: &str) -> Result<String, RewriteError>;
}

/// Build the instruction sent to the model for `text`.
pub fn build_prompt(text: &str) -> String {
    format!(
        "Please improve the following Markdown text.\n\
         Correct any grammar or spelling errors, improve clarity and flow, and ensure consistent formatting.\n\
         Do not change the core meaning.\n\
         Return ONLY the corrected Markdown text, no preamble or explanation.\n\
         \n\
         Original Text:\n\
         {text}"
    )
}

/// Strip a code fence wrapping the whole reply.
///
/// Models often answer with the Markdown inside a ```markdown block.
/// Fences that only appear somewhere inside the reply are kept.
pub fn strip_wrapping_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return reply;
    };
    let Some((info, body)) = rest.split_once('\n') else {
        return reply;
    };
    if info.contains('`') {
        return reply;
    }
    let Some(body) = body.strip_suffix("```") else {
        return reply;
    };
    // an inner fence means the reply is several blocks, not one wrapper
    if body.contains("\n```") {
        return reply;
    }
    body.strip_suffix('\n').unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_after_instructions() {
        let prompt = build_prompt("# Hello\n\nTeh text.");
        assert!(prompt.starts_with("Please improve the following Markdown text."));
        assert!(prompt.contains("Return ONLY the corrected Markdown text"));
        assert!(prompt.ends_with("Original Text:\n# Hello\n\nTeh text."));
    }

    #[test]
    fn test_strip_markdown_fence() {
        let reply = "```markdown\n# Title\n\nBody.\n```\n";
        assert_eq!(strip_wrapping_fence(reply), "# Title\n\nBody.");
    }

    #[test]
    fn test_strip_bare_fence() {
        assert_eq!(strip_wrapping_fence("```\ntext\n```"), "text");
    }

    #[test]
    fn test_unfenced_reply_is_untouched() {
        let reply = "# Title\n\nBody.\n";
        assert_eq!(strip_wrapping_fence(reply), reply);
    }

    #[test]
    fn test_inner_fences_are_kept() {
        let reply = "```rust\nfn a() {}\n```\n\nSome prose.\n\n```rust\nfn b() {}\n```";
        assert_eq!(strip_wrapping_fence(reply), reply);
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert!(RewriteError::MissingCredentials.to_string().contains("GEMINI_API_KEY"));
        let api = RewriteError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        };
        assert_eq!(
            api.to_string(),
            "Failed to improve text with AI: the service returned 403: API key not valid"
        );
        assert!(RewriteError::TimedOut(30).to_string().contains("30s"));
    }
}
