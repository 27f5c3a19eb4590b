//! # Prompt Relay
//!
//! A stateless pass-through between the web client and the text-completion
//! provider. The relay owns no conversation state: each call validates one
//! prompt, forwards it with fixed sampling parameters and hands back the
//! first completion choice, lightly post-processed.
//!
//! ```text
//! Wizard prompt → client.rs (provider HTTP call) → artifact strip → text
//! ```
//!
//! Prompt templating happens on the client side (`crate::wizard::prompts`);
//! this layer never wraps the prompt in a system prompt or template.

pub mod client;

pub use client::{CompletionClient, OpenAiClient};

use serde::{Deserialize, Serialize};

/// The only inbound shape the relay accepts.
#[derive(Deserialize, Debug)]
pub struct GenerationRequest {
    pub prompt: String,
}

/// Outbound shape: exactly one field populated, the other omitted.
#[derive(Serialize, Debug, Default)]
pub struct GenerationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Strips the cosmetic `"\n\n"` prefix the completion API tends to emit.
///
/// This is a literal-prefix check, not general trimming: any other leading
/// whitespace is preserved verbatim.
pub fn strip_completion_artifact(text: &str) -> &str {
    text.strip_prefix("\n\n").unwrap_or(text)
}
