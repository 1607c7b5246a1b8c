//! Text generation through a pretrained language model.
//!
//! The model runs behind an inference server; this module fixes the decoding
//! policy and turns prompts into decoded strings.

mod completion;

pub use completion::{CompletionChoice, CompletionGenerator, CompletionRequest, CompletionResponse};

use crate::error::GenerationResult;

/// Turns a prompt into generated text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a continuation of `prompt` capped at `max_length` tokens.
    ///
    /// The returned text may be empty or cut mid-sentence.
    async fn generate(&self, prompt: &str, max_length: u32) -> GenerationResult<String>;
}

/// Decoding settings applied to every generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodingPolicy {
    /// Number of sequences returned per call.
    pub num_return_sequences: u32,

    /// Size of token n-grams that may not repeat.
    pub no_repeat_ngram_size: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Drop model-internal special tokens when decoding.
    pub skip_special_tokens: bool,

    /// Return the prompt followed by the continuation.
    pub echo_prompt: bool,
}

impl DecodingPolicy {
    pub const PAPER: Self = Self {
        num_return_sequences: 1,
        no_repeat_ngram_size: 2,
        temperature: 0.7,
        skip_special_tokens: true,
        echo_prompt: true,
    };
}

impl Default for DecodingPolicy {
    fn default() -> Self {
        Self::PAPER
    }
}
