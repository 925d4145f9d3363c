/// A request to be sent to the completion provider.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    /// The fully rendered prompt.
    pub prompt: String,
    /// How the model should sample the continuation.
    pub sampling: SamplingParams,
}

/// Generation parameters sent along with every prompt.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingParams {
    /// Upper bound of generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling mass.
    pub top_p: f32,
    /// Number of highest probability tokens to keep.
    pub top_k: u32,
    /// Penalty for repeated tokens, `1.0` disables it.
    pub repetition_penalty: f32,
    /// Literal sequences that halt the generation, in order.
    pub stop: Vec<String>,
}
