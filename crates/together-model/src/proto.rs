use banter_model::CompletionRequest;
use serde::Serialize;

use crate::TogetherConfig;

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletionBody {
    prompt: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    repetition_penalty: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &CompletionRequest,
    config: &TogetherConfig,
) -> CompletionBody {
    let sampling = &req.sampling;
    CompletionBody {
        prompt: req.prompt.clone(),
        model: config.model.clone(),
        max_tokens: sampling.max_tokens,
        temperature: sampling.temperature,
        top_p: sampling.top_p,
        top_k: sampling.top_k,
        repetition_penalty: sampling.repetition_penalty,
        stop: sampling.stop.clone(),
    }
}
