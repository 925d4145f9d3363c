use std::error::Error;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The raw body returned by a completion provider.
///
/// Providers hand this over untouched, the shape is only checked when
/// the text is extracted, so callers can still show the original
/// envelope when it turns out to be unexpected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionEnvelope(Value);

/// Why the text could not be extracted from an envelope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EnvelopeError {
    /// The envelope is not a JSON object at all.
    Malformed,
    /// The envelope is an object, but it has no `choices[0].text`.
    UnexpectedShape(String),
}

impl Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::Malformed => write!(f, "Invalid response from API"),
            EnvelopeError::UnexpectedShape(reason) => {
                write!(f, "Unexpected response format ({reason})")
            }
        }
    }
}

impl Error for EnvelopeError {}

#[derive(Deserialize)]
struct CompletionBody {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    text: String,
}

impl CompletionEnvelope {
    /// Wraps a JSON value as an envelope.
    #[inline]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Extracts the text of the first choice, untrimmed.
    pub fn first_choice_text(&self) -> Result<String, EnvelopeError> {
        if !self.0.is_object() {
            return Err(EnvelopeError::Malformed);
        }
        let body = CompletionBody::deserialize(&self.0)
            .map_err(|err| EnvelopeError::UnexpectedShape(err.to_string()))?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| {
                EnvelopeError::UnexpectedShape("no choices".to_owned())
            })
    }
}

impl Display for CompletionEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Value> for CompletionEnvelope {
    #[inline]
    fn from(value: Value) -> Self {
        Self(value)
    }
}
