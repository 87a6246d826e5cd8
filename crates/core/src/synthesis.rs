//! Inbound synthesis request.
//!
//! Every field is an opaque pass-through string. Absent or `null` fields
//! fall back to the defaults below; no other validation is performed.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXT: &str = "Hi, I'm a virtual assistant created by Microsoft.";
pub const DEFAULT_VOICE: &str = "en-US-AndrewMultilingualNeural";
pub const DEFAULT_CHARACTER: &str = "Lisa";
pub const DEFAULT_STYLE: &str = "casual-sitting";

/// Parameters for one avatar video synthesis job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SynthesisRequestInput")]
pub struct SynthesisRequest {
    /// Plain text the avatar speaks.
    pub text: String,
    /// Vendor voice name.
    pub voice: String,
    /// Avatar character name.
    pub character: String,
    /// Avatar pose/style name.
    pub style: String,
}

/// Wire form of [`SynthesisRequest`]: every field may be missing or null.
#[derive(Debug, Default, Deserialize)]
struct SynthesisRequestInput {
    text: Option<String>,
    voice: Option<String>,
    character: Option<String>,
    style: Option<String>,
}

impl From<SynthesisRequestInput> for SynthesisRequest {
    fn from(input: SynthesisRequestInput) -> Self {
        Self {
            text: input.text.unwrap_or_else(|| DEFAULT_TEXT.to_string()),
            voice: input.voice.unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            character: input
                .character
                .unwrap_or_else(|| DEFAULT_CHARACTER.to_string()),
            style: input.style.unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        }
    }
}

impl Default for SynthesisRequest {
    fn default() -> Self {
        SynthesisRequestInput::default().into()
    }
}
