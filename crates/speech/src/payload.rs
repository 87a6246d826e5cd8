//! Request body for the batch avatar synthesis "create job" call.
//!
//! Output format, codec, subtitles, and background are fixed; only the
//! text, voice, and avatar selection come from the caller.

use std::collections::BTreeMap;

use avatar_core::synthesis::SynthesisRequest;
use serde::Serialize;

const INPUT_KIND_PLAIN_TEXT: &str = "plainText";
const VIDEO_FORMAT: &str = "mp4";
const VIDEO_CODEC: &str = "h264";
const SUBTITLE_TYPE: &str = "soft_embedded";
const BACKGROUND_COLOR: &str = "#FFFFFFFF";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSynthesisPayload {
    pub synthesis_config: SynthesisConfig,
    /// Custom voice deployments; always empty.
    pub custom_voices: BTreeMap<String, String>,
    pub input_kind: &'static str,
    pub inputs: Vec<SynthesisInput>,
    pub avatar_config: AvatarConfig,
}

#[derive(Debug, Serialize)]
pub struct SynthesisConfig {
    pub voice: String,
}

#[derive(Debug, Serialize)]
pub struct SynthesisInput {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarConfig {
    pub customized: bool,
    pub talking_avatar_character: String,
    pub talking_avatar_style: String,
    pub video_format: &'static str,
    pub video_codec: &'static str,
    pub subtitle_type: &'static str,
    pub background_color: &'static str,
}

impl CreateSynthesisPayload {
    pub fn new(request: &SynthesisRequest) -> Self {
        Self {
            synthesis_config: SynthesisConfig {
                voice: request.voice.clone(),
            },
            custom_voices: BTreeMap::new(),
            input_kind: INPUT_KIND_PLAIN_TEXT,
            inputs: vec![SynthesisInput {
                content: request.text.clone(),
            }],
            avatar_config: AvatarConfig {
                customized: false,
                talking_avatar_character: request.character.clone(),
                talking_avatar_style: request.style.clone(),
                video_format: VIDEO_FORMAT,
                video_codec: VIDEO_CODEC,
                subtitle_type: SUBTITLE_TYPE,
                background_color: BACKGROUND_COLOR,
            },
        }
    }
}
