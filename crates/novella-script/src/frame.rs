//! Frame records — one narrative beat each.

use serde::Deserialize;

/// One narrative beat, addressed by its position in the script.
///
/// Everything except `text` is optional presentation metadata; a frame
/// with only `text` is plain narration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Frame {
    /// The dialogue or narration line shown for this frame.
    pub text: String,
    /// Who is speaking, if anyone.
    #[serde(default)]
    pub speaker: Option<String>,
    /// Background image reference.
    #[serde(default)]
    pub background: Option<String>,
    /// Background music reference, looped while the frame is current.
    #[serde(default)]
    pub background_music: Option<String>,
    /// Character sprite reference.
    #[serde(default)]
    pub sprite: Option<String>,
    /// Voice clip reference.
    #[serde(default)]
    pub voice: Option<String>,
    /// Whether the choice menu is offered on this frame.
    #[serde(default)]
    pub has_choices: bool,
    /// Whether reaching this frame starts a new scene.
    #[serde(default)]
    pub is_scene_change: bool,
    /// Whether advancing past this frame jumps to the reconvergence
    /// index instead of the next frame.
    #[serde(default)]
    pub resumes_main_route: bool,
}
