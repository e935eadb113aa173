//! The script store itself: validated, immutable after load.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::choice::{BranchKey, ChoicePoint};
use crate::error::ScriptError;
use crate::frame::Frame;

/// Branch routing configuration.
///
/// `entries` holds the one-shot entry frame for each branch; a branch is
/// jumped into the first time it is selected and never again.
/// `resume_index` is the reconvergence point: the frame every detour
/// funnels back to when a frame flagged `resumes_main_route` is advanced
/// past.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Routing {
    /// Entry frame index per branch.
    pub entries: BTreeMap<BranchKey, usize>,
    /// The frame index where all branches rejoin the main route.
    pub resume_index: usize,
}

/// The immutable script store: frames, choice points, and routing.
///
/// Constructed once at startup through [`Script::new`] or
/// [`Script::from_yaml_str`] and read-only thereafter. Saves never
/// persist script content: a snapshot only holds indices into it, so a
/// save is only valid against a script of the same shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawScript")]
pub struct Script {
    frames: Vec<Frame>,
    choice_points: Vec<ChoicePoint>,
    routing: Routing,
}

/// Unvalidated deserialization target for [`Script`].
#[derive(Debug, Deserialize)]
struct RawScript {
    frames: Vec<Frame>,
    #[serde(default)]
    choice_points: Vec<ChoicePoint>,
    routing: Routing,
}

impl TryFrom<RawScript> for Script {
    type Error = ScriptError;

    fn try_from(raw: RawScript) -> Result<Self, Self::Error> {
        Self::new(raw.frames, raw.choice_points, raw.routing)
    }
}

impl Script {
    /// Builds a validated script from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Empty`] if `frames` is empty,
    /// [`ScriptError::EntryOutOfBounds`] or
    /// [`ScriptError::ResumeOutOfBounds`] if the routing table points
    /// outside the frame sequence, and [`ScriptError::UnroutedBranch`] if
    /// a choice point offers a branch without a routing entry.
    pub fn new(
        frames: Vec<Frame>,
        choice_points: Vec<ChoicePoint>,
        routing: Routing,
    ) -> Result<Self, ScriptError> {
        if frames.is_empty() {
            return Err(ScriptError::Empty);
        }
        let frame_count = frames.len();
        for (&branch, &index) in &routing.entries {
            if index >= frame_count {
                return Err(ScriptError::EntryOutOfBounds {
                    branch,
                    index,
                    frame_count,
                });
            }
        }
        if routing.resume_index >= frame_count {
            return Err(ScriptError::ResumeOutOfBounds {
                index: routing.resume_index,
                frame_count,
            });
        }
        for (i, point) in choice_points.iter().enumerate() {
            for option in &point.options {
                if !routing.entries.contains_key(&option.branch) {
                    return Err(ScriptError::UnroutedBranch {
                        choice_point: i,
                        branch: option.branch,
                    });
                }
            }
        }
        Ok(Self {
            frames,
            choice_points,
            routing,
        })
    }

    /// Parses and validates a YAML script document.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] if the document is malformed, or
    /// any validation error from [`Script::new`].
    pub fn from_yaml_str(source: &str) -> Result<Self, ScriptError> {
        let raw: RawScript = serde_yaml::from_str(source)?;
        raw.try_into()
    }

    /// The full frame sequence.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The frame at `index`, if in bounds.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// The full choice point sequence.
    #[must_use]
    pub fn choice_points(&self) -> &[ChoicePoint] {
        &self.choice_points
    }

    /// The choice point at `index`, if in bounds.
    #[must_use]
    pub fn choice_point(&self, index: usize) -> Option<&ChoicePoint> {
        self.choice_points.get(index)
    }

    /// The routing table.
    #[must_use]
    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    /// Index of the last frame.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.frames.len() - 1
    }
}
