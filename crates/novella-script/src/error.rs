//! Script loading and validation errors.

use thiserror::Error;

use crate::choice::BranchKey;

/// Errors raised while loading or validating a script document.
///
/// All of these are authoring-time failures: a script that loads cleanly
/// can be navigated without further bounds or routing surprises.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The document is not valid YAML or does not match the schema.
    #[error("script parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The script contains no frames.
    #[error("script has no frames")]
    Empty,

    /// A routing entry points outside the frame sequence.
    #[error(
        "routing entry for branch {branch} points at frame {index}, \
         but the script has {frame_count} frames"
    )]
    EntryOutOfBounds {
        /// The branch whose entry is invalid.
        branch: BranchKey,
        /// The out-of-bounds entry index.
        index: usize,
        /// Number of frames in the script.
        frame_count: usize,
    },

    /// The reconvergence index points outside the frame sequence.
    #[error("resume index {index} is out of bounds, the script has {frame_count} frames")]
    ResumeOutOfBounds {
        /// The out-of-bounds resume index.
        index: usize,
        /// Number of frames in the script.
        frame_count: usize,
    },

    /// A choice point offers a branch the routing table does not cover.
    #[error("choice point {choice_point} offers branch {branch}, which has no routing entry")]
    UnroutedBranch {
        /// Index of the offending choice point.
        choice_point: usize,
        /// The unrouted branch.
        branch: BranchKey,
    },
}
