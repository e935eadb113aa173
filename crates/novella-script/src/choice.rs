//! Choice points and branch identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of story branches a player can route onto.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BranchKey {
    /// The sprinter route.
    Sprinter,
    /// The alternate route.
    Alternate,
    /// The third route.
    Third,
}

impl BranchKey {
    /// Returns the identifier used in script documents and snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sprinter => "sprinter",
            Self::Alternate => "alternate",
            Self::Third => "third",
        }
    }
}

impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option of a choice point, tagged with the branch it
/// routes onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// The label shown to the player.
    pub label: String,
    /// The branch this option selects.
    pub branch: BranchKey,
}

/// A decision prompt with its ordered options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChoicePoint {
    /// The prompt shown above the options.
    pub question: String,
    /// The selectable options, in display order.
    pub options: Vec<ChoiceOption>,
}
