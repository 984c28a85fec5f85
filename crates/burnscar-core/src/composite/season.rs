use std::fmt;

use serde::{Deserialize, Serialize};

use crate::io::StackEntry;

/// Meteorological season used to group scenes for compositing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// December of the previous year plus January and February.
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }

    /// Whether a scene acquired in `(year, month)` belongs to this season of
    /// `target_year`.
    pub fn contains(&self, target_year: i32, year: i32, month: u32) -> bool {
        match self {
            Self::Winter => {
                (year == target_year - 1 && month == 12)
                    || (year == target_year && (month == 1 || month == 2))
            }
            Self::Spring => year == target_year && (3..=5).contains(&month),
            Self::Summer => year == target_year && (6..=8).contains(&month),
            Self::Fall => year == target_year && (9..=11).contains(&month),
        }
    }

    /// Scenes of `entries` that fall in this season of `target_year`.
    /// Entries without a derivable month are never selected.
    pub fn select<'a>(&self, target_year: i32, entries: &[&'a StackEntry]) -> Vec<&'a StackEntry> {
        entries
            .iter()
            .copied()
            .filter(|e| {
                e.acquisition_month()
                    .is_some_and(|m| self.contains(target_year, e.year, m))
            })
            .collect()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
