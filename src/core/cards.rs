//! Card types: properties bought at auction and checks paid out when selling.
//!
//! Both are plain value cards. The full contents of each deck are fixed:
//! - Properties: one of each value 1..=30
//! - Checks: two of each value 0..=15 except 1

use serde::{Deserialize, Serialize};

/// Highest property value in the deck.
pub const MAX_PROPERTY_VALUE: u32 = 30;

/// Highest check value in the deck.
pub const MAX_CHECK_VALUE: u32 = 15;

/// A property (asset) players bid for in the buying phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Property(u32);

impl Property {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The full property deck in value order.
    #[must_use]
    pub fn full_deck() -> Vec<Property> {
        (1..=MAX_PROPERTY_VALUE).map(Property).collect()
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({})", self.0)
    }
}

/// A check (reward token) awarded in the selling phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Check(u32);

impl Check {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The full check deck in value order.
    #[must_use]
    pub fn full_deck() -> Vec<Check> {
        (0..=MAX_CHECK_VALUE)
            .filter(|&v| v != 1)
            .flat_map(|v| [Check(v), Check(v)])
            .collect()
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Check({})", self.0)
    }
}
