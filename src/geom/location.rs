use std::fmt;

use serde::{Deserialize, Serialize};

/// Topological position of a point relative to a geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
    /// Not yet computed.
    None,
}

impl Location {
    pub fn symbol(&self) -> char {
        match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
            Location::None => '-',
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
