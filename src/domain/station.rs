//! Station identities.
//!
//! [`StationId`] is the closed set of logical roles that may hold a live
//! connection: the operator console (`server`) plus one scouting seat per
//! alliance and slot (`red-1` … `blue-3`). Tokens are case-sensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RelayError;

/// One of the fixed station identities known at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum StationId {
    /// Operator console.
    #[serde(rename = "server")]
    Server,
    /// Red alliance, slot 1.
    #[serde(rename = "red-1")]
    Red1,
    /// Red alliance, slot 2.
    #[serde(rename = "red-2")]
    Red2,
    /// Red alliance, slot 3.
    #[serde(rename = "red-3")]
    Red3,
    /// Blue alliance, slot 1.
    #[serde(rename = "blue-1")]
    Blue1,
    /// Blue alliance, slot 2.
    #[serde(rename = "blue-2")]
    Blue2,
    /// Blue alliance, slot 3.
    #[serde(rename = "blue-3")]
    Blue3,
}

impl StationId {
    /// Every station identity, in display order.
    pub const ALL: [Self; 7] = [
        Self::Server,
        Self::Red1,
        Self::Red2,
        Self::Red3,
        Self::Blue1,
        Self::Blue2,
        Self::Blue3,
    ];

    /// Returns the wire token for this station.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Red1 => "red-1",
            Self::Red2 => "red-2",
            Self::Red3 => "red-3",
            Self::Blue1 => "blue-1",
            Self::Blue2 => "blue-2",
            Self::Blue3 => "blue-3",
        }
    }

    /// Maps a scouting seat to its station identity.
    #[must_use]
    pub const fn from_seat(alliance: Alliance, slot: Slot) -> Self {
        match (alliance, slot.get()) {
            (Alliance::Red, 1) => Self::Red1,
            (Alliance::Red, 2) => Self::Red2,
            (Alliance::Red, _) => Self::Red3,
            (Alliance::Blue, 1) => Self::Blue1,
            (Alliance::Blue, 2) => Self::Blue2,
            (Alliance::Blue, _) => Self::Blue3,
        }
    }

    /// Returns the seat for a scouting station, or `None` for the console.
    #[must_use]
    pub const fn seat(self) -> Option<(Alliance, Slot)> {
        match self {
            Self::Server => None,
            Self::Red1 => Some((Alliance::Red, Slot(1))),
            Self::Red2 => Some((Alliance::Red, Slot(2))),
            Self::Red3 => Some((Alliance::Red, Slot(3))),
            Self::Blue1 => Some((Alliance::Blue, Slot(1))),
            Self::Blue2 => Some((Alliance::Blue, Slot(2))),
            Self::Blue3 => Some((Alliance::Blue, Slot(3))),
        }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StationId {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|station| station.as_str() == s)
            .ok_or_else(|| RelayError::UnknownStation(s.to_string()))
    }
}

/// Match alliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    /// Red alliance.
    Red,
    /// Blue alliance.
    Blue,
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("red"),
            Self::Blue => f.write_str("blue"),
        }
    }
}

impl FromStr for Alliance {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            _ => Err(RelayError::UnknownAlliance(s.to_string())),
        }
    }
}

/// Robot slot within an alliance, always in `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slot(u8);

impl Slot {
    /// Creates a slot, returning `None` outside `1..=3`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        match value {
            1..=3 => Some(Self(value)),
            _ => None,
        }
    }

    /// Returns the slot number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses `/station/{alliance}/{slot}` path segments into a station.
///
/// # Errors
///
/// Returns [`RelayError::InvalidSeat`] if the alliance is not `red`/`blue`
/// or the slot is not an integer in `1..=3`.
pub fn parse_seat(alliance: &str, slot: &str) -> Result<StationId, RelayError> {
    let invalid = || RelayError::InvalidSeat {
        alliance: alliance.to_string(),
        slot: slot.to_string(),
    };
    let parsed_alliance = alliance.parse::<Alliance>().map_err(|_| invalid())?;
    let parsed_slot = slot
        .parse::<u8>()
        .ok()
        .and_then(Slot::new)
        .ok_or_else(invalid)?;
    Ok(StationId::from_seat(parsed_alliance, parsed_slot))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn all_has_seven_distinct_identities() {
        let set: std::collections::HashSet<_> = StationId::ALL.into_iter().collect();
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn parse_accepts_every_token() {
        for station in StationId::ALL {
            let parsed = station.as_str().parse::<StationId>();
            let Ok(parsed) = parsed else {
                panic!("failed to parse {station}");
            };
            assert_eq!(parsed, station);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Red-1".parse::<StationId>().is_err());
        assert!("SERVER".parse::<StationId>().is_err());
        assert!("red1".parse::<StationId>().is_err());
        assert!("green-2".parse::<StationId>().is_err());
    }

    #[test]
    fn serde_uses_wire_tokens() {
        let json = serde_json::to_string(&StationId::Blue3).ok();
        assert_eq!(json.as_deref(), Some("\"blue-3\""));
        let back: Option<StationId> = serde_json::from_str("\"server\"").ok();
        assert_eq!(back, Some(StationId::Server));
    }

    #[test]
    fn alliance_parse_reports_token() {
        assert!(matches!("red".parse::<Alliance>(), Ok(Alliance::Red)));
        assert!(matches!("blue".parse::<Alliance>(), Ok(Alliance::Blue)));
        assert!(matches!(
            "Red".parse::<Alliance>(),
            Err(RelayError::UnknownAlliance(ref token)) if token == "Red"
        ));
    }

    #[test]
    fn slot_bounds() {
        assert!(Slot::new(0).is_none());
        assert!(Slot::new(4).is_none());
        assert_eq!(Slot::new(2).map(Slot::get), Some(2));
    }

    #[test]
    fn seat_round_trip() {
        for station in StationId::ALL {
            if let Some((alliance, slot)) = station.seat() {
                assert_eq!(StationId::from_seat(alliance, slot), station);
            }
        }
        assert!(StationId::Server.seat().is_none());
    }

    #[test]
    fn parse_seat_validates_segments() {
        assert!(matches!(parse_seat("blue", "2"), Ok(StationId::Blue2)));
        assert!(matches!(
            parse_seat("green", "1"),
            Err(RelayError::InvalidSeat { .. })
        ));
        assert!(matches!(
            parse_seat("red", "4"),
            Err(RelayError::InvalidSeat { .. })
        ));
        assert!(matches!(
            parse_seat("red", "one"),
            Err(RelayError::InvalidSeat { .. })
        ));
    }
}
