//! Beacon value types.
//!
//! Key types for adapter implementers:
//! - [`BeaconId`]: structural identity of a physical beacon
//! - [`BeaconReading`]: one proximity observation, the unit every delivery
//!   snapshot is made of

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a physical beacon (vendor-assigned major/minor pair).
///
/// Equality is structural; two readings with the same pair describe the
/// same physical installation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BeaconId {
    /// Vendor-assigned major identifier
    pub major: u16,
    /// Vendor-assigned minor identifier
    pub minor: u16,
}

impl BeaconId {
    /// Create an identifier from a major/minor pair
    pub fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for BeaconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}

/// Coarse distance bucket reported for a beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    /// Within arm's reach of the beacon
    Immediate,
    /// Within a few meters
    Near,
    /// Detectable but distant
    Far,
    /// Signal seen, distance class indeterminate
    Unknown,
}

impl Proximity {
    /// Numeric ordering used for strongest-signal selection.
    ///
    /// Lower is closer; `Unknown` ranks last.
    pub fn rank(self) -> u8 {
        match self {
            Proximity::Immediate => 0,
            Proximity::Near => 1,
            Proximity::Far => 2,
            Proximity::Unknown => 3,
        }
    }
}

/// One proximity observation of a beacon.
///
/// Produced continuously by adapters, consumed immediately, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconReading {
    /// Which beacon was observed
    pub id: BeaconId,
    /// Coarse distance bucket
    pub proximity: Proximity,
    /// Received signal strength (dBm)
    pub rssi: i16,
    /// Distance accuracy estimate in meters; negative when unknown
    pub accuracy: f32,
    /// Observation timestamp, microseconds since epoch
    pub timestamp_us: u64,
}

impl BeaconReading {
    /// Whether this reading is a stronger position fix than `other`:
    /// closer proximity class first, then higher signal strength.
    pub fn stronger_than(&self, other: &BeaconReading) -> bool {
        match self.proximity.rank().cmp(&other.proximity.rank()) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => self.rssi > other.rssi,
        }
    }
}

/// Current time in microseconds since the Unix epoch
pub fn now_us() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(proximity: Proximity, rssi: i16) -> BeaconReading {
        BeaconReading {
            id: BeaconId::new(100, 1),
            proximity,
            rssi,
            accuracy: -1.0,
            timestamp_us: 0,
        }
    }

    #[test]
    fn test_proximity_rank_order() {
        assert!(Proximity::Immediate.rank() < Proximity::Near.rank());
        assert!(Proximity::Near.rank() < Proximity::Far.rank());
        assert!(Proximity::Far.rank() < Proximity::Unknown.rank());
    }

    #[test]
    fn test_stronger_than_prefers_proximity_class() {
        // A weak immediate reading beats a strong far one
        let immediate = reading(Proximity::Immediate, -80);
        let far = reading(Proximity::Far, -40);
        assert!(immediate.stronger_than(&far));
        assert!(!far.stronger_than(&immediate));
    }

    #[test]
    fn test_stronger_than_breaks_ties_on_rssi() {
        let strong = reading(Proximity::Near, -50);
        let weak = reading(Proximity::Near, -70);
        assert!(strong.stronger_than(&weak));
        assert!(!weak.stronger_than(&strong));
        // Equal readings: neither is stronger
        assert!(!strong.stronger_than(&strong.clone()));
    }

    #[test]
    fn test_beacon_id_display() {
        assert_eq!(BeaconId::new(7, 42).to_string(), "7:42");
    }
}
