use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Premium cabins consumed downstream. Economy and premium-economy rows are
/// never classified into legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cabin {
    Business,
    First,
}

impl Cabin {
    pub const PREMIUM: [Cabin; 2] = [Cabin::Business, Cabin::First];

    /// One-letter booking code.
    pub fn code(&self) -> char {
        match self {
            Cabin::Business => 'J',
            Cabin::First => 'F',
        }
    }
}

impl fmt::Display for Cabin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cabin::Business => write!(f, "Business"),
            Cabin::First => write!(f, "First"),
        }
    }
}

/// Per-cabin slice of an availability record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinQuote {
    pub available: bool,
    /// Absent, zero or negative makes the cabin ineligible.
    pub mileage_cost: Option<i64>,
    pub taxes: Option<f64>,
    pub remaining_seats: i64,
    pub airlines: String,
}

/// Canonical form of one origin/destination/date availability row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub currency: String,
    pub mixed_cabin: bool,
    pub carrier: Option<String>,
    pub cabins: BTreeMap<Cabin, CabinQuote>,
}

/// One directional award offer. Built once per eligible cabin per record and
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub cabin: Cabin,
    pub miles: u64,
    pub taxes: f64,
    pub currency: String,
    pub remaining_seats: i64,
    pub airlines: String,
}

/// Cost tier assigned by the ranker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Sweet,
    Good,
    #[default]
    Standard,
}

/// Which miles value tier thresholds apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierBasis {
    /// The costlier leg's miles.
    #[default]
    PerLeg,
    /// The round-trip total.
    Total,
}

/// A paired outbound + return combination satisfying the stay window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub outbound: Leg,
    pub return_leg: Leg,
    /// True endpoints differ; the legs only share the turnaround hub.
    pub open_jaw: bool,
    pub tier: CostTier,
}

impl Itinerary {
    pub fn total_miles(&self) -> u64 {
        self.outbound.miles + self.return_leg.miles
    }

    pub fn total_taxes(&self) -> f64 {
        self.outbound.taxes + self.return_leg.taxes
    }

    pub fn stay_days(&self) -> i64 {
        (self.return_leg.date - self.outbound.date).num_days()
    }

    /// Stable identity string for deduplication: route/date/cabin tuple plus
    /// total miles rounded to the nearest thousand. No timestamps, no
    /// randomness, identical across runs.
    pub fn fingerprint(&self) -> String {
        let rounded_miles = (self.total_miles() + 500) / 1_000 * 1_000;
        format!(
            "{}-{}:{}|{}-{}:{}|{}{}|{}",
            self.outbound.origin,
            self.outbound.destination,
            self.outbound.date,
            self.return_leg.origin,
            self.return_leg.destination,
            self.return_leg.date,
            self.outbound.cabin.code(),
            self.return_leg.cabin.code(),
            rounded_miles,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(origin: &str, destination: &str, date: &str, cabin: Cabin, miles: u64) -> Leg {
        Leg {
            origin: origin.to_string(),
            destination: destination.to_string(),
            date: date.parse().unwrap(),
            cabin,
            miles,
            taxes: 0.0,
            currency: "NZD".to_string(),
            remaining_seats: 1,
            airlines: "QR".to_string(),
        }
    }

    #[test]
    fn test_itinerary_totals() {
        let itin = Itinerary {
            outbound: leg("AKL", "DOH", "2025-11-10", Cabin::Business, 70_000),
            return_leg: leg("DOH", "AKL", "2025-12-10", Cabin::Business, 75_000),
            open_jaw: false,
            tier: CostTier::Standard,
        };

        assert_eq!(itin.total_miles(), 145_000);
        assert_eq!(itin.stay_days(), 30);
    }

    #[test]
    fn test_fingerprint_is_stable_and_rounds_miles() {
        let itin = Itinerary {
            outbound: leg("AKL", "DOH", "2025-11-10", Cabin::Business, 70_400),
            return_leg: leg("DOH", "AKL", "2025-12-10", Cabin::Business, 75_100),
            open_jaw: false,
            tier: CostTier::Standard,
        };

        let fp = itin.fingerprint();
        assert_eq!(fp, itin.fingerprint());
        // 145_500 rounds up to 146_000.
        assert_eq!(fp, "AKL-DOH:2025-11-10|DOH-AKL:2025-12-10|JJ|146000");
    }
}
