pub mod grouping;
pub mod pairing;
pub mod pipeline;
pub mod policy;
pub mod ranking;

pub use grouping::{group_by_month, MonthGroup};
pub use pairing::PairingEngine;
pub use pipeline::{ScanReport, ScanStats, Scanner};
pub use policy::{PolicyError, ScanPolicy, TierThresholds};
pub use ranking::rank_itineraries;
