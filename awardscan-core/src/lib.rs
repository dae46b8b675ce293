pub mod classify;
pub mod model;
pub mod normalize;
pub mod source;

pub use classify::classify_record;
pub use model::{AvailabilityRecord, Cabin, CabinQuote, CostTier, Itinerary, Leg, TierBasis};
pub use normalize::{normalize_record, RejectReason};
pub use source::AvailabilitySource;
