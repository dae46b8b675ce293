use crate::policy::TierThresholds;
use awardscan_core::model::{CostTier, Itinerary, TierBasis};
use std::cmp::Ordering;

/// Sort itineraries by cost and annotate each with its tier.
///
/// Miles dominate, taxes break ties, then destination and dates give a
/// deterministic order for runs with identical costs. The input never
/// contains a non-positive total (the pairing engine only emits legs with
/// positive miles), so no error path exists here.
pub fn rank_itineraries(itineraries: &mut [Itinerary], thresholds: &TierThresholds) {
    itineraries.sort_by(compare_cost);
    for itinerary in itineraries.iter_mut() {
        itinerary.tier = classify_tier(representative_miles(itinerary, thresholds.basis), thresholds);
    }
}

fn compare_cost(a: &Itinerary, b: &Itinerary) -> Ordering {
    a.total_miles()
        .cmp(&b.total_miles())
        .then_with(|| {
            a.total_taxes()
                .partial_cmp(&b.total_taxes())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.outbound.destination.cmp(&b.outbound.destination))
        .then_with(|| a.outbound.date.cmp(&b.outbound.date))
        .then_with(|| a.return_leg.date.cmp(&b.return_leg.date))
}

/// The single miles value tier thresholds apply to.
pub fn representative_miles(itinerary: &Itinerary, basis: TierBasis) -> u64 {
    match basis {
        TierBasis::PerLeg => itinerary.outbound.miles.max(itinerary.return_leg.miles),
        TierBasis::Total => itinerary.total_miles(),
    }
}

pub fn classify_tier(miles: u64, thresholds: &TierThresholds) -> CostTier {
    if miles <= thresholds.sweet_spot {
        CostTier::Sweet
    } else if miles < thresholds.upper {
        CostTier::Good
    } else {
        CostTier::Standard
    }
}
