use crate::policy::ScanPolicy;
use awardscan_core::model::{CostTier, Itinerary, Leg};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

/// Matches outbound legs against return legs under the stay-length window.
///
/// Return legs are indexed by exact date so each probe is a lookup, not a
/// scan over every return leg; the flex and stay windows span dozens of days
/// and the destination set dozens of cities, so the nested-scan alternative
/// goes quadratic.
pub struct PairingEngine<'a> {
    policy: &'a ScanPolicy,
}

impl<'a> PairingEngine<'a> {
    pub fn new(policy: &'a ScanPolicy) -> Self {
        Self { policy }
    }

    /// Produce every itinerary candidate whose return date lies within a
    /// flex-adjusted stay window. A pair is identified once by its exact leg
    /// dates, not by every flex offset that matched it.
    pub fn pair(&self, outbound: &[Leg], returns: &[Leg]) -> Vec<Itinerary> {
        let mut by_date: BTreeMap<NaiveDate, Vec<&Leg>> = BTreeMap::new();
        for leg in returns {
            by_date.entry(leg.date).or_default().push(leg);
        }

        // The union of ±flex windows over the inclusive stay range
        // [min, max] is the contiguous span [min - flex, max + flex], so
        // probing each offset once covers every flex-adjusted candidate date.
        let first = self.policy.min_return_days - self.policy.flex_days;
        let last = self.policy.max_return_days + self.policy.flex_days;

        let mut seen = HashSet::new();
        let mut itineraries = Vec::new();

        for out_leg in outbound {
            for offset in first..=last {
                let probe = match out_leg.date.checked_add_signed(Duration::days(offset)) {
                    Some(date) => date,
                    None => continue,
                };
                let Some(candidates) = by_date.get(&probe) else {
                    continue;
                };

                for &ret_leg in candidates {
                    if self.policy.require_cabin_match && ret_leg.cabin != out_leg.cabin {
                        continue;
                    }
                    // The outbound must arrive at the hub the return departs
                    // from; without hub routing the true endpoints must also
                    // close the loop.
                    if ret_leg.origin != out_leg.destination {
                        continue;
                    }
                    let closes_loop = ret_leg.destination == out_leg.origin;
                    if !self.policy.hub_routing && !closes_loop {
                        continue;
                    }

                    let itinerary = Itinerary {
                        outbound: out_leg.clone(),
                        return_leg: ret_leg.clone(),
                        open_jaw: !closes_loop,
                        tier: CostTier::Standard,
                    };
                    if seen.insert(itinerary.fingerprint()) {
                        itineraries.push(itinerary);
                    }
                }
            }
        }
        itineraries
    }
}
