use crate::grouping::{group_by_month, MonthGroup};
use crate::pairing::PairingEngine;
use crate::policy::ScanPolicy;
use crate::ranking::rank_itineraries;
use awardscan_core::classify::classify_record;
use awardscan_core::model::{Itinerary, Leg};
use awardscan_core::normalize::normalize_record;
use awardscan_store::seen_cache::SeenCache;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Per-stage diagnostic counts for one run. Recoverable skips are visible
/// here and nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub raw_outbound_rows: usize,
    pub raw_return_rows: usize,
    pub rejected_rows: usize,
    pub outbound_legs: usize,
    pub return_legs: usize,
    pub pairs: usize,
    pub suppressed: usize,
    pub reported: usize,
}

/// What one scan hands to the external renderer: ranked, deduplicated
/// itineraries grouped by departure month, plus a small summary.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub run_id: Uuid,
    pub scan_date: NaiveDate,
    pub stats: ScanStats,
    /// Top-ranked itinerary that survived deduplication.
    pub best: Option<Itinerary>,
    pub groups: Vec<MonthGroup>,
}

/// Orchestrates one batch scan: normalize, classify, pair, rank, dedup,
/// group. Synchronous and in-memory; the seen-cache is passed in and handed
/// back via `&mut`, never a process-wide singleton.
pub struct Scanner {
    policy: ScanPolicy,
}

impl Scanner {
    pub fn new(policy: ScanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScanPolicy {
        &self.policy
    }

    /// Run the full pipeline over already-fetched raw rows. A well-formed
    /// input that produces no pairs yields an empty report, not an error.
    pub fn run(
        &self,
        outbound_rows: &[Value],
        return_rows: &[Value],
        cache: &mut SeenCache,
        today: NaiveDate,
    ) -> ScanReport {
        let mut stats = ScanStats {
            raw_outbound_rows: outbound_rows.len(),
            raw_return_rows: return_rows.len(),
            ..ScanStats::default()
        };

        let outbound_legs = self.collect_legs(outbound_rows, &mut stats);
        let return_legs = self.collect_legs(return_rows, &mut stats);
        stats.outbound_legs = outbound_legs.len();
        stats.return_legs = return_legs.len();

        let mut itineraries = PairingEngine::new(&self.policy).pair(&outbound_legs, &return_legs);
        stats.pairs = itineraries.len();
        rank_itineraries(&mut itineraries, &self.policy.tiers);

        cache.prune(today);
        let mut fresh = Vec::with_capacity(itineraries.len());
        for itinerary in itineraries {
            let fingerprint = itinerary.fingerprint();
            if cache.is_new(&fingerprint) {
                fresh.push(itinerary);
            } else {
                stats.suppressed += 1;
            }
            // Every itinerary observed today is marked, reported or not.
            cache.mark_seen(fingerprint, today);
        }
        stats.reported = fresh.len();

        let best = fresh.first().cloned();
        let groups = group_by_month(fresh);

        tracing::info!(
            outbound_legs = stats.outbound_legs,
            return_legs = stats.return_legs,
            pairs = stats.pairs,
            suppressed = stats.suppressed,
            reported = stats.reported,
            "scan complete"
        );

        ScanReport {
            run_id: Uuid::new_v4(),
            scan_date: today,
            stats,
            best,
            groups,
        }
    }

    fn collect_legs(&self, rows: &[Value], stats: &mut ScanStats) -> Vec<Leg> {
        let carrier_filter = self.policy.carrier_filter.as_deref();
        let mut legs = Vec::new();
        for row in rows {
            match normalize_record(row) {
                Ok(record) => legs.extend(classify_record(&record, carrier_filter)),
                Err(reason) => {
                    stats.rejected_rows += 1;
                    tracing::debug!(%reason, "skipping malformed availability row");
                }
            }
        }
        legs
    }
}
