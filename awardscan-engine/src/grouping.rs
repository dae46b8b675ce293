use awardscan_core::model::Itinerary;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// One calendar month of ranked itineraries, keyed by outbound departure.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    /// Display label for the renderer, e.g. "November 2025".
    pub label: String,
    pub itineraries: Vec<Itinerary>,
}

/// Group by calendar month of the outbound date. Groups come out in
/// chronological order; within a group the incoming rank order is preserved.
pub fn group_by_month(itineraries: Vec<Itinerary>) -> Vec<MonthGroup> {
    let mut buckets: BTreeMap<(i32, u32), Vec<Itinerary>> = BTreeMap::new();
    for itinerary in itineraries {
        let date = itinerary.outbound.date;
        buckets
            .entry((date.year(), date.month()))
            .or_default()
            .push(itinerary);
    }

    buckets
        .into_iter()
        .map(|((year, month), itineraries)| MonthGroup {
            year,
            month,
            label: itineraries[0].outbound.date.format("%B %Y").to_string(),
            itineraries,
        })
        .collect()
}
