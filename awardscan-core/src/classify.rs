use crate::model::{AvailabilityRecord, Leg};

/// Extract the eligible premium-cabin legs from a normalized record.
///
/// A cabin is eligible iff its mileage cost is positive; availability flags
/// alone are not trusted. Mixed-cabin records and records from a carrier
/// other than the configured one yield nothing. Pure: rejections are
/// expected filtering outcomes, never errors.
pub fn classify_record(record: &AvailabilityRecord, carrier_filter: Option<&str>) -> Vec<Leg> {
    if record.mixed_cabin {
        return Vec::new();
    }

    if let Some(wanted) = carrier_filter {
        match record.carrier.as_deref() {
            Some(carrier) if carrier.eq_ignore_ascii_case(wanted) => {}
            _ => return Vec::new(),
        }
    }

    let mut legs = Vec::new();
    for (&cabin, quote) in &record.cabins {
        let miles = match quote.mileage_cost {
            Some(m) if m > 0 => m as u64,
            _ => continue,
        };

        legs.push(Leg {
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            date: record.date,
            cabin,
            miles,
            taxes: quote.taxes.filter(|t| t.is_finite() && *t >= 0.0).unwrap_or(0.0),
            currency: record.currency.clone(),
            remaining_seats: quote.remaining_seats,
            airlines: quote.airlines.clone(),
        });
    }
    legs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cabin, CabinQuote};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn quote(mileage_cost: Option<i64>) -> CabinQuote {
        CabinQuote {
            available: true,
            mileage_cost,
            taxes: Some(500.0),
            remaining_seats: 2,
            airlines: "QR".to_string(),
        }
    }

    fn record(cabins: BTreeMap<Cabin, CabinQuote>) -> AvailabilityRecord {
        AvailabilityRecord {
            origin: "AKL".to_string(),
            destination: "DOH".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
            currency: "NZD".to_string(),
            mixed_cabin: false,
            carrier: Some("qatarairways".to_string()),
            cabins,
        }
    }

    #[test]
    fn test_yields_one_leg_per_eligible_cabin() {
        let mut cabins = BTreeMap::new();
        cabins.insert(Cabin::Business, quote(Some(70_000)));
        cabins.insert(Cabin::First, quote(Some(110_000)));

        let legs = classify_record(&record(cabins), None);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].cabin, Cabin::Business);
        assert_eq!(legs[0].miles, 70_000);
        assert_eq!(legs[1].cabin, Cabin::First);
    }

    #[test]
    fn test_zero_mileage_cost_is_ineligible_despite_available_flag() {
        let mut cabins = BTreeMap::new();
        cabins.insert(Cabin::Business, quote(Some(0)));

        assert!(classify_record(&record(cabins), None).is_empty());
    }

    #[test]
    fn test_mixed_cabin_yields_no_legs_regardless_of_costs() {
        let mut cabins = BTreeMap::new();
        cabins.insert(Cabin::Business, quote(Some(70_000)));
        cabins.insert(Cabin::First, quote(Some(110_000)));
        let mut rec = record(cabins);
        rec.mixed_cabin = true;

        assert!(classify_record(&rec, None).is_empty());
    }

    #[test]
    fn test_carrier_filter() {
        let mut cabins = BTreeMap::new();
        cabins.insert(Cabin::Business, quote(Some(70_000)));
        let rec = record(cabins);

        assert_eq!(classify_record(&rec, Some("qatarairways")).len(), 1);
        assert!(classify_record(&rec, Some("aeroplan")).is_empty());

        // A record with no carrier cannot satisfy a configured filter.
        let mut anonymous = rec.clone();
        anonymous.carrier = None;
        assert!(classify_record(&anonymous, Some("qatarairways")).is_empty());
    }

    #[test]
    fn test_missing_taxes_default_to_zero() {
        let mut cabins = BTreeMap::new();
        let mut q = quote(Some(70_000));
        q.taxes = None;
        cabins.insert(Cabin::Business, q);

        let legs = classify_record(&record(cabins), None);
        assert_eq!(legs[0].taxes, 0.0);
    }
}
