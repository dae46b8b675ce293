use crate::model::{AvailabilityRecord, Cabin, CabinQuote};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::collections::BTreeMap;

/// Why a raw row was rejected during normalization. Rejections are per-record
/// skips counted by the pipeline, never propagated as run failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("unparsable date: {0}")]
    BadDate(String),
}

/// An alias is an ordered list of key paths; the first present, non-null,
/// coercible value wins. The upstream source exposes the same logical field
/// under different keys depending on API variant and carrier, so this table
/// is the only place that knows about raw schemas.
type Aliases = &'static [&'static [&'static str]];

const ORIGIN: Aliases = &[&["Route", "OriginAirport"], &["OriginAirport"], &["origin"]];
const DESTINATION: Aliases = &[
    &["Route", "DestinationAirport"],
    &["DestinationAirport"],
    &["destination"],
    &["dest"],
];
const DATE: Aliases = &[&["Date"], &["ParsedDate"], &["date"]];
const CURRENCY: Aliases = &[&["TaxesCurrency"], &["Currency"], &["currency"]];
const MIXED_CABIN: Aliases = &[
    &["MixedCabin"],
    &["JMixedCabin"],
    &["FMixedCabin"],
    &["mixed_cabin"],
];
const CARRIER: Aliases = &[&["Source"], &["source"], &["Carrier"], &["carrier"]];

struct CabinAliases {
    cabin: Cabin,
    available: Aliases,
    miles: Aliases,
    taxes: Aliases,
    seats: Aliases,
    airlines: Aliases,
}

const CABIN_ALIASES: &[CabinAliases] = &[
    CabinAliases {
        cabin: Cabin::Business,
        available: &[&["JAvailable"]],
        miles: &[&["JDirectMileageCostRaw"], &["JMileageCostRaw"], &["JMileageCost"]],
        taxes: &[&["JDirectTotalTaxesRaw"], &["JTotalTaxesRaw"], &["JTotalTaxes"]],
        seats: &[&["JDirectRemainingSeatsRaw"], &["JRemainingSeatsRaw"], &["JRemainingSeats"]],
        airlines: &[&["JDirectAirlinesRaw"], &["JAirlinesRaw"], &["JAirlines"]],
    },
    CabinAliases {
        cabin: Cabin::First,
        available: &[&["FAvailable"]],
        miles: &[&["FDirectMileageCostRaw"], &["FMileageCostRaw"], &["FMileageCost"]],
        taxes: &[&["FDirectTotalTaxesRaw"], &["FTotalTaxesRaw"], &["FTotalTaxes"]],
        seats: &[&["FDirectRemainingSeatsRaw"], &["FRemainingSeatsRaw"], &["FRemainingSeats"]],
        airlines: &[&["FDirectAirlinesRaw"], &["FAirlinesRaw"], &["FAirlines"]],
    },
];

fn lookup<'a>(row: &'a Value, aliases: &[&[&str]]) -> Option<&'a Value> {
    for path in aliases {
        let mut current = row;
        let mut found = true;
        for key in *path {
            match current.get(key) {
                Some(next) => current = next,
                None => {
                    found = false;
                    break;
                }
            }
        }
        if found && !current.is_null() {
            return Some(current);
        }
    }
    None
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lookup_str(row: &Value, aliases: Aliases) -> Option<String> {
    for &path in aliases {
        if let Some(s) = lookup(row, &[path]).and_then(Value::as_str) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn lookup_f64(row: &Value, aliases: Aliases) -> Option<f64> {
    for &path in aliases {
        if let Some(n) = lookup(row, &[path]).and_then(coerce_f64) {
            return Some(n);
        }
    }
    None
}

fn lookup_bool(row: &Value, aliases: Aliases) -> Option<bool> {
    for &path in aliases {
        if let Some(b) = lookup(row, &[path]).and_then(Value::as_bool) {
            return Some(b);
        }
    }
    None
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp truncated to its date.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Convert one raw availability row into its canonical record. Pure and
/// idempotent: the same row always yields the same result.
pub fn normalize_record(row: &Value) -> Result<AvailabilityRecord, RejectReason> {
    let origin = lookup_str(row, ORIGIN).ok_or(RejectReason::MissingField("origin"))?;
    let destination =
        lookup_str(row, DESTINATION).ok_or(RejectReason::MissingField("destination"))?;

    let raw_date = lookup_str(row, DATE).ok_or(RejectReason::MissingField("date"))?;
    let date = parse_date(&raw_date).ok_or_else(|| {
        tracing::debug!(%origin, %destination, raw = %raw_date, "skipping row with unparsable date");
        RejectReason::BadDate(raw_date.clone())
    })?;

    let currency = lookup_str(row, CURRENCY).unwrap_or_default();
    let mixed_cabin = lookup_bool(row, MIXED_CABIN).unwrap_or(false);
    let carrier = lookup_str(row, CARRIER);

    let mut cabins = BTreeMap::new();
    for table in CABIN_ALIASES {
        let mileage_cost = lookup_f64(row, table.miles).map(|m| m as i64);
        let available = lookup_bool(row, table.available).unwrap_or(mileage_cost.is_some());
        if !available && mileage_cost.is_none() {
            continue;
        }
        cabins.insert(
            table.cabin,
            CabinQuote {
                available,
                mileage_cost,
                taxes: lookup_f64(row, table.taxes),
                remaining_seats: lookup_f64(row, table.seats).map(|s| s as i64).unwrap_or(0),
                airlines: lookup_str(row, table.airlines).unwrap_or_default(),
            },
        );
    }

    Ok(AvailabilityRecord {
        origin,
        destination,
        date,
        currency,
        mixed_cabin,
        carrier,
        cabins,
    })
}
