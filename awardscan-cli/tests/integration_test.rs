use awardscan_engine::{ScanPolicy, Scanner};
use awardscan_store::seen_cache::SeenCache;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::path::PathBuf;

fn row(origin: &str, dest: &str, date: &str, business_miles: u64, taxes: f64) -> Value {
    json!({
        "Route": { "OriginAirport": origin, "DestinationAirport": dest },
        "Date": date,
        "TaxesCurrency": "NZD",
        "JAvailable": true,
        "JMileageCostRaw": business_miles,
        "JTotalTaxesRaw": taxes,
        "JRemainingSeatsRaw": 2,
        "JAirlinesRaw": "QR"
    })
}

fn today() -> NaiveDate {
    "2025-10-01".parse().unwrap()
}

fn cache_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("awardscan-it-{}-{}.json", name, uuid::Uuid::new_v4()))
}

#[test]
fn test_full_scan_with_persisted_cache_across_runs() {
    let path = cache_path("full-scan");
    let scanner = Scanner::new(ScanPolicy::default());

    let outbound = vec![
        row("AKL", "DOH", "2025-11-10", 70_000, 500.0),
        row("AKL", "DOH", "2025-12-03", 95_000, 480.0),
        // Unpairable: no return lands within its window.
        row("AKL", "DOH", "2026-03-01", 65_000, 450.0),
        // Malformed: dropped by the normalizer, not fatal.
        json!({ "Date": "whenever", "OriginAirport": "AKL", "DestinationAirport": "DOH" }),
    ];
    let returns = vec![
        row("DOH", "AKL", "2025-12-10", 75_000, 600.0),
        row("DOH", "AKL", "2026-01-02", 75_000, 620.0),
    ];

    // First run: both pairable outbounds report, ranked by total miles.
    let mut cache = SeenCache::load(&path, 7);
    let report = scanner.run(&outbound, &returns, &mut cache, today());
    assert_eq!(report.stats.rejected_rows, 1);
    assert_eq!(report.stats.pairs, 2);
    assert_eq!(report.stats.reported, 2);
    assert_eq!(report.best.as_ref().unwrap().total_miles(), 145_000);
    assert_eq!(report.groups.len(), 2);
    assert_eq!(report.groups[0].label, "November 2025");
    assert_eq!(report.groups[1].label, "December 2025");
    cache.save(&path).unwrap();

    // Second run the next day, cache reloaded from disk: all suppressed.
    let mut cache = SeenCache::load(&path, 7);
    assert_eq!(cache.len(), 2);
    let next_day = today() + chrono::Duration::days(1);
    let report = scanner.run(&outbound, &returns, &mut cache, next_day);
    assert_eq!(report.stats.suppressed, 2);
    assert_eq!(report.stats.reported, 0);
    assert!(report.best.is_none());
    cache.save(&path).unwrap();

    // A run past the TTL reports everything again.
    let mut cache = SeenCache::load(&path, 7);
    let much_later = today() + chrono::Duration::days(20);
    let report = scanner.run(&outbound, &returns, &mut cache, much_later);
    assert_eq!(report.stats.reported, 2);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_disabled_dedup_reports_every_run() {
    let scanner = Scanner::new(ScanPolicy {
        dedup_ttl_days: 0,
        ..ScanPolicy::default()
    });
    let mut cache = SeenCache::empty(0);

    let outbound = vec![row("AKL", "DOH", "2025-11-10", 70_000, 500.0)];
    let returns = vec![row("DOH", "AKL", "2025-12-10", 75_000, 600.0)];

    for _ in 0..3 {
        let report = scanner.run(&outbound, &returns, &mut cache, today());
        assert_eq!(report.stats.reported, 1);
        assert_eq!(report.stats.suppressed, 0);
    }
}

#[test]
fn test_report_serializes_for_the_renderer() {
    let scanner = Scanner::new(ScanPolicy::default());
    let mut cache = SeenCache::empty(7);

    let outbound = vec![row("AKL", "DOH", "2025-11-10", 70_000, 500.0)];
    let returns = vec![row("DOH", "AKL", "2025-12-10", 75_000, 600.0)];
    let report = scanner.run(&outbound, &returns, &mut cache, today());

    let rendered: Value = serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();
    assert_eq!(rendered["stats"]["reported"], 1);
    assert_eq!(rendered["groups"][0]["label"], "November 2025");
    assert_eq!(rendered["best"]["tier"], "sweet");
    assert_eq!(rendered["best"]["outbound"]["cabin"], "Business");
}
