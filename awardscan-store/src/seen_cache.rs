use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fingerprint → last-seen-date map used to suppress itineraries already
/// reported within the TTL window. Persisted as a flat JSON string→string
/// map; read once at the start of a run, written once at the end.
#[derive(Debug, Clone)]
pub struct SeenCache {
    entries: BTreeMap<String, NaiveDate>,
    ttl_days: i64,
}

impl SeenCache {
    pub fn empty(ttl_days: i64) -> Self {
        Self {
            entries: BTreeMap::new(),
            ttl_days,
        }
    }

    /// A TTL of zero or less disables deduplication: everything is new and
    /// nothing is persisted.
    pub fn enabled(&self) -> bool {
        self.ttl_days > 0
    }

    /// Read the cache file. Absence of prior state is an empty cache; a
    /// corrupt or unreadable file degrades to an empty cache with a warning.
    /// Never fatal.
    pub fn load(path: &Path, ttl_days: i64) -> Self {
        let mut cache = Self::empty(ttl_days);
        if !cache.enabled() {
            return cache;
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no prior seen-cache, starting empty");
                return cache;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable seen-cache, starting empty");
                return cache;
            }
        };

        let raw: BTreeMap<String, String> = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "corrupt seen-cache, starting empty");
                return cache;
            }
        };

        for (fingerprint, raw_date) in raw {
            match NaiveDate::parse_from_str(&raw_date, DATE_FORMAT) {
                Ok(date) => {
                    cache.entries.insert(fingerprint, date);
                }
                Err(_) => {
                    tracing::warn!(%fingerprint, %raw_date, "dropping seen-cache entry with bad date");
                }
            }
        }
        cache
    }

    /// True iff the fingerprint has not been observed within the TTL window.
    pub fn is_new(&self, fingerprint: &str) -> bool {
        !self.enabled() || !self.entries.contains_key(fingerprint)
    }

    /// Record that a fingerprint was observed today. Callers mark every
    /// itinerary considered in the run, reported or not.
    pub fn mark_seen(&mut self, fingerprint: String, today: NaiveDate) {
        if self.enabled() {
            self.entries.insert(fingerprint, today);
        }
    }

    /// Drop entries last seen strictly more than `ttl_days` before today.
    /// Entries exactly at the boundary are retained.
    pub fn prune(&mut self, today: NaiveDate) {
        if !self.enabled() {
            return;
        }
        let ttl_days = self.ttl_days;
        self.entries
            .retain(|_, last_seen| (today - *last_seen).num_days() <= ttl_days);
    }

    /// Rewrite the cache file atomically (temp file + rename) so an aborted
    /// run never leaves a partial cache behind. Callers treat a failed write
    /// as best-effort: logged, not fatal.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        if !self.enabled() {
            return Ok(());
        }

        let raw: BTreeMap<&String, String> = self
            .entries
            .iter()
            .map(|(fingerprint, date)| (fingerprint, date.format(DATE_FORMAT).to_string()))
            .collect();
        let text = serde_json::to_string_pretty(&raw)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to serialize seen-cache: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write seen-cache file: {0}")]
    Io(#[from] std::io::Error),
}
