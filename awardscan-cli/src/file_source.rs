use async_trait::async_trait;
use awardscan_core::source::AvailabilitySource;
use serde_json::Value;
use std::path::PathBuf;

type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Reads the raw-row dumps the external transport layer materializes.
/// Accepts either a bare JSON array of rows or the upstream envelope
/// (`{"response": {"data": [...]}}` or `{"data": [...]}`).
pub struct JsonFileSource {
    outbound_path: PathBuf,
    return_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(outbound_path: impl Into<PathBuf>, return_path: impl Into<PathBuf>) -> Self {
        Self {
            outbound_path: outbound_path.into(),
            return_path: return_path.into(),
        }
    }

    async fn read_rows(path: &PathBuf) -> Result<Vec<Value>, SourceError> {
        let bytes = tokio::fs::read(path).await?;
        let parsed: Value = serde_json::from_slice(&bytes)?;
        Ok(unwrap_rows(parsed))
    }
}

fn unwrap_rows(parsed: Value) -> Vec<Value> {
    match parsed {
        Value::Array(rows) => rows,
        Value::Object(mut envelope) => {
            let inner = envelope
                .remove("response")
                .and_then(|mut r| r.get_mut("data").map(Value::take))
                .or_else(|| envelope.remove("data"));
            match inner {
                Some(Value::Array(rows)) => rows,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

#[async_trait]
impl AvailabilitySource for JsonFileSource {
    async fn outbound_records(&self) -> Result<Vec<Value>, SourceError> {
        Self::read_rows(&self.outbound_path).await
    }

    async fn return_records(&self) -> Result<Vec<Value>, SourceError> {
        Self::read_rows(&self.return_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_bare_array() {
        let rows = unwrap_rows(json!([{ "Date": "2025-11-10" }]));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_unwraps_partner_api_envelope() {
        let rows = unwrap_rows(json!({
            "response": { "data": [{ "Date": "2025-11-10" }, { "Date": "2025-11-11" }] }
        }));
        assert_eq!(rows.len(), 2);

        let rows = unwrap_rows(json!({ "data": [{ "Date": "2025-11-10" }] }));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_unexpected_shapes_yield_no_rows() {
        assert!(unwrap_rows(json!("nope")).is_empty());
        assert!(unwrap_rows(json!({ "response": {} })).is_empty());
    }
}
