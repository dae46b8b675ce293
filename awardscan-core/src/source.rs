use async_trait::async_trait;
use serde_json::Value;

/// Boundary to the external fetch layer. Implementations own HTTP calls,
/// retries and pacing; the engine only ever sees fully materialized raw rows.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Raw rows for the designated departure direction.
    async fn outbound_records(
        &self,
    ) -> Result<Vec<Value>, Box<dyn std::error::Error + Send + Sync>>;

    /// Raw rows for the designated arrival direction.
    async fn return_records(
        &self,
    ) -> Result<Vec<Value>, Box<dyn std::error::Error + Send + Sync>>;
}
