use awardscan_core::model::TierBasis;
use awardscan_store::app_config::Config;

/// Miles thresholds for cost-tier classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierThresholds {
    /// At or below this is a "sweet" fare.
    pub sweet_spot: u64,
    /// Strictly below this is still "good"; everything else is standard.
    pub upper: u64,
    pub basis: TierBasis,
}

/// Immutable scan configuration, validated once at startup and passed by
/// reference into each component.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPolicy {
    pub min_return_days: i64,
    pub max_return_days: i64,
    pub flex_days: i64,
    pub require_cabin_match: bool,
    pub hub_routing: bool,
    pub carrier_filter: Option<String>,
    pub tiers: TierThresholds,
    pub dedup_ttl_days: i64,
}

impl ScanPolicy {
    /// Build and validate a policy from loaded configuration. Invariant
    /// violations refuse to run rather than silently producing an empty or
    /// nonsensical scan.
    pub fn from_config(config: &Config) -> Result<Self, PolicyError> {
        Self {
            min_return_days: config.scan.min_return_days,
            max_return_days: config.scan.max_return_days,
            flex_days: config.scan.flex_days,
            require_cabin_match: config.scan.require_cabin_match,
            hub_routing: config.scan.hub_routing,
            carrier_filter: config.scan.carrier_filter.clone(),
            tiers: TierThresholds {
                sweet_spot: config.tiers.sweet_spot_threshold,
                upper: config.tiers.upper_threshold,
                basis: config.tiers.basis,
            },
            dedup_ttl_days: config.dedup.ttl_days,
        }
        .validated()
    }

    pub fn validated(self) -> Result<Self, PolicyError> {
        if self.min_return_days < 1 {
            return Err(PolicyError::MinStayTooSmall {
                min: self.min_return_days,
            });
        }
        if self.max_return_days < self.min_return_days {
            return Err(PolicyError::WindowInverted {
                min: self.min_return_days,
                max: self.max_return_days,
            });
        }
        if self.flex_days < 0 {
            return Err(PolicyError::NegativeFlex {
                flex: self.flex_days,
            });
        }
        // A flex probe must never reach a zero or negative stay length.
        if self.flex_days >= self.min_return_days {
            return Err(PolicyError::FlexSwallowsWindow {
                flex: self.flex_days,
                min: self.min_return_days,
            });
        }
        if self.tiers.sweet_spot == 0 {
            return Err(PolicyError::ZeroSweetSpot);
        }
        if self.tiers.upper < self.tiers.sweet_spot {
            return Err(PolicyError::TiersInverted {
                sweet: self.tiers.sweet_spot,
                upper: self.tiers.upper,
            });
        }
        Ok(self)
    }
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            min_return_days: 28,
            max_return_days: 35,
            flex_days: 3,
            require_cabin_match: true,
            hub_routing: false,
            carrier_filter: None,
            tiers: TierThresholds {
                sweet_spot: 90_000,
                upper: 100_000,
                basis: TierBasis::PerLeg,
            },
            dedup_ttl_days: 7,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("min_return_days must be at least 1, got {min}")]
    MinStayTooSmall { min: i64 },

    #[error("max_return_days ({max}) must not be smaller than min_return_days ({min})")]
    WindowInverted { min: i64, max: i64 },

    #[error("flex_days must not be negative, got {flex}")]
    NegativeFlex { flex: i64 },

    #[error("flex_days ({flex}) must be smaller than min_return_days ({min})")]
    FlexSwallowsWindow { flex: i64, min: i64 },

    #[error("sweet_spot_threshold must be positive")]
    ZeroSweetSpot,

    #[error("upper_threshold ({upper}) must not be smaller than sweet_spot_threshold ({sweet})")]
    TiersInverted { sweet: u64, upper: u64 },
}
