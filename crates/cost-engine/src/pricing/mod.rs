//! Usage-based pricing for add-on services
//!
//! This module provides:
//! - Tiered billing of a metered quantity above a free quota
//! - A registry of usage pricing records keyed by add-on provider
//! - Resolution of an add-on's monthly price from usage estimates

mod addon;
mod registry;
mod tier;

pub use addon::resolve_addon;
pub use registry::UsagePricingRegistry;
pub use tier::metric_cost;

use serde::{Deserialize, Serialize};

/// A contiguous price band for billable usage
///
/// `max_threshold = None` marks the open-ended band, which must come last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub min_threshold: f64,
    pub max_threshold: Option<f64>,
    pub price_per_unit: f64,
}

impl PricingTier {
    pub fn bounded(min_threshold: f64, max_threshold: f64, price_per_unit: f64) -> Self {
        Self {
            min_threshold,
            max_threshold: Some(max_threshold),
            price_per_unit,
        }
    }

    pub fn open(min_threshold: f64, price_per_unit: f64) -> Self {
        Self {
            min_threshold,
            max_threshold: None,
            price_per_unit,
        }
    }

    /// Quantity this band can absorb, `None` when unbounded
    pub fn width(&self) -> Option<f64> {
        self.max_threshold.map(|max| max - self.min_threshold)
    }
}

/// A metered dimension of an add-on (storage, bandwidth, users, I/O)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetric {
    /// Metric identifier, e.g. "storage_gb"
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub unit: String,
    /// Quantity included before any tier applies
    #[serde(default)]
    pub free_quota: f64,
    /// Tiers ordered ascending by `min_threshold`
    #[serde(default)]
    pub tiers: Vec<PricingTier>,
    /// Estimate used when the add-on has none for this metric
    #[serde(default)]
    pub default_value: f64,
    #[serde(default)]
    pub min_value: f64,
    #[serde(default)]
    pub max_value: f64,
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_step() -> f64 {
    1.0
}

/// Usage pricing record of one add-on provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageBasedPricing {
    pub provider_id: String,
    pub metrics: Vec<UsageMetric>,
    #[serde(default)]
    pub pricing_description: String,
}

/// Read-only access to usage pricing records
pub trait UsagePricingLookup {
    /// Usage pricing for a provider, `None` for flat-priced providers
    fn usage_pricing(&self, provider_id: &str) -> Option<&UsageBasedPricing>;

    /// Whether a provider bills on metered usage
    fn is_usage_based(&self, provider_id: &str) -> bool {
        self.usage_pricing(provider_id).is_some()
    }
}
