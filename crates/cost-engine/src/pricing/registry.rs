//! In-memory registry of usage pricing records

use super::{UsageBasedPricing, UsagePricingLookup};
use crate::error::EngineError;
use std::collections::HashMap;

/// Usage pricing records keyed by add-on provider id
#[derive(Debug, Clone, Default)]
pub struct UsagePricingRegistry {
    records: HashMap<String, UsageBasedPricing>,
}

impl UsagePricingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record, replacing any previous one for the same provider
    pub fn register(&mut self, pricing: UsageBasedPricing) {
        self.records.insert(pricing.provider_id.clone(), pricing);
    }

    /// Parse a JSON array of pricing records
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let records: Vec<UsageBasedPricing> = serde_json::from_str(json)?;
        Ok(records.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<UsageBasedPricing> for UsagePricingRegistry {
    fn from_iter<I: IntoIterator<Item = UsageBasedPricing>>(iter: I) -> Self {
        let mut registry = Self::new();
        for pricing in iter {
            registry.register(pricing);
        }
        registry
    }
}

impl UsagePricingLookup for UsagePricingRegistry {
    fn usage_pricing(&self, provider_id: &str) -> Option<&UsageBasedPricing> {
        self.records.get(provider_id)
    }
}
