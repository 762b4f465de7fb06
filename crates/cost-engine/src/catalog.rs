//! Flavor catalog snapshots
//!
//! The catalog is fetched by an external collaborator and handed to the
//! engine as an immutable snapshot. It may be partial or stale: a flavor
//! name that cannot be resolved prices at zero instead of failing the
//! estimate.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Catalog used for instance types missing from a snapshot
static EMPTY_CATALOG: FlavorCatalog = FlavorCatalog { flavors: Vec::new() };

/// A sizing option for a runtime instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flavor {
    pub name: String,
    /// Price of one instance for one hour
    #[serde(alias = "price")]
    pub hourly_price: f64,
    /// Memory in MiB
    #[serde(default, alias = "mem")]
    pub memory: u64,
    #[serde(default)]
    pub cpus: u32,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Flavor {
    pub fn new(name: impl Into<String>, hourly_price: f64) -> Self {
        Self {
            name: name.into(),
            hourly_price,
            memory: 0,
            cpus: 0,
            available: true,
        }
    }
}

/// Read-only access to flavor prices
pub trait FlavorLookup {
    /// Find a flavor by name
    fn flavor(&self, name: &str) -> Option<&Flavor>;

    /// Hourly price of a flavor, or 0 when the flavor is unknown
    fn hourly_price(&self, name: &str) -> f64 {
        match self.flavor(name) {
            Some(flavor) => flavor.hourly_price,
            None => {
                debug!(flavor = %name, "Unknown flavor, pricing at zero");
                0.0
            }
        }
    }
}

/// Flavors offered for one instance type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlavorCatalog {
    flavors: Vec<Flavor>,
}

impl FlavorCatalog {
    pub fn new(flavors: Vec<Flavor>) -> Self {
        Self { flavors }
    }

    /// Shared empty catalog
    pub fn empty() -> &'static FlavorCatalog {
        &EMPTY_CATALOG
    }

    pub fn is_empty(&self) -> bool {
        self.flavors.is_empty()
    }
}

impl FlavorLookup for FlavorCatalog {
    fn flavor(&self, name: &str) -> Option<&Flavor> {
        self.flavors.iter().find(|f| f.name == name)
    }
}

impl FromIterator<Flavor> for FlavorCatalog {
    fn from_iter<I: IntoIterator<Item = Flavor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// An instance type (runtime kind) and its flavors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceType {
    /// Runtime kind, e.g. "node" or "python"
    #[serde(rename = "type")]
    pub instance_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flavors: FlavorCatalog,
}

/// Snapshot of every instance type and its flavors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceCatalog {
    #[serde(default)]
    pub instances: Vec<InstanceType>,
}

impl InstanceCatalog {
    pub fn new(instances: Vec<InstanceType>) -> Self {
        Self { instances }
    }

    /// Parse a catalog snapshot, accepting either `{ "instances": [...] }`
    /// or a bare array of instance types
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            let instances = serde_json::from_value(value)?;
            return Ok(Self { instances });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Flavor catalog for a runtime kind; unknown kinds get an empty catalog
    pub fn flavors_for(&self, instance_type: &str) -> &FlavorCatalog {
        match self.instances.iter().find(|i| i.instance_type == instance_type) {
            Some(instance) => &instance.flavors,
            None => {
                debug!(instance_type = %instance_type, "Instance type missing from catalog");
                FlavorCatalog::empty()
            }
        }
    }
}
