//! Cost engine for deployment topologies
//!
//! This crate provides the core functionality for:
//! - Tiered usage billing of add-on services
//! - Resolving weekly scaling schedules against a flavor catalog
//! - Monthly cost aggregation for runtimes, projects and organizations
//! - Upgrading stored runtime documents and checking configurations
//!
//! Computation is pure and never fails: missing references price at zero or
//! fall back to the baseline. Errors only arise when parsing documents.

pub mod calculator;
pub mod catalog;
pub mod error;
pub mod migration;
pub mod models;
pub mod money;
pub mod observability;
pub mod pricing;
pub mod scaling;
pub mod validation;

pub use calculator::{organization_cost, project_cost, runtime_cost};
pub use catalog::{Flavor, FlavorCatalog, FlavorLookup, InstanceCatalog, InstanceType};
pub use error::EngineError;
pub use models::*;
pub use observability::EstimateLogger;
pub use pricing::{resolve_addon, UsagePricingLookup, UsagePricingRegistry};
