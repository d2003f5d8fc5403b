//! Meridian Chart - component registry and polar coordinate models
//!
//! This crate provides:
//! - A shared [`TypeCatalog`] of component types and a per-pass [`ComponentRegistry`]
//! - Deep merging of layered option documents
//! - An axis model factory with a composed [`AxisCapability`]
//! - Host resolution from dependents (axes) to hosts (coordinate systems)
//! - The polar coordinate system with its angle and radius axes
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use meridian_chart::*;
//! use serde_json::json;
//!
//! let mut catalog = TypeCatalog::new();
//! register_polar_components(&mut catalog).unwrap();
//!
//! let mut chart = ChartContext::new(Arc::new(catalog));
//! let registry = chart
//!     .set_option(&json!({
//!         "polar": [{}, { "id": "p2" }],
//!         "angleAxis": { "polarId": "p2" }
//!     }))
//!     .unwrap();
//!
//! let axis = &registry.instances(ANGLE_AXIS)[0];
//! let host = axis.get_host(registry, POLAR).unwrap();
//! assert_eq!(host.id(), Some("p2"));
//! ```

pub mod component;
pub mod config;
mod context;
pub mod coord;
pub mod error;
pub mod model;
pub mod option;

pub use component::*;
pub use config::{ChartConfig, DuplicateIdPolicy};
pub use context::ChartContext;
pub use coord::*;
pub use error::*;
pub use model::*;
pub use option::{Length, OptionMap, merge, merge_into};
