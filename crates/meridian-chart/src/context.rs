//! Per-chart state and render passes.

use std::sync::Arc;

use meridian_core::profiling::{self, profile_function};
use serde_json::Value;

use crate::component::{ComponentInstance, ComponentRegistry, TypeCatalog};
use crate::config::ChartConfig;
use crate::error::{MergeError, OptionError};
use crate::model::HostResolver;
use crate::option::value_kind;

/// One chart: a shared type catalog plus the registry of the current pass.
///
/// ```
/// use std::sync::Arc;
/// use meridian_chart::{ChartContext, TypeCatalog, register_polar_components};
/// use serde_json::json;
///
/// let mut catalog = TypeCatalog::new();
/// register_polar_components(&mut catalog).unwrap();
///
/// let mut chart = ChartContext::new(Arc::new(catalog));
/// chart.set_option(&json!({ "polar": {}, "angleAxis": {} })).unwrap();
///
/// assert_eq!(chart.active_dependents("angleAxis").len(), 1);
/// ```
#[derive(Debug)]
pub struct ChartContext {
    catalog: Arc<TypeCatalog>,
    config: ChartConfig,
    registry: ComponentRegistry,
    passes: u64,
}

impl ChartContext {
    /// Create a chart with the default config.
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self::with_config(catalog, ChartConfig::default())
    }

    pub fn with_config(catalog: Arc<TypeCatalog>, config: ChartConfig) -> Self {
        Self {
            catalog,
            config,
            registry: ComponentRegistry::empty(),
            passes: 0,
        }
    }

    /// Run one pass: rebuild every instance from a chart option document.
    ///
    /// Keys are main-types; values are an option mapping or an array of
    /// them. Keys with no registered type are skipped. On error the previous
    /// registry stays in place.
    pub fn set_option(&mut self, document: &Value) -> Result<&ComponentRegistry, OptionError> {
        profile_function!();
        let Value::Object(entries) = document else {
            return Err(MergeError::NotAMapping {
                path: "option".into(),
                found: value_kind(document),
            }
            .into());
        };

        let pass = self.passes + 1;
        let mut builder = ComponentRegistry::builder(&self.catalog)
            .with_theme(&self.config.theme)
            .with_policy(self.config.duplicate_ids)
            .with_pass(pass);

        for (main_type, value) in entries {
            if !self.catalog.has_main_type(main_type) {
                tracing::trace!("Skipping unknown option key '{}'", main_type);
                continue;
            }
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        builder.add(main_type, item)?;
                    }
                }
                other => {
                    builder.add(main_type, other)?;
                }
            }
        }

        self.registry = builder.build();
        self.passes = pass;
        profiling::new_frame();
        Ok(&self.registry)
    }

    /// Every `dependent_main` instance paired with its host.
    ///
    /// Dependents without a host this pass are skipped.
    pub fn active_dependents(&self, dependent_main: &str) -> Vec<(&ComponentInstance, &ComponentInstance)> {
        self.registry
            .instances(dependent_main)
            .iter()
            .filter_map(|dependent| {
                let host_main = dependent.descriptor().host_main_type()?;
                match dependent.get_host(&self.registry, host_main) {
                    Ok(host) => Some((dependent, host)),
                    Err(missing) => {
                        tracing::debug!("Skipping {}: {}", dependent.key(), missing);
                        None
                    }
                }
            })
            .collect()
    }

    /// Drop every instance. The next pass starts from an empty registry.
    pub fn teardown(&mut self) {
        self.registry = ComponentRegistry::empty();
        tracing::debug!("Chart torn down after {} passes", self.passes);
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Number of completed passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
