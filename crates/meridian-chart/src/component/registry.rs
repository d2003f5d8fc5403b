//! Per-pass instance catalog.
//!
//! A [`ComponentRegistry`] is assembled by a [`RegistryBuilder`] from user
//! options, then frozen for the rest of the render pass. Every pass builds a
//! fresh registry; nothing carries over except the shared [`TypeCatalog`].

use std::sync::Arc;

use meridian_core::alloc::{IndexMap, index_map};
use meridian_core::profiling::profile_function;
use serde_json::Value;

use super::catalog::TypeCatalog;
use super::instance::{ComponentInstance, ComponentKey};
use super::selector::Selector;
use super::types::ComponentTypeDescriptor;
use crate::config::DuplicateIdPolicy;
use crate::error::OptionError;
use crate::model::HostResolver;
use crate::option::{OptionMap, as_option_map, merge_into};

/// Configuration problems found while freezing a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryDiagnostic {
    /// Several instances of one main-type share an identifier.
    DuplicateId {
        main_type: String,
        id: String,
        /// Ordinal positions of the sharing instances, ascending.
        indices: Vec<usize>,
    },
}

/// Frozen instances of one render pass, grouped by main-type.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    pass: u64,
    policy: DuplicateIdPolicy,
    components: IndexMap<Arc<str>, Vec<ComponentInstance>>,
    diagnostics: Vec<RegistryDiagnostic>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl ComponentRegistry {
    /// A registry with no instances (pass 0).
    pub fn empty() -> Self {
        Self {
            pass: 0,
            policy: DuplicateIdPolicy::default(),
            components: index_map(),
            diagnostics: Vec::new(),
        }
    }

    /// Start building a registry against `catalog`.
    pub fn builder(catalog: &TypeCatalog) -> RegistryBuilder<'_> {
        RegistryBuilder::new(catalog)
    }

    /// The render pass this registry was built for.
    pub fn pass(&self) -> u64 {
        self.pass
    }

    /// How duplicate identifiers are resolved.
    pub fn policy(&self) -> DuplicateIdPolicy {
        self.policy
    }

    /// All instances of `main_type`, in creation order.
    pub fn instances(&self, main_type: &str) -> &[ComponentInstance] {
        self.components.get(main_type).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of instances of `main_type`.
    pub fn count(&self, main_type: &str) -> usize {
        self.instances(main_type).len()
    }

    /// Total number of instances.
    pub fn len(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    /// Whether the registry holds no instances.
    pub fn is_empty(&self) -> bool {
        self.components.values().all(Vec::is_empty)
    }

    /// Main-types with at least one instance, in first-creation order.
    pub fn main_types(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|k| &**k)
    }

    /// Iterate over every instance, grouped by main-type.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.components.values().flatten()
    }

    /// Look up an instance by key. Keys from another pass resolve to `None`.
    pub fn get(&self, key: &ComponentKey) -> Option<&ComponentInstance> {
        if key.pass() != self.pass {
            return None;
        }
        self.components.get(key.main_type())?.get(key.index())
    }

    /// Configuration problems recorded when the registry was frozen.
    pub fn diagnostics(&self) -> &[RegistryDiagnostic] {
        &self.diagnostics
    }

    /// Query instances of `main_type`.
    ///
    /// With an `id`, returns every instance carrying it (creation order).
    /// Otherwise with an `index`, returns the instance at that position, or
    /// nothing if it is negative or out of range. Otherwise with a `name`,
    /// returns every instance carrying it. Otherwise returns all instances.
    /// A `sub_type` filter then narrows the result.
    pub fn query_instances(&self, main_type: &str, selector: &Selector) -> Vec<&ComponentInstance> {
        profile_function!();
        let all = self.instances(main_type);

        let mut result: Vec<&ComponentInstance> = if let Some(id) = selector.id.as_deref() {
            all.iter().filter(|c| c.id() == Some(id)).collect()
        } else if let Some(index) = selector.index {
            usize::try_from(index).ok().and_then(|i| all.get(i)).into_iter().collect()
        } else if let Some(name) = selector.name.as_deref() {
            all.iter().filter(|c| c.name() == Some(name)).collect()
        } else {
            all.iter().collect()
        };

        if let Some(sub_type) = selector.sub_type.as_deref() {
            result.retain(|c| c.sub_type() == Some(sub_type));
        }

        result
    }

    /// Every `dependent_main` instance whose host resolves to `host`.
    pub fn dependents_of(&self, host: &ComponentInstance, dependent_main: &str) -> Vec<&ComponentInstance> {
        self.instances(dependent_main)
            .iter()
            .filter(|dependent| {
                dependent
                    .get_host(self, host.main_type())
                    .is_ok_and(|found| found.key() == host.key())
            })
            .collect()
    }
}

/// Collects instances for one pass, then freezes them into a [`ComponentRegistry`].
pub struct RegistryBuilder<'c> {
    catalog: &'c TypeCatalog,
    theme: Option<&'c OptionMap>,
    policy: DuplicateIdPolicy,
    pass: u64,
    components: IndexMap<Arc<str>, Vec<ComponentInstance>>,
}

impl<'c> RegistryBuilder<'c> {
    /// Create a builder for pass 1 with no theme.
    pub fn new(catalog: &'c TypeCatalog) -> Self {
        Self {
            catalog,
            theme: None,
            policy: DuplicateIdPolicy::default(),
            pass: 1,
            components: index_map(),
        }
    }

    /// Layer theme sections between type defaults and user options.
    pub fn with_theme(mut self, theme: &'c OptionMap) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Set the duplicate identifier policy of the built registry.
    pub fn with_policy(mut self, policy: DuplicateIdPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the pass number stamped on every key.
    pub fn with_pass(mut self, pass: u64) -> Self {
        self.pass = pass;
        self
    }

    /// Create an instance of `main_type` from raw user options.
    ///
    /// The instance is appended after existing instances of its main-type.
    pub fn add(&mut self, main_type: &str, raw: &Value) -> Result<ComponentKey, OptionError> {
        profile_function!();
        let catalog = self.catalog;
        let user = as_option_map(raw, main_type)?;
        let descriptor = catalog.resolve(main_type, user)?;

        let mut effective = descriptor.defaults().clone();
        if let Some(layer) = self.theme_layer(descriptor)? {
            merge_into(&mut effective, layer)?;
        }
        merge_into(&mut effective, user)?;
        // The sub-type was chosen from user options; theme sections cannot move it.
        if let (Some(sub_type), Some(slot)) = (descriptor.sub_type(), effective.get_mut("type"))
            && slot.as_str() != Some(sub_type)
        {
            tracing::debug!("Ignoring type {} for {}, keeping '{}'", slot, main_type, sub_type);
            *slot = Value::from(sub_type);
        }
        let model = descriptor.construct(&effective)?;

        let main: Arc<str> = Arc::from(main_type);
        let list = self.components.entry(Arc::clone(&main)).or_default();
        let key = ComponentKey::new(self.pass, main, list.len());
        list.push(ComponentInstance::new(key.clone(), Arc::clone(descriptor), effective, model));

        tracing::trace!("Created component {}", key);
        Ok(key)
    }

    fn theme_layer(&self, descriptor: &ComponentTypeDescriptor) -> Result<Option<&'c OptionMap>, OptionError> {
        let (Some(theme), Some(theme_key)) = (self.theme, descriptor.theme_key()) else {
            return Ok(None);
        };
        match theme.get(theme_key) {
            None | Some(Value::Null) => Ok(None),
            Some(section) => Ok(Some(as_option_map(section, &format!("theme.{theme_key}"))?)),
        }
    }

    /// Number of instances added so far.
    pub fn len(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    /// Whether nothing was added yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the collected instances.
    pub fn build(self) -> ComponentRegistry {
        profile_function!();
        let mut diagnostics = Vec::new();

        for (main_type, instances) in &self.components {
            let mut by_id: IndexMap<&str, Vec<usize>> = index_map();
            for instance in instances {
                if let Some(id) = instance.id() {
                    by_id.entry(id).or_default().push(instance.index());
                }
            }

            for (id, indices) in by_id {
                if indices.len() > 1 {
                    tracing::warn!(
                        "{} '{}' components share id '{}' (positions {:?})",
                        indices.len(),
                        main_type,
                        id,
                        indices
                    );
                    diagnostics.push(RegistryDiagnostic::DuplicateId {
                        main_type: main_type.to_string(),
                        id: id.to_string(),
                        indices,
                    });
                }
            }
        }

        let registry = ComponentRegistry {
            pass: self.pass,
            policy: self.policy,
            components: self.components,
            diagnostics,
        };
        tracing::debug!(
            "Built component registry for pass {} with {} instances",
            registry.pass,
            registry.len()
        );
        registry
    }
}
