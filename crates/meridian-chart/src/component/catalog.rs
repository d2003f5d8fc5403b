//! Catalog of registered component types.
//!
//! A [`TypeCatalog`] is filled once at bootstrap and then shared (usually
//! behind an `Arc`) by every chart in the process. It holds no instances.

use std::sync::Arc;

use meridian_core::alloc::{HashMap, IndexMap, index_map};

use super::types::{ComponentTypeDescriptor, ShapeTag};
use crate::error::{OptionError, RegistrationError};
use crate::option::OptionMap;

/// Picks the sub-type of a new instance from its raw user options.
pub type SubTypeDefaulter = fn(&OptionMap) -> Option<String>;

/// Registered component types, keyed by full type name.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    descriptors: IndexMap<String, Arc<ComponentTypeDescriptor>>,
    sub_type_defaulters: HashMap<String, SubTypeDefaulter>,
    kinds: HashMap<String, ShapeTag>,
}

static_assertions::assert_impl_all!(TypeCatalog: Send, Sync);

impl TypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            descriptors: index_map(),
            sub_type_defaulters: HashMap::new(),
            kinds: HashMap::new(),
        }
    }

    /// Register a type, replacing any type with the same full name.
    pub fn register_type(&mut self, descriptor: ComponentTypeDescriptor) -> Arc<ComponentTypeDescriptor> {
        let name = descriptor.component_type().full_name();
        let descriptor = Arc::new(descriptor);

        if self.descriptors.insert(name.clone(), Arc::clone(&descriptor)).is_some() {
            tracing::debug!("Replaced component type: {}", name);
        } else {
            tracing::debug!("Registered component type: {}", name);
        }

        descriptor
    }

    /// Register the function choosing sub-types for `main_type`.
    pub fn register_sub_type_defaulter(&mut self, main_type: impl Into<String>, defaulter: SubTypeDefaulter) {
        self.sub_type_defaulters.insert(main_type.into(), defaulter);
    }

    /// Record that `kind` is backed by `shape`.
    ///
    /// Claiming a kind again with the same shape is allowed; a different
    /// shape is a conflict.
    pub(crate) fn claim_kind(&mut self, kind: &str, shape: ShapeTag) -> Result<(), RegistrationError> {
        match self.kinds.get(kind) {
            Some(existing) if *existing != shape => Err(RegistrationError::ShapeConflict {
                kind: kind.to_string(),
                existing: existing.name(),
                requested: shape.name(),
            }),
            _ => {
                self.kinds.insert(kind.to_string(), shape);
                Ok(())
            }
        }
    }

    /// Look up a type by full name.
    pub fn get(&self, full_name: &str) -> Option<&Arc<ComponentTypeDescriptor>> {
        self.descriptors.get(full_name)
    }

    /// Check whether any type with this main-type is registered.
    pub fn has_main_type(&self, main_type: &str) -> bool {
        self.descriptors.values().any(|d| d.main_type() == main_type)
    }

    /// Registered main-types, in first-registration order.
    pub fn main_types(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for descriptor in self.descriptors.values() {
            if !seen.contains(&descriptor.main_type()) {
                seen.push(descriptor.main_type());
            }
        }
        seen
    }

    /// Iterate over all registered types.
    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<ComponentTypeDescriptor>> {
        self.descriptors.values()
    }

    /// Choose the type for a new `main_type` instance with raw options `raw`.
    ///
    /// A registered sub-type defaulter decides the sub-type. Without one, the
    /// plain main-type wins, then the first type registered under it.
    pub fn resolve(&self, main_type: &str, raw: &OptionMap) -> Result<&Arc<ComponentTypeDescriptor>, OptionError> {
        let sub_type = self.sub_type_defaulters.get(main_type).and_then(|defaulter| defaulter(raw));

        match sub_type {
            Some(sub) => {
                let full_name = format!("{main_type}.{sub}");
                self.descriptors
                    .get(&full_name)
                    .ok_or(OptionError::UnknownComponent(full_name))
            }
            None => self
                .descriptors
                .get(main_type)
                .or_else(|| self.descriptors.values().find(|d| d.main_type() == main_type))
                .ok_or_else(|| OptionError::UnknownComponent(main_type.to_string())),
        }
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no type is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Remove every registered type, defaulter and kind.
    pub fn clear(&mut self) {
        self.descriptors.clear();
        self.sub_type_defaulters.clear();
        self.kinds.clear();
        tracing::debug!("Component type catalog cleared");
    }
}
