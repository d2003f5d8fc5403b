//! Live component instances of one render pass.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::types::{Capabilities, ComponentTypeDescriptor};
use crate::model::ComponentModel;
use crate::option::{OptionMap, identifier};

/// Non-owning address of an instance: pass, main-type and ordinal position.
///
/// Keys from an earlier pass never resolve against a rebuilt registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    pass: u64,
    main_type: Arc<str>,
    index: usize,
}

impl ComponentKey {
    pub(crate) fn new(pass: u64, main_type: Arc<str>, index: usize) -> Self {
        Self { pass, main_type, index }
    }

    /// The render pass this key belongs to.
    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn main_type(&self) -> &str {
        &self.main_type
    }

    /// Position among instances of the same main-type, in creation order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]@{}", self.main_type, self.index, self.pass)
    }
}

/// One component created from user options for one render pass.
#[derive(Debug, Clone)]
pub struct ComponentInstance {
    key: ComponentKey,
    descriptor: Arc<ComponentTypeDescriptor>,
    id: Option<String>,
    name: Option<String>,
    options: OptionMap,
    model: ComponentModel,
}

impl ComponentInstance {
    pub(crate) fn new(
        key: ComponentKey,
        descriptor: Arc<ComponentTypeDescriptor>,
        options: OptionMap,
        model: ComponentModel,
    ) -> Self {
        let id = options.get("id").and_then(identifier);
        let name = options.get("name").and_then(identifier).filter(|n| !n.is_empty());
        Self {
            key,
            descriptor,
            id,
            name,
            options,
            model,
        }
    }

    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    pub fn main_type(&self) -> &str {
        self.key.main_type()
    }

    pub fn sub_type(&self) -> Option<&str> {
        self.descriptor.sub_type()
    }

    /// Ordinal position among instances of the same main-type.
    pub fn index(&self) -> usize {
        self.key.index()
    }

    /// User-supplied identifier.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// User-supplied display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Effective options: defaults, then theme, then user input.
    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    /// A single effective option value.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// The typed model built from the effective options.
    pub fn model(&self) -> &ComponentModel {
        &self.model
    }

    pub fn descriptor(&self) -> &Arc<ComponentTypeDescriptor> {
        &self.descriptor
    }

    pub fn has_capability(&self, capability: Capabilities) -> bool {
        self.descriptor.capabilities().contains(capability)
    }
}
