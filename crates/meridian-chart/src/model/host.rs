//! Host resolution: a dependent instance locating the one instance it binds to.

use thiserror::Error;

use crate::component::{ComponentInstance, ComponentRegistry, Selector};
use crate::config::DuplicateIdPolicy;
use crate::option::{OptionMap, identifier, ordinal_index};

/// The `(index, id)` pair a dependent reads from its own options.
///
/// For host main-type `polar` the keys are `polarIndex` and `polarId`.
/// Neither given means index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingRef {
    pub index: Option<i64>,
    pub id: Option<String>,
}

impl BindingRef {
    /// Read `<host_main>Index` / `<host_main>Id` from effective options.
    pub fn from_options(options: &OptionMap, host_main: &str) -> Self {
        let index = options.get(&format!("{host_main}Index")).and_then(ordinal_index);
        let id = options.get(&format!("{host_main}Id")).and_then(identifier);
        Self { index, id }
    }

    /// The registry selector this binding stands for.
    pub fn selector(&self) -> Selector {
        match (&self.id, self.index) {
            (Some(id), _) => Selector::id(id.clone()),
            (None, Some(index)) => Selector::index(index),
            (None, None) => Selector::index(0),
        }
    }
}

/// Why a dependent has no host this pass.
///
/// Not an error to propagate: callers skip the dependent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingHost {
    #[error("no '{main_type}' component exists")]
    NoInstances { main_type: String },

    #[error("'{main_type}' index {index} is out of range (count {count})")]
    IndexOutOfRange { main_type: String, index: i64, count: usize },

    #[error("no '{main_type}' component has id '{id}'")]
    UnknownId { main_type: String, id: String },

    #[error("{count} '{main_type}' components share id '{id}'")]
    DuplicateId { main_type: String, id: String, count: usize },
}

/// Resolve the `host_main` instance a binding points at.
pub fn resolve_host<'r>(
    registry: &'r ComponentRegistry,
    host_main: &str,
    binding: &BindingRef,
) -> Result<&'r ComponentInstance, MissingHost> {
    let matches = registry.query_instances(host_main, &binding.selector());

    match (matches.as_slice(), &binding.id) {
        ([], _) => Err(classify_missing(registry, host_main, binding)),
        ([host], _) => Ok(*host),
        ([first, ..], Some(id)) => match registry.policy() {
            DuplicateIdPolicy::FirstMatch => {
                tracing::debug!("Id '{}' matches {} '{}' components, using {}", id, matches.len(), host_main, first.key());
                Ok(*first)
            }
            DuplicateIdPolicy::Reject => Err(MissingHost::DuplicateId {
                main_type: host_main.to_string(),
                id: id.clone(),
                count: matches.len(),
            }),
        },
        ([first, ..], None) => Ok(*first),
    }
}

fn classify_missing(registry: &ComponentRegistry, host_main: &str, binding: &BindingRef) -> MissingHost {
    let main_type = host_main.to_string();
    let count = registry.count(host_main);
    if count == 0 {
        return MissingHost::NoInstances { main_type };
    }
    match &binding.id {
        Some(id) => MissingHost::UnknownId { main_type, id: id.clone() },
        None => MissingHost::IndexOutOfRange {
            main_type,
            index: binding.index.unwrap_or(0),
            count,
        },
    }
}

/// Implemented by instances that bind to a host.
pub trait HostResolver {
    /// The binding toward hosts of main-type `host_main`.
    fn binding(&self, host_main: &str) -> BindingRef;

    /// Resolve the host. Evaluated fresh on every call.
    fn get_host<'r>(&self, registry: &'r ComponentRegistry, host_main: &str) -> Result<&'r ComponentInstance, MissingHost> {
        resolve_host(registry, host_main, &self.binding(host_main))
    }
}

impl HostResolver for ComponentInstance {
    fn binding(&self, host_main: &str) -> BindingRef {
        BindingRef::from_options(self.options(), host_main)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::object;
    use serde_json::json;

    #[test]
    fn test_binding_from_options() {
        let options = object(json!({ "polarIndex": 2, "polarId": 7, "radarIndex": 1 }));
        let binding = BindingRef::from_options(&options, "polar");
        assert_eq!(binding.index, Some(2));
        assert_eq!(binding.id.as_deref(), Some("7"));

        let binding = BindingRef::from_options(&OptionMap::new(), "polar");
        assert_eq!(binding, BindingRef::default());
    }

    #[test]
    fn test_binding_index_forms() {
        let read =
            |value: serde_json::Value| BindingRef::from_options(&object(json!({ "polarIndex": value })), "polar").index;
        assert_eq!(read(json!(1.0)), Some(1));
        assert_eq!(read(json!(-2)), Some(-2));
        assert_eq!(read(json!(1e20)), Some(i64::MAX));
        assert_eq!(read(json!(1.5)), None);
        assert_eq!(read(json!("1")), None);
    }

    #[test]
    fn test_selector_precedence() {
        let both = BindingRef {
            index: Some(3),
            id: Some("main".into()),
        };
        assert_eq!(both.selector(), Selector::id("main"));
        assert_eq!(BindingRef::default().selector(), Selector::index(0));
        assert_eq!(
            BindingRef {
                index: Some(-1),
                id: None
            }
            .selector(),
            Selector::index(-1)
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = ComponentRegistry::empty();
        assert_eq!(
            resolve_host(&registry, "polar", &BindingRef::default()).unwrap_err(),
            MissingHost::NoInstances {
                main_type: "polar".into()
            }
        );
    }
}
