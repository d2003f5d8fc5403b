//! Component types, instances and the per-pass registry.

mod catalog;
mod instance;
mod registry;
mod selector;
mod types;

pub use catalog::{SubTypeDefaulter, TypeCatalog};
pub use instance::{ComponentInstance, ComponentKey};
pub use registry::{ComponentRegistry, RegistryBuilder, RegistryDiagnostic};
pub use selector::Selector;
pub use types::{Capabilities, ComponentType, ComponentTypeDescriptor, ModelConstructor, ShapeTag};
