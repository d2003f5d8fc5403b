//! Axis model factory.
//!
//! [`create_axis_model_type`] turns a kind name (`"angle"`), a typed option
//! shape and kind-specific defaults into registered component types under
//! main-type `"<kind>Axis"`, one per axis sub-type.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ComponentModel;
use super::axis_common::{AxisCapability, AxisCommon, AxisType, default_axis_sub_type};
use crate::component::{Capabilities, ComponentType, ComponentTypeDescriptor, ShapeTag, TypeCatalog};
use crate::error::{MergeError, OptionError, RegistrationError};
use crate::option::defaults::{axis_type_defaults, common_axis_defaults};
use crate::option::{OptionMap, merge, merge_into};

/// Typed options of one axis kind.
pub trait AxisShape: DeserializeOwned + fmt::Debug + Clone + Send + Sync + 'static {
    /// Main-type of the host this axis binds to.
    const HOST_MAIN_TYPE: &'static str;

    /// Wrap a built model into its [`ComponentModel`] variant.
    fn into_model(model: AxisModel<Self>) -> ComponentModel;
}

/// An axis model: the kind's typed options plus the composed axis state.
#[derive(Debug, Clone)]
pub struct AxisModel<S> {
    option: S,
    common: AxisCommon,
}

impl<S: AxisShape> AxisModel<S> {
    /// Validate effective options.
    pub fn from_options(options: &OptionMap) -> Result<Self, serde_json::Error> {
        let value = Value::Object(options.clone());
        Ok(Self {
            option: S::deserialize(&value)?,
            common: AxisCommon::from_value(&value)?,
        })
    }

    /// The kind-specific options.
    pub fn option(&self) -> &S {
        &self.option
    }
}

impl<S> AxisCapability for AxisModel<S> {
    fn axis_common(&self) -> &AxisCommon {
        &self.common
    }
}

fn construct_axis<S: AxisShape>(options: &OptionMap) -> Result<ComponentModel, serde_json::Error> {
    AxisModel::<S>::from_options(options).map(S::into_model)
}

/// The registered types of one axis kind.
#[derive(Debug, Clone)]
pub struct AxisModelType {
    kind: String,
    main_type: String,
    descriptors: Vec<(AxisType, Arc<ComponentTypeDescriptor>)>,
}

impl AxisModelType {
    /// The kind name, e.g. `"angle"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The main-type, e.g. `"angleAxis"`.
    pub fn main_type(&self) -> &str {
        &self.main_type
    }

    pub fn descriptor(&self, axis_type: AxisType) -> Option<&Arc<ComponentTypeDescriptor>> {
        self.descriptors.iter().find(|(t, _)| *t == axis_type).map(|(_, d)| d)
    }

    /// Final defaults of one sub-type.
    pub fn defaults(&self, axis_type: AxisType) -> Option<&OptionMap> {
        self.descriptor(axis_type).map(|d| d.defaults())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<ComponentTypeDescriptor>> {
        self.descriptors.iter().map(|(_, d)| d)
    }

    /// Build effective options and the typed model for `user` options.
    ///
    /// Sub-type selection follows the catalog: explicit `type`, then
    /// `category` for a `data` array, then `value`.
    pub fn instantiate(&self, user: &OptionMap) -> Result<(OptionMap, ComponentModel), OptionError> {
        let sub = default_axis_sub_type(user).unwrap_or_default();
        let descriptor = AxisType::parse(&sub)
            .and_then(|t| self.descriptor(t))
            .ok_or_else(|| OptionError::UnknownComponent(format!("{}.{}", self.main_type, sub)))?;

        let effective = merge(descriptor.defaults(), user)?;
        let model = descriptor.construct(&effective)?;
        Ok((effective, model))
    }
}

/// Register the axis kind `kind` with option shape `S`.
///
/// Defaults of sub-type `t` are `common <- axis_type_defaults(t) <- extra_defaults`.
/// Registering a kind again with the same shape replaces its types; a
/// different shape is rejected.
pub fn create_axis_model_type<S: AxisShape>(
    catalog: &mut TypeCatalog,
    kind: &str,
    extra_defaults: &OptionMap,
) -> Result<AxisModelType, RegistrationError> {
    let kind = kind.trim();
    if kind.is_empty() {
        return Err(RegistrationError::EmptyKind);
    }
    let main_type = format!("{kind}Axis");
    let shape = ShapeTag::of::<S>();
    let common = common_axis_defaults();

    let mut prepared = Vec::with_capacity(AxisType::ALL.len());
    for axis_type in AxisType::ALL {
        let ty = ComponentType::with_sub(main_type.as_str(), axis_type.as_str());
        let defaults_error = |source: MergeError| RegistrationError::Defaults {
            type_name: ty.full_name(),
            source,
        };

        let mut defaults = merge(&common, &axis_type_defaults(axis_type)).map_err(defaults_error)?;
        merge_into(&mut defaults, extra_defaults).map_err(defaults_error)?;
        defaults.insert("type".into(), Value::from(axis_type.as_str()));

        let descriptor = ComponentTypeDescriptor::new(ty, shape, construct_axis::<S>)
            .with_defaults(defaults)
            .with_capabilities(Capabilities::AXIS_COMMON | Capabilities::HOST_BOUND)
            .with_theme_key(axis_type.theme_key())
            .with_host_main_type(S::HOST_MAIN_TYPE);
        prepared.push((axis_type, descriptor));
    }

    catalog.claim_kind(kind, shape)?;
    let descriptors = prepared
        .into_iter()
        .map(|(axis_type, descriptor)| (axis_type, catalog.register_type(descriptor)))
        .collect::<Vec<_>>();
    catalog.register_sub_type_defaulter(main_type.as_str(), default_axis_sub_type);

    tracing::debug!(
        "Registered axis kind '{}' as '{}' with shape {}",
        kind,
        main_type,
        shape.name()
    );

    Ok(AxisModelType {
        kind: kind.to_string(),
        main_type,
        descriptors,
    })
}
