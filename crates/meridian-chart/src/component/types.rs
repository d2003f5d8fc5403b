//! Component type names and descriptors.

use std::any::{TypeId, type_name};
use std::fmt;

use bitflags::bitflags;

use crate::error::{OptionError, RegistrationError};
use crate::model::ComponentModel;
use crate::option::OptionMap;

/// Full name of a component type: a main-type plus an optional sub-type.
///
/// Written `"main"` or `"main.sub"`, e.g. `"polar"` or `"angleAxis.category"`.
/// Instances are grouped, ordered and queried by main-type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentType {
    main: String,
    sub: Option<String>,
}

impl ComponentType {
    /// A type with only a main-type.
    pub fn new(main: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            sub: None,
        }
    }

    /// A type with a main-type and a sub-type.
    pub fn with_sub(main: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            sub: Some(sub.into()),
        }
    }

    /// Parse `"main"` or `"main.sub"`.
    pub fn parse(full: &str) -> Result<Self, RegistrationError> {
        let invalid = || RegistrationError::InvalidTypeName(full.to_string());
        let mut parts = full.split('.');
        let main = parts.next().filter(|m| !m.is_empty()).ok_or_else(invalid)?;
        let sub = parts.next();
        if parts.next().is_some() || sub.is_some_and(str::is_empty) {
            return Err(invalid());
        }

        Ok(Self {
            main: main.to_string(),
            sub: sub.map(str::to_string),
        })
    }

    /// The main-type.
    pub fn main(&self) -> &str {
        &self.main
    }

    /// The sub-type, if any.
    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// The full name, `"main"` or `"main.sub"`.
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub {
            Some(sub) => write!(f, "{}.{}", self.main, sub),
            None => f.write_str(&self.main),
        }
    }
}

bitflags! {
    /// Shared behavior a component type carries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Axis helpers: sub-type, scale type, categories, boundary gap.
        const AXIS_COMMON = 1 << 0;
        /// Binds to a host component through `<host>Index` / `<host>Id`.
        const HOST_BOUND = 1 << 1;
    }
}

/// Identity of the typed option shape a component type was created from.
#[derive(Debug, Clone, Copy)]
pub struct ShapeTag {
    id: TypeId,
    name: &'static str,
}

impl ShapeTag {
    /// Tag for the Rust type `S`.
    pub fn of<S: 'static>() -> Self {
        Self {
            id: TypeId::of::<S>(),
            name: type_name::<S>(),
        }
    }

    /// Type name of the shape.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ShapeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ShapeTag {}

/// Builds the typed model from effective options.
pub type ModelConstructor = fn(&OptionMap) -> Result<ComponentModel, serde_json::Error>;

/// Everything the registry knows about one component type.
#[derive(Debug, Clone)]
pub struct ComponentTypeDescriptor {
    ty: ComponentType,
    defaults: OptionMap,
    capabilities: Capabilities,
    shape: ShapeTag,
    theme_key: Option<String>,
    host_main_type: Option<String>,
    construct: ModelConstructor,
}

impl ComponentTypeDescriptor {
    /// Create a descriptor with empty defaults and no capabilities.
    pub fn new(ty: ComponentType, shape: ShapeTag, construct: ModelConstructor) -> Self {
        Self {
            ty,
            defaults: OptionMap::new(),
            capabilities: Capabilities::empty(),
            shape,
            theme_key: None,
            host_main_type: None,
            construct,
        }
    }

    /// Set the default options.
    pub fn with_defaults(mut self, defaults: OptionMap) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the capability set.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the theme section consulted between defaults and user options.
    pub fn with_theme_key(mut self, key: impl Into<String>) -> Self {
        self.theme_key = Some(key.into());
        self
    }

    /// Set the main-type of the host instances of this type bind to.
    pub fn with_host_main_type(mut self, main_type: impl Into<String>) -> Self {
        self.host_main_type = Some(main_type.into());
        self
    }

    pub fn component_type(&self) -> &ComponentType {
        &self.ty
    }

    pub fn main_type(&self) -> &str {
        self.ty.main()
    }

    pub fn sub_type(&self) -> Option<&str> {
        self.ty.sub()
    }

    pub fn defaults(&self) -> &OptionMap {
        &self.defaults
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn shape(&self) -> ShapeTag {
        self.shape
    }

    pub fn theme_key(&self) -> Option<&str> {
        self.theme_key.as_deref()
    }

    pub fn host_main_type(&self) -> Option<&str> {
        self.host_main_type.as_deref()
    }

    /// Validate effective options into the typed model.
    pub fn construct(&self, effective: &OptionMap) -> Result<ComponentModel, OptionError> {
        (self.construct)(effective).map_err(|source| OptionError::Invalid {
            type_name: self.ty.full_name(),
            source,
        })
    }
}
