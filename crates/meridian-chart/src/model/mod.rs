//! Typed component models.

mod axis_common;
mod factory;
mod host;

pub use axis_common::{
    AxisBound, AxisCapability, AxisCommon, AxisType, BoundaryGap, OrdinalMeta, ScaleType, default_axis_sub_type,
};
pub use factory::{AxisModel, AxisModelType, AxisShape, create_axis_model_type};
pub use host::{BindingRef, HostResolver, MissingHost, resolve_host};

use crate::coord::polar::{AngleAxisModel, PolarModel, RadiusAxisModel};

/// The typed model of a component instance, one variant per component kind.
#[derive(Debug, Clone)]
pub enum ComponentModel {
    Polar(PolarModel),
    AngleAxis(AngleAxisModel),
    RadiusAxis(RadiusAxisModel),
}

impl ComponentModel {
    /// Short name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Polar(_) => "polar",
            Self::AngleAxis(_) => "angleAxis",
            Self::RadiusAxis(_) => "radiusAxis",
        }
    }

    /// Axis helpers, if this is an axis model.
    pub fn as_axis(&self) -> Option<&dyn AxisCapability> {
        match self {
            Self::AngleAxis(axis) => Some(axis),
            Self::RadiusAxis(axis) => Some(axis),
            Self::Polar(_) => None,
        }
    }

    pub fn as_polar(&self) -> Option<&PolarModel> {
        match self {
            Self::Polar(polar) => Some(polar),
            _ => None,
        }
    }

    pub fn as_angle_axis(&self) -> Option<&AngleAxisModel> {
        match self {
            Self::AngleAxis(axis) => Some(axis),
            _ => None,
        }
    }

    pub fn as_radius_axis(&self) -> Option<&RadiusAxisModel> {
        match self {
            Self::RadiusAxis(axis) => Some(axis),
            _ => None,
        }
    }
}
