//! Coordinate systems and the axes bound to them.

pub mod polar;

pub use polar::{
    ANGLE_AXIS, AngleAxisLabel, AngleAxisModel, AngleAxisOption, LabelRotate, POLAR, PolarAxisDim, PolarComponents,
    PolarModel, PolarOption, PolarRadius, RADIUS_AXIS, RadiusAxisModel, RadiusAxisOption, register_polar_components,
};
