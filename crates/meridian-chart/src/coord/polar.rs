//! Polar coordinate system with its angle and radius axes.
//!
//! Angle and radius axes bind to a `polar` instance through `polarIndex` or
//! `polarId`. When neither is given they bind to the first polar instance.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::component::{
    ComponentInstance, ComponentRegistry, ComponentType, ComponentTypeDescriptor, ShapeTag, TypeCatalog,
};
use crate::error::RegistrationError;
use crate::model::{AxisModel, AxisModelType, AxisShape, ComponentModel, create_axis_model_type};
use crate::option::defaults::polar_defaults;
use crate::option::{Length, OptionMap, deserialize_identifier, deserialize_index, object, value_kind};

/// Main-type of the polar coordinate system.
pub const POLAR: &str = "polar";
/// Main-type of angle axes.
pub const ANGLE_AXIS: &str = "angleAxis";
/// Main-type of radius axes.
pub const RADIUS_AXIS: &str = "radiusAxis";

/// Options of a polar coordinate system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolarOption {
    /// Center `[x, y]`, relative to the chart size for percentages.
    pub center: [Length; 2],
    pub radius: PolarRadius,
}

impl Default for PolarOption {
    fn default() -> Self {
        Self {
            center: [Length::Percent(50.0); 2],
            radius: PolarRadius::Outer(Length::Percent(80.0)),
        }
    }
}

/// Outer radius alone, or an `[inner, outer]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PolarRadius {
    Outer(Length),
    Range([Length; 2]),
}

impl PolarRadius {
    /// `(inner, outer)`; the inner radius of a plain outer radius is zero.
    pub fn inner_outer(&self) -> (Length, Length) {
        match *self {
            Self::Outer(outer) => (Length::Absolute(0.0), outer),
            Self::Range([inner, outer]) => (inner, outer),
        }
    }
}

/// Model of one polar instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarModel {
    option: PolarOption,
}

/// Axis dimensions of a polar coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarAxisDim {
    Angle,
    Radius,
}

impl PolarAxisDim {
    /// Main-type of axes along this dimension.
    pub fn main_type(self) -> &'static str {
        match self {
            Self::Angle => ANGLE_AXIS,
            Self::Radius => RADIUS_AXIS,
        }
    }
}

impl PolarModel {
    pub fn from_options(options: &OptionMap) -> Result<Self, serde_json::Error> {
        let option = PolarOption::deserialize(&Value::Object(options.clone()))?;
        Ok(Self { option })
    }

    pub fn option(&self) -> &PolarOption {
        &self.option
    }

    /// The first `dim` axis whose host is `host`.
    pub fn find_axis<'r>(
        registry: &'r ComponentRegistry,
        host: &ComponentInstance,
        dim: PolarAxisDim,
    ) -> Option<&'r ComponentInstance> {
        registry.dependents_of(host, dim.main_type()).into_iter().next()
    }
}

fn construct_polar(options: &OptionMap) -> Result<ComponentModel, serde_json::Error> {
    PolarModel::from_options(options).map(ComponentModel::Polar)
}

/// Rotation of angle axis labels: a fixed angle, or disabled to follow the axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum LabelRotate {
    Disabled,
    Degrees(f64),
}

impl Default for LabelRotate {
    fn default() -> Self {
        Self::Degrees(0.0)
    }
}

impl TryFrom<Value> for LabelRotate {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Bool(false) => Ok(Self::Disabled),
            Value::Number(n) => n.as_f64().map(Self::Degrees).ok_or_else(|| format!("label rotation {n} is out of range")),
            other => Err(format!(
                "label rotation must be a number or false, found {}",
                if other == Value::Bool(true) { "true" } else { value_kind(&other) }
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AngleAxisLabel {
    pub rotate: LabelRotate,
}

/// Options of an angle axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleAxisOption {
    /// Index of the host polar component.
    #[serde(default, deserialize_with = "deserialize_index")]
    pub polar_index: Option<i64>,
    /// Id of the host polar component.
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub polar_id: Option<String>,
    /// Angle of the first tick, in degrees.
    #[serde(default = "default_start_angle")]
    pub start_angle: f64,
    #[serde(default = "default_clockwise")]
    pub clockwise: bool,
    #[serde(default)]
    pub axis_label: AngleAxisLabel,
}

fn default_start_angle() -> f64 {
    90.0
}

fn default_clockwise() -> bool {
    true
}

impl AxisShape for AngleAxisOption {
    const HOST_MAIN_TYPE: &'static str = POLAR;

    fn into_model(model: AxisModel<Self>) -> ComponentModel {
        ComponentModel::AngleAxis(model)
    }
}

/// Options of a radius axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusAxisOption {
    /// Index of the host polar component.
    #[serde(default, deserialize_with = "deserialize_index")]
    pub polar_index: Option<i64>,
    /// Id of the host polar component.
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub polar_id: Option<String>,
}

impl AxisShape for RadiusAxisOption {
    const HOST_MAIN_TYPE: &'static str = POLAR;

    fn into_model(model: AxisModel<Self>) -> ComponentModel {
        ComponentModel::RadiusAxis(model)
    }
}

pub type AngleAxisModel = AxisModel<AngleAxisOption>;
pub type RadiusAxisModel = AxisModel<RadiusAxisOption>;

/// Types registered by [`register_polar_components`].
#[derive(Debug, Clone)]
pub struct PolarComponents {
    pub polar: Arc<ComponentTypeDescriptor>,
    pub angle: AxisModelType,
    pub radius: AxisModelType,
}

/// Register the polar coordinate system and its angle and radius axes.
pub fn register_polar_components(catalog: &mut TypeCatalog) -> Result<PolarComponents, RegistrationError> {
    let polar = catalog.register_type(
        ComponentTypeDescriptor::new(ComponentType::new(POLAR), ShapeTag::of::<PolarOption>(), construct_polar)
            .with_defaults(polar_defaults())
            .with_theme_key(POLAR),
    );

    let angle = create_axis_model_type::<AngleAxisOption>(
        catalog,
        "angle",
        &object(json!({
            "startAngle": 90,
            "clockwise": true,
            "splitNumber": 12,
            "axisLabel": { "rotate": false }
        })),
    )?;

    let radius = create_axis_model_type::<RadiusAxisOption>(catalog, "radius", &object(json!({ "splitNumber": 5 })))?;

    tracing::debug!("Polar components registered");
    Ok(PolarComponents { polar, angle, radius })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AxisCapability, AxisType, HostResolver};

    fn catalog() -> (TypeCatalog, PolarComponents) {
        let mut catalog = TypeCatalog::new();
        let components = register_polar_components(&mut catalog).unwrap();
        (catalog, components)
    }

    #[test]
    fn test_polar_defaults() {
        let model = PolarModel::from_options(&polar_defaults()).unwrap();
        assert_eq!(model.option(), &PolarOption::default());
        assert_eq!(
            model.option().radius.inner_outer(),
            (Length::Absolute(0.0), Length::Percent(80.0))
        );
    }

    #[test]
    fn test_polar_radius_range() {
        let model = PolarModel::from_options(&object(json!({ "radius": [20, "75%"] }))).unwrap();
        assert_eq!(
            model.option().radius,
            PolarRadius::Range([Length::Absolute(20.0), Length::Percent(75.0)])
        );
    }

    #[test]
    fn test_angle_axis_defaults() {
        let (_, components) = catalog();
        let (effective, model) = components.angle.instantiate(&OptionMap::new()).unwrap();

        assert_eq!(effective["splitNumber"], json!(12));
        assert_eq!(effective["axisLabel"]["rotate"], json!(false));
        assert_eq!(effective["axisLabel"]["margin"], json!(8));

        let axis = model.as_angle_axis().unwrap();
        assert_eq!(axis.option().start_angle, 90.0);
        assert!(axis.option().clockwise);
        assert_eq!(axis.option().axis_label.rotate, LabelRotate::Disabled);
        assert_eq!(axis.split_number(), Some(12));
        assert_eq!(axis.axis_type(), AxisType::Value);
    }

    #[test]
    fn test_angle_label_rotation() {
        let (_, components) = catalog();
        let (_, model) = components
            .angle
            .instantiate(&object(json!({ "axisLabel": { "rotate": 45 } })))
            .unwrap();
        assert_eq!(model.as_angle_axis().unwrap().option().axis_label.rotate, LabelRotate::Degrees(45.0));

        assert!(components.angle.instantiate(&object(json!({ "axisLabel": { "rotate": true } }))).is_err());
    }

    #[test]
    fn test_radius_axis_defaults() {
        let (_, components) = catalog();
        let (effective, model) = components.radius.instantiate(&object(json!({ "polarId": 3 }))).unwrap();
        assert_eq!(effective["splitNumber"], json!(5));

        let axis = model.as_radius_axis().unwrap();
        assert_eq!(axis.option().polar_id.as_deref(), Some("3"));
        assert_eq!(axis.option().polar_index, None);
    }

    #[test]
    fn test_kinds_are_independent() {
        let (_, components) = catalog();
        assert_ne!(components.angle.main_type(), components.radius.main_type());

        let mut angle_defaults = components.angle.defaults(AxisType::Value).unwrap().clone();
        angle_defaults.insert("splitNumber".into(), json!(99));
        assert_eq!(components.radius.defaults(AxisType::Value).unwrap()["splitNumber"], json!(5));
        assert_eq!(components.angle.defaults(AxisType::Value).unwrap()["splitNumber"], json!(12));
    }

    #[test]
    fn test_find_axis() {
        let (catalog, _) = catalog();
        let mut builder = ComponentRegistry::builder(&catalog);
        builder.add(POLAR, &json!({})).unwrap();
        let second = builder.add(POLAR, &json!({ "id": "p2" })).unwrap();
        builder.add(ANGLE_AXIS, &json!({})).unwrap();
        let radius = builder.add(RADIUS_AXIS, &json!({ "polarId": "p2" })).unwrap();
        let registry = builder.build();

        let host = registry.get(&second).unwrap();
        assert_eq!(
            PolarModel::find_axis(&registry, host, PolarAxisDim::Radius).map(|c| c.key()),
            Some(&radius)
        );
        assert!(PolarModel::find_axis(&registry, host, PolarAxisDim::Angle).is_none());
        assert_eq!(registry.get(&radius).unwrap().get_host(&registry, POLAR).unwrap().key(), &second);
    }
}
