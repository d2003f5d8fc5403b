//! Built-in default option sets.
//!
//! Every call returns a fresh mapping, so callers may mutate the result
//! without affecting other component types.

use serde_json::json;

use super::{OptionMap, object};
use crate::model::AxisType;

/// Defaults shared by every axis, whatever its kind or sub-type.
pub fn common_axis_defaults() -> OptionMap {
    object(json!({
        "show": true,
        "z": 0,
        "inverse": false,
        "scale": false,
        "name": "",
        "nameLocation": "end",
        "nameRotate": null,
        "nameTruncate": {
            "maxWidth": null,
            "ellipsis": "...",
            "placeholder": "."
        },
        "nameTextStyle": {},
        "nameGap": 15,
        "silent": false,
        "triggerEvent": false,
        "tooltip": { "show": false },
        "axisPointer": {},
        "axisLine": {
            "show": true,
            "onZero": true,
            "onZeroAxisIndex": null,
            "lineStyle": { "color": "#6E7079", "width": 1, "type": "solid" },
            "symbol": ["none", "none"],
            "symbolSize": [10, 15]
        },
        "axisTick": {
            "show": true,
            "inside": false,
            "length": 5,
            "lineStyle": { "width": 1 }
        },
        "axisLabel": {
            "show": true,
            "inside": false,
            "rotate": 0,
            "showMinLabel": null,
            "showMaxLabel": null,
            "margin": 8,
            "fontSize": 12
        },
        "splitLine": {
            "show": true,
            "lineStyle": { "color": ["#E0E6F1"], "width": 1, "type": "solid" }
        },
        "splitArea": {
            "show": false,
            "areaStyle": {
                "color": ["rgba(250,250,250,0.2)", "rgba(210,219,238,0.2)"]
            }
        }
    }))
}

/// Defaults specific to one axis sub-type, layered over [`common_axis_defaults`].
pub fn axis_type_defaults(axis_type: AxisType) -> OptionMap {
    match axis_type {
        AxisType::Category => object(json!({
            "boundaryGap": true,
            "deduplication": null,
            "splitLine": { "show": false },
            "axisTick": { "alignWithLabel": false, "interval": "auto" },
            "axisLabel": { "interval": "auto" }
        })),
        AxisType::Value => value_axis_defaults(),
        AxisType::Time => {
            let mut defaults = value_axis_defaults();
            defaults.insert("splitNumber".into(), json!(6));
            defaults.insert("axisLabel".into(), json!({ "showMinLabel": false, "showMaxLabel": false }));
            defaults.insert("splitLine".into(), json!({ "show": false }));
            defaults
        }
        AxisType::Log => {
            let mut defaults = value_axis_defaults();
            defaults.insert("scale".into(), json!(true));
            defaults.insert("logBase".into(), json!(10));
            defaults
        }
    }
}

fn value_axis_defaults() -> OptionMap {
    object(json!({
        "boundaryGap": [0, 0],
        "splitNumber": 5,
        "minorTick": {
            "show": false,
            "splitNumber": 5,
            "length": 3,
            "lineStyle": {}
        },
        "minorSplitLine": {
            "show": false,
            "lineStyle": { "color": "#F4F7FD", "width": 1 }
        }
    }))
}

/// Defaults of the polar coordinate system.
pub fn polar_defaults() -> OptionMap {
    object(json!({
        "z": 0,
        "center": ["50%", "50%"],
        "radius": "80%"
    }))
}
