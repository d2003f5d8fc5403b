//! Integration tests for registry queries and host resolution.

use std::sync::Arc;

use meridian_chart::*;
use serde_json::{Value, json};

// ============================================================================
// Helpers
// ============================================================================

fn polar_catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    register_polar_components(&mut catalog).unwrap();
    catalog
}

fn registry_with(catalog: &TypeCatalog, entries: &[(&str, Value)]) -> ComponentRegistry {
    let mut builder = ComponentRegistry::builder(catalog);
    for (main_type, options) in entries {
        builder.add(main_type, options).unwrap();
    }
    builder.build()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_axis_without_binding_uses_first_polar() {
    let mut catalog = TypeCatalog::new();
    create_axis_model_type::<AngleAxisOption>(&mut catalog, "angle", &json!({ "splitNumber": 12 }).as_object().unwrap().clone())
        .unwrap();
    catalog.register_type(
        ComponentTypeDescriptor::new(ComponentType::new(POLAR), ShapeTag::of::<PolarOption>(), |options| {
            PolarModel::from_options(options).map(ComponentModel::Polar)
        }),
    );

    let registry = registry_with(&catalog, &[(POLAR, json!({})), (ANGLE_AXIS, json!({}))]);
    let axis = &registry.instances(ANGLE_AXIS)[0];

    let host = axis.get_host(&registry, POLAR).unwrap();
    assert_eq!(host.index(), 0);
    assert_eq!(host.main_type(), POLAR);
    assert_eq!(axis.option("splitNumber"), Some(&json!(12)));
    assert_eq!(axis.model().as_axis().unwrap().split_number(), Some(12));
}

#[test]
fn test_axis_binds_by_id() {
    let catalog = polar_catalog();
    let registry = registry_with(
        &catalog,
        &[
            (POLAR, json!({})),
            (POLAR, json!({ "id": "p2" })),
            (ANGLE_AXIS, json!({ "polarId": "p2" })),
        ],
    );

    let axis = &registry.instances(ANGLE_AXIS)[0];
    let host = axis.get_host(&registry, POLAR).unwrap();
    assert_eq!(host.index(), 1);
    assert_eq!(host.id(), Some("p2"));
}

#[test]
fn test_missing_polar_is_not_an_error() {
    let catalog = polar_catalog();
    let registry = registry_with(&catalog, &[(ANGLE_AXIS, json!({ "polarIndex": 0 }))]);

    let axis = &registry.instances(ANGLE_AXIS)[0];
    assert_eq!(
        axis.get_host(&registry, POLAR).unwrap_err(),
        MissingHost::NoInstances {
            main_type: POLAR.to_string()
        }
    );
}

// ============================================================================
// Query semantics
// ============================================================================

#[test]
fn test_query_on_empty_registry() {
    let registry = ComponentRegistry::empty();
    assert!(registry.query_instances(POLAR, &Selector::all()).is_empty());
    assert!(registry.query_instances(POLAR, &Selector::index(0)).is_empty());
    assert!(registry.query_instances(POLAR, &Selector::id("x")).is_empty());
}

#[test]
fn test_query_by_index_for_every_count() {
    let catalog = polar_catalog();

    for count in 0..5usize {
        let entries: Vec<_> = (0..count).map(|_| (POLAR, json!({}))).collect();
        let registry = registry_with(&catalog, &entries);

        for index in -2..(count as i64 + 3) {
            let found = registry.query_instances(POLAR, &Selector::index(index));
            if index >= 0 && (index as usize) < count {
                assert_eq!(found.len(), 1, "count {count}, index {index}");
                assert_eq!(found[0].index(), index as usize);
            } else {
                assert!(found.is_empty(), "count {count}, index {index}");
            }
        }
    }
}

#[test]
fn test_query_by_id_ignores_position() {
    let catalog = polar_catalog();

    for position in 0..4 {
        let entries: Vec<_> = (0..4)
            .map(|i| {
                let options = if i == position { json!({ "id": "X" }) } else { json!({ "id": format!("other{i}") }) };
                (POLAR, options)
            })
            .collect();
        let registry = registry_with(&catalog, &entries);

        let found = registry.query_instances(POLAR, &Selector::id("X"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index(), position);
    }
}

#[test]
fn test_id_wins_over_index() {
    let catalog = polar_catalog();
    let registry = registry_with(
        &catalog,
        &[
            (POLAR, json!({ "id": "a" })),
            (POLAR, json!({ "id": "b" })),
            (ANGLE_AXIS, json!({ "polarIndex": 0, "polarId": "b" })),
        ],
    );

    let axis = &registry.instances(ANGLE_AXIS)[0];
    assert_eq!(axis.get_host(&registry, POLAR).unwrap().id(), Some("b"));
}

#[test]
fn test_query_by_name_and_sub_type() {
    let catalog = polar_catalog();
    let registry = registry_with(
        &catalog,
        &[
            (ANGLE_AXIS, json!({ "name": "hours" })),
            (ANGLE_AXIS, json!({ "name": "days", "data": ["Mon", "Tue"] })),
            (ANGLE_AXIS, json!({ "name": "hours", "type": "log" })),
        ],
    );

    let hours = registry.query_instances(ANGLE_AXIS, &Selector::name("hours"));
    assert_eq!(hours.iter().map(|c| c.index()).collect::<Vec<_>>(), [0, 2]);

    let category = registry.query_instances(ANGLE_AXIS, &Selector::all().with_sub_type("category"));
    assert_eq!(category.len(), 1);
    assert_eq!(category[0].name(), Some("days"));

    let log_hours = registry.query_instances(ANGLE_AXIS, &Selector::name("hours").with_sub_type("log"));
    assert_eq!(log_hours.len(), 1);
    assert_eq!(log_hours[0].index(), 2);
}

#[test]
fn test_numeric_ids_match_their_text() {
    let catalog = polar_catalog();
    let registry = registry_with(
        &catalog,
        &[(POLAR, json!({})), (POLAR, json!({ "id": 7 })), (RADIUS_AXIS, json!({ "polarId": "7" }))],
    );

    let axis = &registry.instances(RADIUS_AXIS)[0];
    assert_eq!(axis.get_host(&registry, POLAR).unwrap().index(), 1);
}

// ============================================================================
// Missing hosts
// ============================================================================

#[test]
fn test_missing_host_outcomes() {
    let catalog = polar_catalog();
    let registry = registry_with(
        &catalog,
        &[
            (POLAR, json!({ "id": "main" })),
            (ANGLE_AXIS, json!({ "polarIndex": 3 })),
            (ANGLE_AXIS, json!({ "polarIndex": -1 })),
            (ANGLE_AXIS, json!({ "polarId": "other" })),
        ],
    );
    let axes = registry.instances(ANGLE_AXIS);

    assert_eq!(
        axes[0].get_host(&registry, POLAR).unwrap_err(),
        MissingHost::IndexOutOfRange {
            main_type: POLAR.into(),
            index: 3,
            count: 1
        }
    );
    assert!(matches!(
        axes[1].get_host(&registry, POLAR),
        Err(MissingHost::IndexOutOfRange { index: -1, .. })
    ));
    assert_eq!(
        axes[2].get_host(&registry, POLAR).unwrap_err(),
        MissingHost::UnknownId {
            main_type: POLAR.into(),
            id: "other".into()
        }
    );
}

#[test]
fn test_get_host_is_idempotent() {
    let catalog = polar_catalog();
    let registry = registry_with(
        &catalog,
        &[(POLAR, json!({})), (POLAR, json!({})), (RADIUS_AXIS, json!({ "polarIndex": 1 }))],
    );
    let axis = &registry.instances(RADIUS_AXIS)[0];

    let first = axis.get_host(&registry, POLAR).map(|h| h.key().clone());
    let second = axis.get_host(&registry, POLAR).map(|h| h.key().clone());
    assert_eq!(first, second);
    assert_eq!(first.unwrap().index(), 1);
}

#[test]
fn test_float_polar_index_binds() {
    let mut chart = ChartContext::new(Arc::new(polar_catalog()));
    chart
        .set_option(&json!({
            "polar": [{}, { "id": "second" }],
            "angleAxis": { "polarIndex": 1.0 },
            "radiusAxis": { "polarIndex": 1.0 }
        }))
        .unwrap();

    let axis = &chart.registry().instances(ANGLE_AXIS)[0];
    assert_eq!(axis.model().as_angle_axis().unwrap().option().polar_index, Some(1));

    for main_type in [ANGLE_AXIS, RADIUS_AXIS] {
        let pairs = chart.active_dependents(main_type);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1.id(), Some("second"));
    }
}

#[test]
fn test_huge_polar_index_is_out_of_range() {
    let mut chart = ChartContext::new(Arc::new(polar_catalog()));
    chart
        .set_option(&json!({ "polar": {}, "angleAxis": { "polarIndex": 1e20 } }))
        .unwrap();

    let axis = &chart.registry().instances(ANGLE_AXIS)[0];
    assert_eq!(
        axis.get_host(chart.registry(), POLAR).unwrap_err(),
        MissingHost::IndexOutOfRange {
            main_type: POLAR.into(),
            index: i64::MAX,
            count: 1
        }
    );
    assert!(chart.active_dependents(ANGLE_AXIS).is_empty());
}

// ============================================================================
// Duplicate identifiers
// ============================================================================

fn duplicate_registry(catalog: &TypeCatalog, policy: DuplicateIdPolicy) -> ComponentRegistry {
    let mut builder = ComponentRegistry::builder(catalog).with_policy(policy);
    builder.add(POLAR, &json!({ "id": "dup", "center": [10, 10] })).unwrap();
    builder.add(POLAR, &json!({ "id": "solo" })).unwrap();
    builder.add(POLAR, &json!({ "id": "dup", "center": [20, 20] })).unwrap();
    builder.add(ANGLE_AXIS, &json!({ "polarId": "dup" })).unwrap();
    builder.build()
}

#[test]
fn test_duplicate_ids_first_match() {
    let catalog = polar_catalog();
    let registry = duplicate_registry(&catalog, DuplicateIdPolicy::FirstMatch);

    assert_eq!(
        registry.diagnostics(),
        [RegistryDiagnostic::DuplicateId {
            main_type: POLAR.into(),
            id: "dup".into(),
            indices: vec![0, 2],
        }]
    );
    assert_eq!(registry.query_instances(POLAR, &Selector::id("dup")).len(), 2);

    let axis = &registry.instances(ANGLE_AXIS)[0];
    let host = axis.get_host(&registry, POLAR).unwrap();
    assert_eq!(host.index(), 0);
    assert_eq!(host.model().as_polar().unwrap().option().center, [Length::Absolute(10.0); 2]);
}

#[test]
fn test_duplicate_ids_reject() {
    let catalog = polar_catalog();
    let registry = duplicate_registry(&catalog, DuplicateIdPolicy::Reject);

    let axis = &registry.instances(ANGLE_AXIS)[0];
    assert_eq!(
        axis.get_host(&registry, POLAR).unwrap_err(),
        MissingHost::DuplicateId {
            main_type: POLAR.into(),
            id: "dup".into(),
            count: 2
        }
    );
}

// ============================================================================
// Reverse lookup and passes
// ============================================================================

#[test]
fn test_dependents_of_host() {
    let catalog = polar_catalog();
    let registry = registry_with(
        &catalog,
        &[
            (POLAR, json!({})),
            (POLAR, json!({ "id": "right" })),
            (ANGLE_AXIS, json!({})),
            (ANGLE_AXIS, json!({ "polarId": "right" })),
            (RADIUS_AXIS, json!({ "polarIndex": 1 })),
        ],
    );

    let left = &registry.instances(POLAR)[0];
    let right = &registry.instances(POLAR)[1];

    let left_angles = registry.dependents_of(left, ANGLE_AXIS);
    assert_eq!(left_angles.len(), 1);
    assert_eq!(left_angles[0].index(), 0);

    assert_eq!(
        PolarModel::find_axis(&registry, right, PolarAxisDim::Angle).map(|a| a.index()),
        Some(1)
    );
    assert_eq!(
        PolarModel::find_axis(&registry, right, PolarAxisDim::Radius).map(|a| a.index()),
        Some(0)
    );
    assert!(PolarModel::find_axis(&registry, left, PolarAxisDim::Radius).is_none());
}

#[test]
fn test_charts_share_one_catalog() {
    let catalog = Arc::new(polar_catalog());
    let mut first = ChartContext::new(Arc::clone(&catalog));
    let mut second = ChartContext::new(Arc::clone(&catalog));

    first.set_option(&json!({ "polar": [{}, {}] })).unwrap();
    second.set_option(&json!({ "polar": {} })).unwrap();

    assert_eq!(first.registry().count(POLAR), 2);
    assert_eq!(second.registry().count(POLAR), 1);
    assert_eq!(Arc::strong_count(&catalog), 3);
}

#[test]
fn test_rebuild_replaces_instances() {
    let catalog = Arc::new(polar_catalog());
    let mut chart = ChartContext::new(catalog);

    chart
        .set_option(&json!({ "polar": [{ "id": "a" }, { "id": "b" }], "angleAxis": { "polarId": "b" } }))
        .unwrap();
    assert_eq!(chart.active_dependents(ANGLE_AXIS)[0].1.index(), 1);

    chart
        .set_option(&json!({ "polar": { "id": "b" }, "angleAxis": { "polarId": "b" } }))
        .unwrap();
    let pairs = chart.active_dependents(ANGLE_AXIS);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].1.index(), 0);
    assert_eq!(chart.registry().pass(), 2);
}
