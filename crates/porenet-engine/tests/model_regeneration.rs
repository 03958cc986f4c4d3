//! Integration test: model registration, regeneration, and relocation.
//!
//! Covers the dynamic-versus-static split, selective regeneration with
//! warn-and-skip on unknown names, both subset binding policies, and
//! failure propagation out of a model.

use porenet_core::{Array, ElementKind, ModelError, NetworkId, PhaseId, PhysicsId, PropKey, StoreError};
use porenet_engine::{
    DomainObject, ModelOptions, Session, SessionConfig, SessionError, SubsetBinding,
};
use porenet_model::model_fn;
use porenet_test_utils::{
    ConstantModel, CountingModel, DoubleIndexModel, FailingModel, ScaleModel, WarnCounter,
};
use proptest::prelude::*;

fn session_with(binding: SubsetBinding) -> Session {
    Session::new(SessionConfig {
        seed: Some(1),
        subset_binding: binding,
        ..Default::default()
    })
    .unwrap()
}

/// Network and phase with `np` pores and `nt` throats, plus one physics
/// object on `pores`.
fn setup(binding: SubsetBinding, np: usize, nt: usize, pores: &[usize]) -> (Session, NetworkId, PhaseId, PhysicsId) {
    let mut s = session_with(binding);
    let net = s.add_network(Some("net"), np, nt).unwrap();
    let ph = s.add_phase(net, Some("water")).unwrap();
    let phys = s.add_physics(net, ph, pores, &[], Some("phys")).unwrap();
    (s, net, ph, phys)
}

fn floats(s: &Session, phys: PhysicsId, key: &str) -> Vec<f64> {
    s.physics(phys)
        .unwrap()
        .store()
        .get(key)
        .unwrap()
        .as_float()
        .unwrap()
        .to_vec()
}

#[test]
fn doubled_indices_survive_regeneration() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 5, 0, &[0, 1, 2]);
    let double = model_fn("double", |ctx| {
        Ok(Array::Int(ctx.pores().iter().map(|&p| 2 * p as i64).collect()))
    });
    s.add_model(phys, "pore.double", double, ModelOptions::new())
        .unwrap();
    let expected = Array::Int(vec![0, 2, 4]);
    assert_eq!(s.physics(phys).unwrap().store().get("pore.double").unwrap(), &expected);

    let report = s.regenerate(phys, "").unwrap();
    assert_eq!(report.regenerated, vec![PropKey::parse("pore.double").unwrap()]);
    assert!(report.skipped.is_empty());
    assert_eq!(s.physics(phys).unwrap().store().get("pore.double").unwrap(), &expected);
}

#[test]
fn unknown_property_warns_once_and_changes_nothing() {
    let (mut s, _, ph, phys) = setup(SubsetBinding::Captured, 4, 0, &[0, 1]);
    s.add_model(phys, "pore.value", CountingModel::new(), ModelOptions::new())
        .unwrap();
    let before = floats(&s, phys, "pore.value");
    let phase_keys = s.phase(ph).unwrap().store().len();

    let counter = WarnCounter::new();
    let report = tracing::subscriber::with_default(counter.clone(), || {
        s.regenerate(phys, "nonexistent_prop")
    })
    .unwrap();

    assert_eq!(counter.count(), 1);
    assert!(report.regenerated.is_empty());
    assert_eq!(report.skipped, vec!["nonexistent_prop".to_string()]);
    assert_eq!(floats(&s, phys, "pore.value"), before);
    assert_eq!(s.phase(ph).unwrap().store().len(), phase_keys);
}

#[test]
fn each_skipped_name_warns() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 3, 0, &[0]);
    let counting = CountingModel::new();
    s.add_model(phys, "pore.a", counting.clone(), ModelOptions::new())
        .unwrap();
    s.add_model(phys, "pore.frozen", ConstantModel::new(1.0), ModelOptions::new().frozen())
        .unwrap();

    let counter = WarnCounter::new();
    let report = tracing::subscriber::with_default(counter.clone(), || {
        s.regenerate(phys, ["pore.missing", "pore.a", "pore.frozen", "not a key"])
    })
    .unwrap();

    assert_eq!(counter.count(), 3);
    assert_eq!(report.regenerated, vec![PropKey::parse("pore.a").unwrap()]);
    assert_eq!(report.skipped, vec!["pore.missing", "pore.frozen", "not a key"]);
    assert_eq!(counting.calls(), 2);
}

#[test]
fn static_model_is_never_reevaluated() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 3, 0, &[0, 1, 2]);
    let frozen = CountingModel::new();
    let dynamic = CountingModel::new();
    s.add_model(phys, "pore.x", frozen.clone(), ModelOptions::new().frozen())
        .unwrap();
    s.add_model(phys, "pore.y", dynamic.clone(), ModelOptions::new())
        .unwrap();
    assert_eq!(floats(&s, phys, "pore.x"), vec![1.0; 3]);

    s.regenerate(phys, "").unwrap();
    s.regenerate(phys, "").unwrap();

    assert_eq!(floats(&s, phys, "pore.x"), vec![1.0; 3]);
    assert_eq!(frozen.calls(), 1);
    assert_eq!(floats(&s, phys, "pore.y"), vec![3.0; 3]);
    assert_eq!(dynamic.calls(), 3);
}

#[test]
fn selective_regeneration_runs_only_named_models() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 2, 0, &[0, 1]);
    let a = CountingModel::new();
    let b = CountingModel::new();
    s.add_model(phys, "pore.a", a.clone(), ModelOptions::new()).unwrap();
    s.add_model(phys, "pore.b", b.clone(), ModelOptions::new()).unwrap();

    let report = s.regenerate(phys, "pore.b").unwrap();
    assert_eq!(report.regenerated, vec![PropKey::parse("pore.b").unwrap()]);
    assert_eq!((a.calls(), b.calls()), (1, 2));

    let report = s.regenerate(phys, ["pore.b", "pore.a"]).unwrap();
    assert_eq!(
        report.regenerated,
        vec![PropKey::parse("pore.b").unwrap(), PropKey::parse("pore.a").unwrap()]
    );
    assert_eq!((a.calls(), b.calls()), (2, 3));
}

#[test]
fn regeneration_reads_current_phase_data() {
    let (mut s, _, ph, phys) = setup(SubsetBinding::Captured, 4, 0, &[1, 3]);
    s.phase_mut(ph)
        .unwrap()
        .store_mut()
        .set("pore.temperature", vec![300.0, 310.0, 320.0, 330.0])
        .unwrap();
    let options = ModelOptions::new()
        .with_param("source", "pore.temperature")
        .with_param("factor", 2.0);
    s.add_model(phys, "pore.scaled", ScaleModel, options).unwrap();
    assert_eq!(floats(&s, phys, "pore.scaled"), vec![620.0, 660.0]);

    s.phase_mut(ph)
        .unwrap()
        .store_mut()
        .set("pore.temperature", vec![0.0, 1.0, 2.0, 3.0])
        .unwrap();
    s.regenerate(phys, "").unwrap();
    assert_eq!(floats(&s, phys, "pore.scaled"), vec![2.0, 6.0]);
}

#[test]
fn captured_subsets_ignore_label_edits() {
    let (mut s, _, ph, phys) = setup(SubsetBinding::Captured, 5, 0, &[0, 1]);
    s.add_model(phys, "pore.double", DoubleIndexModel, ModelOptions::new())
        .unwrap();
    s.phase_mut(ph)
        .unwrap()
        .store_mut()
        .set_label("pore.phys", &[2, 3])
        .unwrap();

    s.regenerate(phys, "").unwrap();
    assert_eq!(floats(&s, phys, "pore.double"), vec![0.0, 2.0]);
    assert_eq!(s.physics_pores(phys).unwrap(), vec![2, 3]);
}

#[test]
fn live_subsets_follow_label_edits() {
    let (mut s, _, ph, phys) = setup(SubsetBinding::Live, 5, 0, &[0, 1]);
    s.add_model(phys, "pore.double", DoubleIndexModel, ModelOptions::new())
        .unwrap();
    s.phase_mut(ph)
        .unwrap()
        .store_mut()
        .set_label("pore.phys", &[2, 3])
        .unwrap();

    s.regenerate(phys, "").unwrap();
    assert_eq!(floats(&s, phys, "pore.double"), vec![4.0, 6.0]);
}

#[test]
fn live_subset_of_new_size_is_a_shape_mismatch() {
    let (mut s, _, ph, phys) = setup(SubsetBinding::Live, 5, 0, &[0, 1]);
    s.add_model(phys, "pore.double", DoubleIndexModel, ModelOptions::new())
        .unwrap();
    s.phase_mut(ph)
        .unwrap()
        .store_mut()
        .set_label("pore.phys", &[0, 1, 2])
        .unwrap();

    assert_eq!(
        s.regenerate(phys, ""),
        Err(SessionError::Store(StoreError::ShapeMismatch {
            key: "pore.double".into(),
            expected: 2,
            actual: 3,
        }))
    );
    assert_eq!(floats(&s, phys, "pore.double"), vec![0.0, 2.0]);
}

#[test]
fn failing_model_is_not_registered() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 3, 0, &[0]);
    let err = s
        .add_model(phys, "pore.bad", FailingModel::new(0), ModelOptions::new())
        .unwrap_err();
    match err {
        SessionError::ModelFailed { propname, model, reason } => {
            assert_eq!(propname, "pore.bad");
            assert_eq!(model, "failing");
            assert!(matches!(reason, ModelError::ExecutionFailed { .. }));
        }
        other => panic!("expected ModelFailed, got {other:?}"),
    }
    assert!(!s.physics(phys).unwrap().store().contains("pore.bad"));
    assert!(s.models(phys).unwrap().is_empty());
}

#[test]
fn failing_regeneration_keeps_previous_value() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 3, 0, &[0, 2]);
    s.add_model(phys, "pore.flaky", FailingModel::new(1), ModelOptions::new())
        .unwrap();
    assert_eq!(floats(&s, phys, "pore.flaky"), vec![0.0, 0.0]);
    assert!(matches!(
        s.regenerate(phys, ""),
        Err(SessionError::ModelFailed { .. })
    ));
    assert_eq!(floats(&s, phys, "pore.flaky"), vec![0.0, 0.0]);
}

#[test]
fn wrong_length_output_is_rejected() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 4, 0, &[0, 1]);
    let everywhere = model_fn("everywhere", |ctx| {
        Ok(Array::Float(vec![0.0; ctx.phase().store().num_pores()]))
    });
    assert_eq!(
        s.add_model(phys, "pore.wide", everywhere, ModelOptions::new()),
        Err(SessionError::Store(StoreError::ShapeMismatch {
            key: "pore.wide".into(),
            expected: 2,
            actual: 4,
        }))
    );
}

#[test]
fn missing_parameter_surfaces_as_model_failure() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 2, 0, &[0]);
    let err = s
        .add_model(phys, "pore.scaled", ScaleModel, ModelOptions::new())
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::ModelFailed {
            reason: ModelError::MissingParam { .. },
            ..
        }
    ));
}

#[test]
fn malformed_property_name_rejected() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 2, 0, &[0]);
    assert!(matches!(
        s.add_model(phys, "volume", ConstantModel::new(1.0), ModelOptions::new()),
        Err(SessionError::Store(StoreError::InvalidKey { .. }))
    ));
    assert!(matches!(
        s.add_model(phys, "pore.all", ConstantModel::new(1.0), ModelOptions::new()),
        Err(SessionError::Store(StoreError::ReservedKey { .. }))
    ));
}

#[test]
fn throat_models_see_throat_subset() {
    let mut s = session_with(SubsetBinding::Captured);
    let net = s.add_network(Some("net"), 2, 6).unwrap();
    let ph = s.add_phase(net, Some("water")).unwrap();
    let phys = s.add_physics(net, ph, &[0], &[5, 1], Some("phys")).unwrap();
    s.add_model(phys, "throat.double", DoubleIndexModel, ModelOptions::new())
        .unwrap();
    assert_eq!(floats(&s, phys, "throat.double"), vec![2.0, 10.0]);
}

#[test]
fn models_listing_reports_registry_order() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 2, 0, &[0, 1]);
    s.add_model(phys, "pore.b", ConstantModel::new(0.0), ModelOptions::new())
        .unwrap();
    s.add_model(phys, "pore.a", ConstantModel::new(0.0), ModelOptions::new().frozen())
        .unwrap();
    s.add_model(phys, "pore.b", DoubleIndexModel, ModelOptions::new())
        .unwrap();

    let listing: Vec<(String, String, bool)> = s
        .models(phys)
        .unwrap()
        .into_iter()
        .map(|m| (m.key.to_string(), m.model, m.dynamic))
        .collect();
    assert_eq!(
        listing,
        vec![
            ("pore.b".to_string(), "double_index".to_string(), true),
            ("pore.a".to_string(), "constant".to_string(), false),
        ]
    );
}

#[test]
fn set_locations_moves_and_regenerates() {
    let (mut s, _, ph, phys) = setup(SubsetBinding::Captured, 6, 0, &[0, 1]);
    s.add_model(phys, "pore.double", DoubleIndexModel, ModelOptions::new())
        .unwrap();
    s.add_model(phys, "pore.snapshot", ConstantModel::new(9.0), ModelOptions::new().frozen())
        .unwrap();

    let report = s.set_locations(phys, &[5, 2, 3], &[]).unwrap();
    assert_eq!(report.regenerated, vec![PropKey::parse("pore.double").unwrap()]);

    assert_eq!(s.physics_pores(phys).unwrap(), vec![2, 3, 5]);
    assert_eq!(s.physics(phys).unwrap().num_pores(), 3);
    assert_eq!(floats(&s, phys, "pore.double"), vec![4.0, 6.0, 10.0]);
    assert!(!s.physics(phys).unwrap().store().contains("pore.snapshot"));
    assert_eq!(s.models(phys).unwrap().len(), 1);
    assert_eq!(
        s.phase(ph).unwrap().store().label_mask(ElementKind::Pore, "phys").unwrap(),
        &[false, false, true, true, false, true]
    );
}

#[test]
fn set_locations_out_of_bounds_changes_nothing() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 3, 0, &[0]);
    s.add_model(phys, "pore.double", DoubleIndexModel, ModelOptions::new())
        .unwrap();
    assert!(matches!(
        s.set_locations(phys, &[1, 7], &[]),
        Err(SessionError::InvalidSubset { index: 7, .. })
    ));
    assert_eq!(s.physics_pores(phys).unwrap(), vec![0]);
    assert_eq!(floats(&s, phys, "pore.double"), vec![0.0]);
}

#[test]
fn set_locations_failure_leaves_earlier_models_regenerated() {
    let (mut s, _, _, phys) = setup(SubsetBinding::Captured, 6, 0, &[0, 1]);
    s.add_model(phys, "pore.double", DoubleIndexModel, ModelOptions::new())
        .unwrap();
    s.add_model(phys, "pore.flaky", FailingModel::new(1), ModelOptions::new())
        .unwrap();
    s.add_model(phys, "pore.after", ConstantModel::new(5.0), ModelOptions::new())
        .unwrap();

    assert!(matches!(
        s.set_locations(phys, &[3, 4, 5], &[]),
        Err(SessionError::ModelFailed { ref propname, .. }) if propname == "pore.flaky"
    ));

    // Relocation itself is committed: labels, store size and bindings.
    assert_eq!(s.physics_pores(phys).unwrap(), vec![3, 4, 5]);
    let store = s.physics(phys).unwrap().store();
    assert_eq!(store.num_pores(), 3);
    assert!(!store.contains("pore.flaky"));
    assert!(!store.contains("pore.after"));
    assert_eq!(floats(&s, phys, "pore.double"), vec![6.0, 8.0, 10.0]);
    assert_eq!(s.models(phys).unwrap().len(), 3);

    // Models after the failure recover on a targeted regenerate.
    s.regenerate(phys, "pore.after").unwrap();
    assert_eq!(floats(&s, phys, "pore.after"), vec![5.0; 3]);
}

proptest! {
    #[test]
    fn pure_models_regenerate_identically(
        num_pores in 1usize..50,
        raw in prop::collection::vec(0usize..50, 1..30),
        scale in -10.0f64..10.0,
        rounds in 1usize..4,
    ) {
        let subset: Vec<usize> = raw.iter().map(|p| p % num_pores).collect();
        let (mut s, _, _, phys) = setup(SubsetBinding::Captured, num_pores, 0, &subset);
        let model = model_fn("affine", move |ctx| {
            Ok(Array::Float(ctx.pores().iter().map(|&p| scale * p as f64 + 0.1).collect()))
        });
        s.add_model(phys, "pore.affine", model, ModelOptions::new()).unwrap();
        let first: Vec<u64> = floats(&s, phys, "pore.affine").iter().map(|v| v.to_bits()).collect();
        for _ in 0..rounds {
            s.regenerate(phys, "").unwrap();
        }
        let again: Vec<u64> = floats(&s, phys, "pore.affine").iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(first, again);
    }
}
