use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use ndarray::{Array2, ArrayD, IxDyn, array};
use serde_json::json;

use super::*;
use crate::config::MenuConfig;
use crate::host::{Viewer, ViewerHandle, ViewerRef};
use crate::model::{Argument, DataKind, LayerData, LayerId, LayerProps, SurfaceMesh};
use crate::registry::{EntryArgs, FunctionTarget};
use crate::runtime::ViewerState;

type Output = Result<Option<FunctionOutput>>;

fn shared(state: ViewerState) -> (Rc<RefCell<ViewerState>>, ViewerRef) {
    let state = state.into_shared();
    let handle: ViewerHandle = state.clone();
    let viewer = ViewerRef::new(&handle);
    (state, viewer)
}

fn image(shape: &[usize], fill: f32) -> LayerData {
    LayerData::Image(ArrayD::from_elem(IxDyn(shape), fill))
}

fn add(
    state: &Rc<RefCell<ViewerState>>,
    name: &str,
    data: LayerData,
    scale: Option<Vec<f64>>,
) -> LayerId {
    state.borrow_mut().add_layer(
        data,
        LayerProps {
            name: name.to_string(),
            scale,
            ..LayerProps::default()
        },
    )
}

fn form(spec: FunctionSpec, target: FunctionTarget, viewer: &ViewerRef) -> FunctionForm {
    FunctionForm::new(
        spec.name.clone(),
        Arc::new(spec),
        target,
        viewer.clone(),
        EntryArgs::new(),
        &MenuConfig::default(),
    )
}

fn invert_spec() -> FunctionSpec {
    FunctionSpec::new("invert")
        .param(ParamSpec::layer("image", DataKind::Image))
        .produces(DataKind::Image)
}

fn invert() -> FunctionTarget {
    Arc::new(|inputs: &FunctionInputs| -> Output {
        let image = inputs.image("image")?;
        Ok(Some(LayerData::Image(image.mapv(|value| 1.0 - value)).into()))
    })
}

#[test]
fn repeated_calls_update_one_result_layer() {
    let (state, viewer) = shared(ViewerState::new());
    add(&state, "input", image(&[4, 4], 0.25), None);
    let mut form = form(invert_spec(), invert(), &viewer);

    assert!(form.call().expect("first call").is_none());
    let first = form.last_layer().expect("result layer");
    assert!(form.call().expect("second call").is_none());
    assert_eq!(form.last_layer(), Some(first));

    let viewer = state.borrow();
    assert_eq!(viewer.layers().len(), 2);
    let result = viewer.layer(first).expect("layer");
    assert_eq!(result.name, "Result of invert");
    assert_eq!(result.origin, Some(form.id()));
}

#[test]
fn dismiss_control_can_be_disabled() {
    let (_state, viewer) = shared(ViewerState::new());
    let mut form = form(invert_spec(), invert(), &viewer);
    assert!(form.dismissable());
    form.disable_dismiss();
    assert!(!form.dismissable());
}

#[test]
fn form_changes_reach_the_existing_layer() {
    let (state, viewer) = shared(ViewerState::new());
    let bright = add(&state, "bright", image(&[2, 2], 1.0), None);
    let dark = add(&state, "dark", image(&[2, 2], 0.0), None);
    let mut form = form(invert_spec(), invert(), &viewer);
    assert_eq!(form.value("image"), Some(&Argument::Layer(bright)));

    form.call().expect("call");
    form.set("image", Argument::Layer(dark)).expect("set");
    form.call().expect("call");

    let viewer = state.borrow();
    assert_eq!(viewer.layers().len(), 3);
    let result = viewer.layer_by_name("Result of invert").expect("result");
    assert_eq!(result.data, image(&[2, 2], 1.0));
}

#[test]
fn deleted_result_layer_is_recreated() {
    let (state, viewer) = shared(ViewerState::new());
    add(&state, "input", image(&[2, 2], 0.5), None);
    let mut form = form(invert_spec(), invert(), &viewer);

    form.call().expect("call");
    let first = form.last_layer().expect("layer");
    state.borrow_mut().remove_layer(first);

    form.call().expect("call");
    let second = form.last_layer().expect("layer");
    assert_ne!(first, second);
    assert_eq!(state.borrow().layers().len(), 2);
}

#[test]
fn separate_forms_write_separate_layers() {
    let (state, viewer) = shared(ViewerState::new());
    add(&state, "input", image(&[2, 2], 0.5), None);
    let mut left = form(invert_spec(), invert(), &viewer);
    let mut right = form(invert_spec(), invert(), &viewer);

    left.call().expect("call");
    right.call().expect("call");
    assert_ne!(left.last_layer(), right.last_layer());
    assert_eq!(state.borrow().layers().len(), 3);
}

#[test]
fn plain_functions_pass_their_value_through() {
    let (state, viewer) = shared(ViewerState::new());
    let spec = FunctionSpec::new("double").param(ParamSpec::float("sigma", 0.5));
    let target: FunctionTarget = Arc::new(|inputs: &FunctionInputs| -> Output {
        Ok(Some(FunctionOutput::Value(json!(inputs.float("sigma")? * 2.0))))
    });
    let mut form = form(spec, target, &viewer);

    let output = form.call().expect("call");
    assert_eq!(output.and_then(|output| output.as_value().cloned()), Some(json!(1.0)));
    assert!(state.borrow().layers().is_empty());
}

#[test]
fn none_result_leaves_the_viewer_alone() {
    let (state, viewer) = shared(ViewerState::new());
    let spec = FunctionSpec::new("nothing").produces(DataKind::Labels);
    let target: FunctionTarget = Arc::new(|_inputs: &FunctionInputs| -> Output { Ok(None) });
    let mut form = form(spec, target, &viewer);

    assert!(form.call().expect("call").is_none());
    assert!(form.last_layer().is_none());
    assert!(state.borrow().layers().is_empty());
}

#[test]
fn undeclared_result_kind_is_rejected() {
    let (state, viewer) = shared(ViewerState::new());
    let spec = FunctionSpec::new("liar").produces(DataKind::Image);
    let target: FunctionTarget = Arc::new(
        |_inputs: &FunctionInputs| -> Output {
            Ok(Some(FunctionOutput::Value(json!(1))))
        },
    );
    let mut form = form(spec, target, &viewer);

    let error = form.call().expect_err("mismatch");
    assert!(matches!(
        error,
        FormError::ReturnMismatch { expected: DataKind::Image, .. }
    ));
    assert!(state.borrow().layers().is_empty());
}

#[test]
fn points_get_a_size_relative_to_the_display() {
    let (state, viewer) = shared(ViewerState::new());
    add(&state, "input", image(&[50, 200], 1.0), None);
    let spec = FunctionSpec::new("peaks")
        .param(ParamSpec::layer("image", DataKind::Image))
        .produces(DataKind::Points);
    let target: FunctionTarget = Arc::new(|_inputs: &FunctionInputs| -> Output {
        let points = Array2::from_shape_vec((1, 2), vec![10.0, 20.0])
            .map_err(|error| FormError::failed(error.to_string()))?;
        Ok(Some(LayerData::Points(points).into()))
    });
    let mut form = form(spec, target, &viewer);

    form.call().expect("call");
    let viewer = state.borrow();
    let points = viewer.layer_by_name("Result of peaks").expect("points");
    let size = points.point_size.expect("size");
    assert!((size - 2.0).abs() < 1e-9);
}

#[test]
fn result_scale_follows_a_same_kind_input() {
    let (state, viewer) = shared(ViewerState::new());
    add(&state, "input", image(&[3, 4, 5], 0.0), Some(vec![5.0, 2.0, 3.0]));
    let spec = FunctionSpec::new("project")
        .param(ParamSpec::layer("image", DataKind::Image))
        .produces(DataKind::Image);
    let target: FunctionTarget = Arc::new(|_inputs: &FunctionInputs| -> Output {
        Ok(Some(LayerData::Image(ArrayD::zeros(IxDyn(&[4, 5]))).into()))
    });
    let mut form = form(spec, target, &viewer);

    form.call().expect("call");
    let viewer = state.borrow();
    let result = viewer.layer_by_name("Result of project").expect("result");
    assert_eq!(result.scale, vec![2.0, 3.0]);
}

#[test]
fn workflow_tracker_sees_each_write() {
    let (state, viewer) = shared(ViewerState::new().with_workflow_tracking());
    let input = add(&state, "input", image(&[2, 2], 0.5), None);
    let mut form = form(invert_spec(), invert(), &viewer);

    form.call().expect("call");
    form.call().expect("call");
    let layer = form.last_layer().expect("layer");

    let viewer = state.borrow();
    let log = viewer.workflow().expect("log");
    assert_eq!(log.len(), 1);
    let step = log.step(layer).expect("step");
    assert_eq!(step.function, "invert");
    assert_eq!(step.sources(), vec![input]);
    assert_eq!(log.roots(), vec![input]);
}

#[test]
fn untracked_viewers_record_nothing() {
    let (state, viewer) = shared(ViewerState::new());
    add(&state, "input", image(&[2, 2], 0.5), None);
    form(invert_spec(), invert(), &viewer).call().expect("call");
    assert!(state.borrow().workflow().is_none());
}

#[test]
fn registration_arguments_override_defaults() {
    let (_state, viewer) = shared(ViewerState::new());
    let spec = Arc::new(
        FunctionSpec::new("smooth")
            .param(ParamSpec::float("sigma", 0.5))
            .param(ParamSpec::bool("fast", false)),
    );
    let target: FunctionTarget = Arc::new(|_inputs: &FunctionInputs| -> Output { Ok(None) });
    let form = FunctionForm::new(
        "Smooth",
        spec,
        target,
        viewer,
        EntryArgs::new().named("sigma", 2.0).named("fast", "not a bool"),
        &MenuConfig::default(),
    );
    assert_eq!(form.value("sigma"), Some(&Argument::Value(json!(2.0))));
    assert_eq!(form.value("fast"), Some(&Argument::Value(json!(false))));
    assert_eq!(form.options().named.len(), 2);
}

#[test]
fn invalid_inputs_are_reported_before_calling() {
    let (state, viewer) = shared(ViewerState::new());
    let mut empty = form(invert_spec(), invert(), &viewer);
    assert!(matches!(
        empty.call(),
        Err(FormError::MissingParameter(name)) if name == "image"
    ));

    let labels = add(
        &state,
        "labels",
        LayerData::Labels(ArrayD::zeros(IxDyn(&[2, 2]))),
        None,
    );
    empty.set("image", Argument::Layer(labels)).expect("set");
    assert!(matches!(empty.call(), Err(FormError::LayerKind { .. })));

    empty.set("image", Argument::Layer(LayerId(999))).expect("set");
    assert!(matches!(empty.call(), Err(FormError::MissingLayer(LayerId(999)))));

    assert!(matches!(
        empty.set("nope", Argument::Value(json!(1))),
        Err(FormError::UnknownParameter(_))
    ));
    assert!(matches!(
        empty.set_json("image", json!("first")),
        Err(FormError::InvalidParameter { .. })
    ));
}

#[test]
fn closed_viewer_fails_the_call() {
    let (state, viewer) = shared(ViewerState::new());
    add(&state, "input", image(&[2, 2], 0.5), None);
    let mut form = form(invert_spec(), invert(), &viewer);
    drop(state);
    assert!(matches!(form.call(), Err(FormError::Host(_))));
}

#[test]
fn scale_and_point_size_helpers() {
    assert_eq!(align_scale(&[1.0, 2.0, 3.0], 2), vec![2.0, 3.0]);
    assert_eq!(align_scale(&[2.0], 3), vec![1.0, 1.0, 2.0]);
    assert!((point_size(&[100.0, 300.0], &[5.0], 0.01) - 3.0).abs() < 1e-9);
    assert!((point_size(&[], &[40.0, 10.0], 0.5) - 20.0).abs() < 1e-9);
    assert_eq!(point_size(&[], &[], 0.01), DEFAULT_POINT_SIZE);
}

fn triangle(lift: f64) -> LayerData {
    let mesh = SurfaceMesh::new(
        array![[0.0, 0.0, lift], [0.0, 4.0, lift], [3.0, 0.0, lift]],
        array![[0, 1, 2]],
        None,
    )
    .expect("mesh");
    LayerData::Surface(mesh)
}

#[test]
fn surface_results_reuse_one_layer_without_point_size() {
    let (state, viewer) = shared(ViewerState::new());
    let spec = FunctionSpec::new("mesh")
        .param(ParamSpec::float("lift", 0.0))
        .produces(DataKind::Surface);
    let target: FunctionTarget = Arc::new(|inputs: &FunctionInputs| -> Output {
        Ok(Some(triangle(inputs.float("lift")?).into()))
    });
    let mut form = form(spec, target, &viewer);

    assert!(form.call().expect("first call").is_none());
    let first = form.last_layer().expect("result layer");
    form.set_json("lift", json!(2.5)).expect("set");
    assert!(form.call().expect("second call").is_none());
    assert_eq!(form.last_layer(), Some(first));

    let viewer = state.borrow();
    assert_eq!(viewer.layers().len(), 1);
    let result = viewer.layer(first).expect("layer");
    assert_eq!(result.name, "Result of mesh");
    assert_eq!(result.kind(), DataKind::Surface);
    assert_eq!(result.point_size, None);
    assert_eq!(result.data, triangle(2.5));
}

#[test]
fn surface_results_take_scale_from_surface_input() {
    let (state, viewer) = shared(ViewerState::new());
    add(&state, "reference", image(&[4, 4, 4], 0.0), Some(vec![7.0, 7.0, 7.0]));
    add(&state, "input", triangle(1.0), Some(vec![0.5, 2.0, 3.0]));
    let spec = FunctionSpec::new("flatten")
        .param(ParamSpec::layer("reference", DataKind::Image))
        .param(ParamSpec::layer("mesh", DataKind::Surface))
        .produces(DataKind::Surface);
    let target: FunctionTarget = Arc::new(|inputs: &FunctionInputs| -> Output {
        let mut mesh = inputs.surface("mesh")?.clone();
        mesh.vertices.column_mut(2).fill(0.0);
        Ok(Some(LayerData::Surface(mesh).into()))
    });
    let mut form = form(spec, target, &viewer);

    form.call().expect("call");
    let viewer = state.borrow();
    let result = viewer.layer_by_name("Result of flatten").expect("result");
    assert_eq!(result.scale, vec![0.5, 2.0, 3.0]);
    assert_eq!(result.data, triangle(0.0));
}
