use chart_axis::api::{
    AxisOrientation, AxisRenderer, AxisStyle, COLLISION_MIN_SEPARATION_PX, RelaxationParams,
    collision_resolution_applies, relax_positions,
};
use chart_axis::core::LinearScale;
use chart_axis::render::RecordingSurface;

fn dense_bottom_style(values: Vec<f64>) -> AxisStyle {
    AxisStyle::new(AxisOrientation::Bottom)
        .with_tick_values(values)
        .with_flex_ticks(true)
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values
}

#[test]
fn dense_flexible_bottom_ticks_are_pushed_apart() {
    let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("valid scale");
    let values: Vec<f64> = (0..=10).map(f64::from).collect();
    let mut renderer = AxisRenderer::new(dense_bottom_style(values)).expect("valid style");
    let mut surface = RecordingSurface::new();

    let output = renderer.draw(&mut surface, &scale).expect("draw");
    let layout = output.layout.expect("ticks shown");
    assert!(output.moved_ticks > 0);

    for (index, tick) in layout.ticks.iter().enumerate() {
        assert_eq!(tick.x1, index as f64 * 10.0, "domain-line end stays on value");
        assert_eq!(tick.x2, tick.label_x);
    }
    let anchors = sorted(layout.ticks.iter().map(|tick| tick.label_x).collect());
    for pair in anchors.windows(2) {
        assert!(
            pair[1] - pair[0] >= COLLISION_MIN_SEPARATION_PX - 1e-6,
            "labels overlap: {pair:?}"
        );
    }

    let drawn = sorted(surface.frame().texts.iter().map(|text| text.x).collect());
    assert_eq!(drawn, anchors);
}

#[test]
fn well_separated_ticks_keep_their_geometry() {
    let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("valid scale");
    let mut renderer =
        AxisRenderer::new(dense_bottom_style(vec![0.0, 3.0, 6.0, 9.0])).expect("valid style");
    let mut surface = RecordingSurface::new();

    let output = renderer.draw(&mut surface, &scale).expect("draw");
    assert_eq!(output.moved_ticks, 0);
    for tick in output.layout.expect("ticks shown").ticks {
        assert_eq!(tick.x2, tick.x1);
        assert_eq!(tick.label_x, tick.x1);
    }
}

#[test]
fn resolution_requires_flexible_horizontal_ticks() {
    let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("valid scale");
    let values: Vec<f64> = (0..=10).map(f64::from).collect();

    let strict = AxisStyle::new(AxisOrientation::Bottom).with_tick_values(values.clone());
    assert!(!collision_resolution_applies(&strict.appearance));
    let mut renderer = AxisRenderer::new(strict).expect("valid style");
    let output = renderer
        .draw(&mut RecordingSurface::new(), &scale)
        .expect("draw");
    assert_eq!(output.moved_ticks, 0);

    let vertical = AxisStyle::new(AxisOrientation::Left)
        .with_tick_values(values)
        .with_flex_ticks(true);
    assert!(!collision_resolution_applies(&vertical.appearance));
    let mut renderer = AxisRenderer::new(vertical).expect("valid style");
    let output = renderer
        .draw(&mut RecordingSurface::new(), &scale)
        .expect("draw");
    assert_eq!(output.moved_ticks, 0);
}

#[test]
fn custom_separation_is_honored() {
    let params = RelaxationParams::default().with_min_separation_px(40.0);
    let settled = sorted(relax_positions(&[0.0, 10.0, 20.0, 30.0], params));
    for pair in settled.windows(2) {
        assert!(pair[1] - pair[0] >= 40.0 - 1e-6);
    }
}

#[test]
fn relaxation_is_deterministic() {
    let ideal = [5.0, 12.0, 14.0, 15.0, 60.0, 61.0];
    let params = RelaxationParams::default();
    assert_eq!(relax_positions(&ideal, params), relax_positions(&ideal, params));
}

#[test]
fn relaxation_keeps_a_dense_cluster_centered() {
    let ideal = [100.0, 105.0, 110.0];
    let settled = relax_positions(&ideal, RelaxationParams::default());
    let center = settled.iter().sum::<f64>() / 3.0;
    assert!((center - 105.0).abs() < 1e-6);
    assert!(settled[0] < settled[1] && settled[1] < settled[2]);
}

#[test]
fn invalid_relaxation_params_are_rejected_by_the_renderer() {
    let style = AxisStyle::new(AxisOrientation::Bottom);
    let renderer = AxisRenderer::new(style).expect("valid style");
    let params = RelaxationParams::default().with_min_separation_px(f64::NAN);
    assert!(renderer.with_relaxation(params).is_err());
}

#[test]
fn zero_iterations_still_enforce_separation() {
    let params = RelaxationParams::default().with_iterations(0);
    let settled = relax_positions(&[50.0, 50.0], params);
    assert!((settled[1] - settled[0]).abs() >= COLLISION_MIN_SEPARATION_PX - 1e-9);
}
