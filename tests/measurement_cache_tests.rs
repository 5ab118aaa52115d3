use approx::assert_relative_eq;
use chart_axis::api::{
    AxisOrientation, AxisRenderer, AxisStyle, StyleKey, ThicknessProtocol, ThicknessReport,
};
use chart_axis::core::LinearScale;
use chart_axis::render::{Color, RecordingSurface, estimate_text_width_px};

fn price_scale() -> LinearScale {
    LinearScale::new((0.0, 100.0), (300.0, 0.0)).expect("valid scale")
}

fn left_style(protocol: ThicknessProtocol) -> AxisStyle {
    AxisStyle::new(AxisOrientation::Left)
        .with_tick_values(vec![0.0, 50.0, 100.0])
        .with_thickness_protocol(protocol)
}

fn report_dimensions(report: Option<ThicknessReport>) -> (f64, f64) {
    match report {
        Some(ThicknessReport::Dimensions(thickness)) => (thickness.width, thickness.height),
        other => panic!("expected a dimensions report, got {other:?}"),
    }
}

#[test]
fn second_draw_with_same_style_measures_nothing() {
    let scale = price_scale();
    let mut renderer =
        AxisRenderer::new(left_style(ThicknessProtocol::Dimensions)).expect("valid style");
    let mut surface = RecordingSurface::new();

    let first = renderer.draw(&mut surface, &scale).expect("first draw");
    assert_eq!(surface.measure_calls(), 3);

    let second = renderer.draw(&mut surface, &scale).expect("second draw");
    assert_eq!(surface.measure_calls(), 3);
    assert_eq!(first.report, second.report);

    let stats = renderer
        .state()
        .labels()
        .current()
        .expect("cache built")
        .stats();
    assert_eq!((stats.hits, stats.misses, stats.size), (3, 3, 3));
    assert_eq!(renderer.state().draws(), 2);
}

#[test]
fn style_key_change_discards_previous_measurements() {
    let scale = price_scale();
    let mut renderer =
        AxisRenderer::new(left_style(ThicknessProtocol::Dimensions)).expect("valid style");
    let mut surface = RecordingSurface::new();
    renderer.draw(&mut surface, &scale).expect("first draw");
    let old_key = renderer
        .state()
        .labels()
        .style_key()
        .cloned()
        .expect("key recorded");

    let mut bigger = left_style(ThicknessProtocol::Dimensions);
    bigger.appearance.font_size = 20.0;
    renderer.set_style(bigger.clone()).expect("valid style");
    renderer.draw(&mut surface, &scale).expect("second draw");

    assert_eq!(surface.measure_calls(), 6);
    let labels = renderer.state().labels();
    assert_eq!(labels.invalidations(), 1);
    assert_ne!(labels.style_key(), Some(&old_key));
    assert_eq!(
        labels.style_key(),
        Some(&StyleKey::from_appearance(&bigger.appearance))
    );

    let cache = labels.current().expect("cache built");
    assert_eq!(cache.stats().misses, 3);
    for (text, extent) in cache.iter() {
        assert_relative_eq!(extent.width, estimate_text_width_px(text, 20.0) + 11.0);
        assert_relative_eq!(extent.height, 20.0);
    }
}

#[test]
fn fields_outside_the_style_key_keep_the_cache() {
    let scale = price_scale();
    let mut renderer =
        AxisRenderer::new(left_style(ThicknessProtocol::Dimensions)).expect("valid style");
    let mut surface = RecordingSurface::new();
    renderer.draw(&mut surface, &scale).expect("first draw");

    let mut restyled = left_style(ThicknessProtocol::Dimensions);
    restyled.appearance.stroke = Color::rgb(0.2, 0.4, 0.6);
    restyled.appearance.outer_tick_size = 4.0;
    restyled.appearance.transform = (60.0, 10.0);
    renderer.set_style(restyled).expect("valid style");
    renderer.draw(&mut surface, &scale).expect("second draw");

    assert_eq!(surface.measure_calls(), 3);
    assert_eq!(renderer.state().labels().invalidations(), 0);
}

#[test]
fn new_labels_grow_the_cache_within_one_style() {
    let scale = price_scale();
    let mut renderer =
        AxisRenderer::new(left_style(ThicknessProtocol::Dimensions)).expect("valid style");
    let mut surface = RecordingSurface::new();
    renderer.draw(&mut surface, &scale).expect("first draw");

    let shifted = left_style(ThicknessProtocol::Dimensions).with_tick_values(vec![50.0, 75.0]);
    renderer.set_style(shifted).expect("valid style");
    renderer.draw(&mut surface, &scale).expect("second draw");

    assert_eq!(surface.measure_calls(), 4);
    let cache = renderer.state().labels().current().expect("cache built");
    assert_eq!(cache.len(), 4);
    assert!(cache.contains("0"));
    assert!(cache.contains("75"));
}

#[test]
fn dimensions_report_pads_width_on_vertical_axes() {
    let scale = price_scale();
    let mut renderer =
        AxisRenderer::new(left_style(ThicknessProtocol::Dimensions)).expect("valid style");
    let output = renderer
        .draw(&mut RecordingSurface::new(), &scale)
        .expect("draw");

    let (width, height) = report_dimensions(output.report);
    assert_relative_eq!(width, estimate_text_width_px("100", 12.0) + 11.0);
    assert_relative_eq!(height, 12.0);
    assert_eq!(renderer.state().reported(), output.report);
}

#[test]
fn dimensions_report_pads_height_on_horizontal_axes() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0)).expect("valid scale");
    let style = AxisStyle::new(AxisOrientation::Bottom)
        .with_tick_values(vec![0.0, 50.0, 100.0])
        .with_thickness_protocol(ThicknessProtocol::Dimensions);
    let mut renderer = AxisRenderer::new(style).expect("valid style");
    let output = renderer
        .draw(&mut RecordingSurface::new(), &scale)
        .expect("draw");

    let (width, height) = report_dimensions(output.report);
    assert_relative_eq!(width, estimate_text_width_px("100", 12.0));
    assert_relative_eq!(height, 12.0 + 11.0);
}

#[test]
fn legacy_scalar_reports_widest_label_on_vertical_axes() {
    let scale = price_scale();
    let mut renderer =
        AxisRenderer::new(left_style(ThicknessProtocol::LegacyScalar)).expect("valid style");
    let mut surface = RecordingSurface::new();
    let output = renderer.draw(&mut surface, &scale).expect("draw");

    match output.report {
        Some(ThicknessReport::Scalar(width)) => {
            assert_relative_eq!(width, estimate_text_width_px("100", 12.0) + 11.0);
        }
        other => panic!("expected a scalar report, got {other:?}"),
    }
    assert_eq!(surface.measure_calls(), 3);
}

#[test]
fn legacy_scalar_horizontal_axes_report_without_measuring() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0)).expect("valid scale");
    let style = AxisStyle::new(AxisOrientation::Top)
        .with_thickness_protocol(ThicknessProtocol::LegacyScalar);
    let mut renderer = AxisRenderer::new(style).expect("valid style");
    let mut surface = RecordingSurface::new();
    let output = renderer.draw(&mut surface, &scale).expect("draw");

    assert_eq!(output.report, Some(ThicknessReport::Scalar(23.0)));
    assert_eq!(surface.measure_calls(), 0);
}

#[test]
fn no_protocol_means_no_measurement_and_no_report() {
    let scale = price_scale();
    let mut renderer =
        AxisRenderer::new(left_style(ThicknessProtocol::None)).expect("valid style");
    let mut surface = RecordingSurface::new();
    let output = renderer.draw(&mut surface, &scale).expect("draw");

    assert!(output.report.is_none());
    assert_eq!(surface.measure_calls(), 0);
    assert!(renderer.state().labels().current().map_or(true, |cache| cache.is_empty()));
}
