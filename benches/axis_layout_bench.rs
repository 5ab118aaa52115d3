use chart_axis::api::{
    AxisChart, AxisOrientation, AxisRenderer, AxisSide, AxisStyle, RelaxationParams,
    ThicknessProtocol, plan_tick_layout, relax_positions,
};
use chart_axis::core::{LinearScale, Viewport};
use chart_axis::render::{DrawingSurface, RecordingSurface};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_dense_collision_relaxation(c: &mut Criterion) {
    let ideal: Vec<f64> = (0..200).map(|i| f64::from(i) * 7.5).collect();
    let params = RelaxationParams::default();

    c.bench_function("collision_relaxation_200_dense", |b| {
        b.iter(|| {
            let _ = relax_positions(black_box(&ideal), params);
        })
    });
}

fn bench_tick_layout_plan(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (0.0, 1_920.0)).expect("valid scale");
    let values: Vec<f64> = (0..500).map(|i| f64::from(i) * 20.0).collect();
    let style = AxisStyle::new(AxisOrientation::Bottom);

    c.bench_function("tick_layout_plan_500", |b| {
        b.iter(|| {
            let _ = plan_tick_layout(black_box(&values), &scale, &style).expect("layout");
        })
    });
}

fn bench_cached_axis_draw(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 1_000.0), (1_000.0, 0.0)).expect("valid scale");
    let style = AxisStyle::new(AxisOrientation::Left)
        .with_tick_count(20)
        .with_thickness_protocol(ThicknessProtocol::Dimensions);
    let mut renderer = AxisRenderer::new(style).expect("valid style");
    let mut surface = RecordingSurface::new();

    c.bench_function("axis_draw_cached_measurements", |b| {
        b.iter(|| {
            let _ = renderer.draw(&mut surface, &scale).expect("draw");
            surface.clear().expect("clear");
        })
    });
}

fn bench_margin_convergence(c: &mut Criterion) {
    c.bench_function("margin_convergence_four_axes", |b| {
        b.iter(|| {
            let mut chart = AxisChart::new(
                Viewport::new(1_280, 720),
                (0.0, 5_000.0),
                (10_000.0, 90_000.0),
            )
            .expect("chart");
            for side in AxisSide::ALL {
                let style = AxisStyle::new(side.into())
                    .with_flex_ticks(side.is_horizontal())
                    .with_thickness_protocol(ThicknessProtocol::Dimensions);
                chart.set_axis(side, style).expect("axis");
            }
            let _ = chart
                .render_until_stable(&mut RecordingSurface::new(), 8)
                .expect("converge");
        })
    });
}

criterion_group!(
    benches,
    bench_dense_collision_relaxation,
    bench_tick_layout_plan,
    bench_cached_axis_draw,
    bench_margin_convergence
);
criterion_main!(benches);
