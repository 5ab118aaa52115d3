use chart_axis::api::{AutoMarginCoordinator, AxisSide, DEFAULT_BASE_PADDING_PX, ThicknessReport};
use chart_axis::core::{AxisThickness, ChartMargins};

#[test]
fn margin_tracks_the_largest_report_and_never_shrinks() {
    let mut coordinator = AutoMarginCoordinator::default();
    let mut previous = coordinator.side_extent(AxisSide::Left);
    let mut grew = Vec::new();

    for width in [10.0, 15.0, 12.0, 15.0] {
        grew.push(coordinator.report(AxisSide::Left, ThicknessReport::Scalar(width)));
        let current = coordinator.side_extent(AxisSide::Left);
        assert!(current >= previous);
        previous = current;
    }

    assert_eq!(grew, vec![true, true, false, false]);
    assert_eq!(coordinator.side_extent(AxisSide::Left), 15.0);
    assert_eq!(coordinator.margins().left, 15.0 + DEFAULT_BASE_PADDING_PX);
    assert_eq!(coordinator.growth_events(), 2);
}

#[test]
fn scalar_reports_use_the_side_dimension() {
    let mut coordinator = AutoMarginCoordinator::new(0.0).expect("valid padding");
    coordinator.report(AxisSide::Bottom, ThicknessReport::Scalar(23.0));
    coordinator.report(AxisSide::Right, ThicknessReport::Scalar(41.0));

    assert_eq!(coordinator.thickness(AxisSide::Bottom), AxisThickness::new(0.0, 23.0));
    assert_eq!(coordinator.thickness(AxisSide::Right), AxisThickness::new(41.0, 0.0));
    assert_eq!(
        coordinator.margins(),
        ChartMargins {
            left: 0.0,
            right: 41.0,
            top: 0.0,
            bottom: 23.0,
        }
    );
}

#[test]
fn dimension_reports_grow_component_wise() {
    let mut coordinator = AutoMarginCoordinator::default();
    assert!(coordinator.report(
        AxisSide::Top,
        ThicknessReport::Dimensions(AxisThickness::new(40.0, 20.0))
    ));
    assert!(coordinator.report(
        AxisSide::Top,
        ThicknessReport::Dimensions(AxisThickness::new(10.0, 25.0))
    ));
    assert!(!coordinator.report(
        AxisSide::Top,
        ThicknessReport::Dimensions(AxisThickness::new(39.0, 24.0))
    ));
    assert_eq!(coordinator.thickness(AxisSide::Top), AxisThickness::new(40.0, 25.0));
    assert_eq!(coordinator.margins().top, 25.0 + DEFAULT_BASE_PADDING_PX);
}

#[test]
fn sides_accumulate_independently() {
    let mut coordinator = AutoMarginCoordinator::default();
    coordinator.report(AxisSide::Left, ThicknessReport::Scalar(30.0));
    for side in AxisSide::ALL {
        let expected = if side == AxisSide::Left { 30.0 } else { 0.0 };
        assert_eq!(coordinator.side_extent(side), expected);
    }
}

#[test]
fn reset_starts_a_new_sequence() {
    let mut coordinator = AutoMarginCoordinator::default();
    coordinator.report(AxisSide::Left, ThicknessReport::Scalar(30.0));
    coordinator.reset();
    assert_eq!(coordinator.side_extent(AxisSide::Left), 0.0);
    assert_eq!(coordinator.margins(), ChartMargins::uniform(DEFAULT_BASE_PADDING_PX));
    assert!(coordinator.report(AxisSide::Left, ThicknessReport::Scalar(5.0)));
}
