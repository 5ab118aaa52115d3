use chart_axis::api::{AutoMarginCoordinator, AxisSide, ThicknessReport};
use chart_axis::core::AxisThickness;
use proptest::prelude::*;

fn side_strategy() -> impl Strategy<Value = AxisSide> {
    prop::sample::select(AxisSide::ALL.to_vec())
}

proptest! {
    #[test]
    fn side_extent_is_the_running_maximum(
        reports in prop::collection::vec(0.0f64..500.0, 1..64),
        side in side_strategy(),
    ) {
        let mut coordinator = AutoMarginCoordinator::default();
        let mut running_max = 0.0_f64;

        for report in reports {
            let before = coordinator.side_extent(side);
            let grew = coordinator.report(side, ThicknessReport::Scalar(report));
            let after = coordinator.side_extent(side);

            running_max = running_max.max(report);
            prop_assert!(after >= before);
            prop_assert_eq!(grew, after > before);
            prop_assert_eq!(after, running_max);
        }
    }

    #[test]
    fn margins_never_shrink_under_mixed_reports(
        reports in prop::collection::vec(
            (side_strategy(), 0.0f64..300.0, 0.0f64..300.0),
            1..64,
        ),
    ) {
        let mut coordinator = AutoMarginCoordinator::default();
        let mut previous = coordinator.margins();

        for (side, width, height) in reports {
            coordinator.report(
                side,
                ThicknessReport::Dimensions(AxisThickness::new(width, height)),
            );
            let margins = coordinator.margins();
            prop_assert!(margins.left >= previous.left);
            prop_assert!(margins.right >= previous.right);
            prop_assert!(margins.top >= previous.top);
            prop_assert!(margins.bottom >= previous.bottom);
            previous = margins;
        }
    }
}
