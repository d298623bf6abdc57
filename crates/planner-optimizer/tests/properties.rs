//! 動作視窗與 DP 求解器的性質測試

use planner_optimizer::{action_space, ActionWindow, DpSolver};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// 小規模問題：(需求, 模糊估計, 容量, 初始庫存, 持有成本, 進口成本)
fn arb_problem() -> impl Strategy<Value = (Vec<u32>, Vec<f64>, u32, u32, i64, i64)> {
    (1usize..=5, 0u32..=150)
        .prop_flat_map(|(horizon, max_stock)| {
            (
                prop::collection::vec(0u32..=200, horizon),
                prop::collection::vec(0.0f64..=300.0, horizon),
                Just(max_stock),
                0u32..=max_stock,
                0i64..=10,
                0i64..=10,
            )
        })
}

proptest! {
    #[test]
    fn prop_action_space_shape(estimate in -100.0f64..10_000.0, delta in 0u32..=200) {
        let actions = ActionWindow::new(delta).actions(estimate);
        prop_assert!(!actions.is_empty());
        prop_assert!(actions.len() <= 3);
        prop_assert!(actions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_default_window_contains_rounded_estimate(estimate in 0.0f64..10_000.0) {
        let actions = action_space(estimate);
        let base = estimate.round_ties_even() as u32;
        prop_assert!(actions.contains(&base));
        prop_assert_eq!(*actions.last().unwrap(), base + 50);
    }

    #[test]
    fn prop_solve_is_deterministic(
        (demand, estimates, max_stock, initial, holding, import) in arb_problem()
    ) {
        let solver = DpSolver::new(Decimal::from(holding), Decimal::from(import), max_stock);
        let first = solver.solve(&demand, &estimates, initial);
        let second = solver.solve(&demand, &estimates, initial);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.total_cost, b.total_cost);
                prop_assert_eq!(a.schedule, b.schedule);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "solve results differ between runs"),
        }
    }

    #[test]
    fn prop_total_cost_equals_replayed_sum(
        (demand, estimates, max_stock, initial, holding, import) in arb_problem()
    ) {
        let solver = DpSolver::new(Decimal::from(holding), Decimal::from(import), max_stock);
        if let Ok(solution) = solver.solve(&demand, &estimates, initial) {
            let replayed: Decimal = solution
                .schedule
                .iter()
                .map(|p| p.import_cost + p.holding_cost)
                .sum();
            prop_assert_eq!(solution.total_cost, replayed);

            for (period, estimate) in solution.schedule.iter().zip(&estimates) {
                prop_assert!(period.ending_stock <= max_stock);
                prop_assert!(action_space(*estimate).contains(&period.import));
                prop_assert!(period.starting_stock + period.import >= period.demand);
            }
        }
    }

    #[test]
    fn prop_zero_capacity_keeps_stock_empty(
        demand in prop::collection::vec(0u32..=200, 1..=4),
        offsets in prop::collection::vec(-60.0f64..=60.0, 4),
    ) {
        let estimates: Vec<f64> = demand
            .iter()
            .zip(&offsets)
            .map(|(&d, &o)| (f64::from(d) + o).max(0.0))
            .collect();
        let solver = DpSolver::new(Decimal::from(2), Decimal::from(5), 0);

        if let Ok(solution) = solver.solve(&demand, &estimates, 0) {
            for period in &solution.schedule {
                prop_assert_eq!(period.ending_stock, 0);
                prop_assert!(period.import >= period.demand);
            }
        }
    }
}
