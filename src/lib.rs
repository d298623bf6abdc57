//! # Import Planner
//!
//! 單一商品的月度進口規劃：模糊推論估計理想進口量，
//! 再以確定性有限時界動態規劃在容量限制下求最低成本計劃。

pub use planner_calc::{ImportPlanner, PlanResult, PlanWarning, WarningSeverity};
pub use planner_core::{
    ImportPlan, MonthlyObservation, OverflowPolicy, PeriodRecord, PlanKpis, PlannerError,
    PlanningConfig, Result,
};
pub use planner_fuzzy::{FuzzyEngine, FuzzyInference, InputWarning, Level, RuleBase};
pub use planner_optimizer::{action_space, solve_dp, ActionWindow, DpSolution, DpSolver};

/// 以參考系統的模糊引擎估計進口量
pub fn evaluate_fuzzy_import(demand: f64, stock: f64, capacity: f64) -> Result<f64> {
    FuzzyEngine::standard()?.evaluate(demand, stock, capacity)
}
