//! # Planner Optimizer
//!
//! 以模糊估計限制動作集合的確定性有限時界動態規劃

pub mod action_window;
pub mod dp;

// Re-export 主要類型
pub use action_window::{action_space, ActionWindow};
pub use dp::{solve_dp, DpSolution, DpSolver, StageTables, Transition};
