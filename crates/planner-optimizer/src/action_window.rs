//! 動作視窗：由模糊估計推得 DP 每期可選的進口量

use planner_core::DEFAULT_ACTION_WINDOW;
use serde::{Deserialize, Serialize};

/// 模糊估計附近的離散動作集合 {base − δ, base, base + δ}
///
/// 刻意只取三個候選值，而非窮舉所有可行進口量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionWindow {
    delta: u32,
}

impl ActionWindow {
    pub fn new(delta: u32) -> Self {
        Self { delta }
    }

    pub fn delta(&self) -> u32 {
        self.delta
    }

    /// 由小到大、不重複、非負的候選進口量
    ///
    /// 估計值以四捨六入五成雙取整；負值或非有限值視為 0。
    pub fn actions(&self, estimate: f64) -> Vec<u32> {
        let base = round_estimate(estimate);
        let mut actions = vec![
            base.saturating_sub(self.delta),
            base,
            base.saturating_add(self.delta),
        ];
        actions.dedup();
        actions
    }
}

impl Default for ActionWindow {
    fn default() -> Self {
        Self::new(DEFAULT_ACTION_WINDOW)
    }
}

/// 預設 δ = 50 的動作集合
pub fn action_space(estimate: f64) -> Vec<u32> {
    ActionWindow::default().actions(estimate)
}

fn round_estimate(estimate: f64) -> u32 {
    if !estimate.is_finite() || estimate <= 0.0 {
        return 0;
    }
    estimate.round_ties_even().min(f64::from(u32::MAX)) as u32
}
