//! # Planner Calculation Pipeline
//!
//! 觀測序列 → 模糊估計 → DP 最佳進口計劃

pub mod calculator;

// Re-export 主要類型
pub use calculator::ImportPlanner;

use planner_core::{ImportPlan, PlanKpis};
use planner_fuzzy::FuzzyInference;

/// 規劃計算結果
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// 每期模糊推論結果
    pub estimates: Vec<FuzzyInference>,

    /// DP 最佳進口計劃
    pub plan: ImportPlan,

    /// 計劃績效指標
    pub kpis: PlanKpis,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanResult {
    /// 模糊估計序列
    pub fn fuzzy_estimates(&self) -> Vec<f64> {
        self.estimates.iter().map(|e| e.estimate).collect()
    }

    /// 是否有指定嚴重度以上的警告
    pub fn has_warnings_at_least(&self, severity: WarningSeverity) -> bool {
        self.warnings.iter().any(|w| w.severity >= severity)
    }
}

/// 規劃警告
#[derive(Debug, Clone, PartialEq)]
pub struct PlanWarning {
    /// 期間序號（從 1 開始），整體警告為 None
    pub period: Option<usize>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(period: Option<usize>, message: String, severity: WarningSeverity) -> Self {
        Self {
            period,
            message,
            severity,
        }
    }

    pub fn info(period: Option<usize>, message: String) -> Self {
        Self::new(period, message, WarningSeverity::Info)
    }

    pub fn warning(period: Option<usize>, message: String) -> Self {
        Self::new(period, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    Info,
    Warning,
}
