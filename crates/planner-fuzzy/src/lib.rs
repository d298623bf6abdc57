//! # Planner Fuzzy
//!
//! Mamdani 模糊推論引擎：由需求、庫存、產能估計理想進口量

pub mod defuzz;
pub mod engine;
pub mod membership;
pub mod rules;
pub mod variable;

// Re-export 主要類型
pub use engine::FuzzyEngine;
pub use membership::MembershipFunction;
pub use rules::{Rule, RuleBase, STANDARD_RULES};
pub use variable::{FuzzyTerm, Level, LinguisticVariable};

/// 單次推論結果
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyInference {
    /// 解模糊後的進口量估計
    pub estimate: f64,

    /// 各輸出語言項（Low / Medium / High）的聚合啟動度
    pub activations: [f64; 3],

    /// 輸入截斷警告
    pub warnings: Vec<InputWarning>,
}

/// 輸入超出論域的警告（隸屬度在論域邊界飽和）
#[derive(Debug, Clone, PartialEq)]
pub struct InputWarning {
    pub variable: String,
    pub value: f64,
    pub clamped_to: f64,
}

impl std::fmt::Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} 超出論域，以 {} 計算",
            self.variable, self.value, self.clamped_to
        )
    }
}
