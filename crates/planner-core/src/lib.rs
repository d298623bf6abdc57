//! # Planner Core
//!
//! 進口規劃的核心資料模型與類型定義

pub mod config;
pub mod observation;
pub mod plan;

// Re-export 主要類型
pub use config::{validate_costs, OverflowPolicy, PlanningConfig, DEFAULT_ACTION_WINDOW};
pub use observation::MonthlyObservation;
pub use plan::{ImportPlan, PeriodRecord, PlanKpis};

/// 規劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("計劃時界為空：至少需要一個期間")]
    EmptyHorizon,

    #[error("時界長度不一致：需求 {demand} 期，模糊估計 {estimates} 期")]
    HorizonMismatch { demand: usize, estimates: usize },

    #[error("成本參數不可為負: {name} = {value}")]
    NegativeCost {
        name: &'static str,
        value: rust_decimal::Decimal,
    },

    #[error("初始庫存 {initial_stock} 超出範圍 [0, {max_stock}]")]
    InitialStockOutOfRange { initial_stock: u32, max_stock: u32 },

    #[error("第 {period} 期的模糊估計無效: {value}")]
    InvalidEstimate { period: usize, value: f64 },

    #[error("輸入變數 {variable} 的值無效: {value}")]
    InvalidInput { variable: String, value: f64 },

    #[error("隸屬函數參數無效: {0}")]
    InvalidMembership(String),

    #[error("規則庫不完整: {0}")]
    IncompleteRuleBase(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("沒有任何規則被觸發 (需求={demand}, 庫存={stock}, 產能={capacity})")]
    NoRuleFired {
        demand: f64,
        stock: f64,
        capacity: f64,
    },

    #[error("第 {period} 期庫存 {stock} 沒有可行的進口量")]
    InfeasibleState { period: usize, stock: u32 },

    #[error("價值表與前向模擬成本不一致: 價值表 {value}, 模擬 {replayed}")]
    ReplayMismatch {
        value: rust_decimal::Decimal,
        replayed: rust_decimal::Decimal,
    },

    #[error("配置解析錯誤: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
