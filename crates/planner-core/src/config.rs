//! 規劃配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlannerError, Result};

/// 預設動作視窗寬度（模糊估計上下各 50 單位）
pub const DEFAULT_ACTION_WINDOW: u32 = 50;

/// 超出倉庫容量時的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// 截斷至最大庫存，超出部分直接捨棄（參考系統行為）
    Clip,

    /// 會超出容量的進口量視為不可行
    Reject,

    /// 截斷至最大庫存，並對捨棄的每單位收取罰金
    Penalize { unit_cost: Decimal },
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::Clip
    }
}

/// 進口規劃參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 單位持有成本（每期期末庫存）
    pub holding_cost: Decimal,

    /// 單位進口成本
    pub import_cost: Decimal,

    /// 倉庫最大容量
    pub max_stock: u32,

    /// 初始庫存（未設定時由第一期觀測值推得）
    pub initial_stock: Option<u32>,

    /// 動作視窗寬度 δ
    pub action_window: u32,

    /// 超出容量的處理策略
    pub overflow_policy: OverflowPolicy,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            holding_cost: Decimal::from(2),
            import_cost: Decimal::from(5),
            max_stock: 500,
            initial_stock: None,
            action_window: DEFAULT_ACTION_WINDOW,
            overflow_policy: OverflowPolicy::Clip,
        }
    }
}

impl PlanningConfig {
    /// 創建新的規劃配置
    pub fn new(holding_cost: Decimal, import_cost: Decimal, max_stock: u32) -> Self {
        Self {
            holding_cost,
            import_cost,
            max_stock,
            ..Self::default()
        }
    }

    /// 從 JSON 文件載入配置，缺少的欄位使用預設值
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置初始庫存
    pub fn with_initial_stock(mut self, stock: u32) -> Self {
        self.initial_stock = Some(stock);
        self
    }

    /// 建構器模式：設置動作視窗寬度
    pub fn with_action_window(mut self, delta: u32) -> Self {
        self.action_window = delta;
        self
    }

    /// 建構器模式：設置超出容量策略
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// 檢查配置是否合法
    ///
    /// 負成本、負罰金、以及超出 `[0, max_stock]` 的初始庫存都會被拒絕。
    pub fn validate(&self) -> Result<()> {
        validate_costs(self.holding_cost, self.import_cost, self.overflow_policy)?;

        if let Some(initial_stock) = self.initial_stock {
            if initial_stock > self.max_stock {
                return Err(PlannerError::InitialStockOutOfRange {
                    initial_stock,
                    max_stock: self.max_stock,
                });
            }
        }

        Ok(())
    }

    /// 取得初始庫存；未設定時使用觀測值（捨去小數並截斷至容量範圍）
    pub fn resolve_initial_stock(&self, observed_stock: f64) -> u32 {
        match self.initial_stock {
            Some(stock) => stock,
            None if observed_stock.is_finite() => {
                observed_stock.trunc().clamp(0.0, f64::from(self.max_stock)) as u32
            }
            None => 0,
        }
    }
}

/// 成本與罰金不得為負（零為合法值）
pub fn validate_costs(
    holding_cost: Decimal,
    import_cost: Decimal,
    overflow_policy: OverflowPolicy,
) -> Result<()> {
    let mut costs = vec![("holding_cost", holding_cost), ("import_cost", import_cost)];
    if let OverflowPolicy::Penalize { unit_cost } = overflow_policy {
        costs.push(("overflow_penalty", unit_cost));
    }

    match costs.into_iter().find(|(_, value)| *value < Decimal::ZERO) {
        Some((name, value)) => Err(PlannerError::NegativeCost { name, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = PlanningConfig::default();

        assert_eq!(config.holding_cost, Decimal::from(2));
        assert_eq!(config.import_cost, Decimal::from(5));
        assert_eq!(config.max_stock, 500);
        assert_eq!(config.action_window, DEFAULT_ACTION_WINDOW);
        assert_eq!(config.overflow_policy, OverflowPolicy::Clip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PlanningConfig::new(Decimal::from(3), Decimal::from(7), 300)
            .with_initial_stock(120)
            .with_action_window(25)
            .with_overflow_policy(OverflowPolicy::Reject);

        assert_eq!(config.initial_stock, Some(120));
        assert_eq!(config.action_window, 25);
        assert_eq!(config.overflow_policy, OverflowPolicy::Reject);
    }

    #[test]
    fn test_negative_costs_rejected() {
        let config = PlanningConfig::new(Decimal::from(-1), Decimal::from(5), 100);
        assert!(matches!(
            config.validate(),
            Err(PlannerError::NegativeCost { name: "holding_cost", .. })
        ));

        let config = PlanningConfig::new(Decimal::from(1), Decimal::from(-5), 100);
        assert!(matches!(
            config.validate(),
            Err(PlannerError::NegativeCost { name: "import_cost", .. })
        ));

        let config = PlanningConfig::default().with_overflow_policy(OverflowPolicy::Penalize {
            unit_cost: Decimal::from(-2),
        });
        assert!(matches!(
            config.validate(),
            Err(PlannerError::NegativeCost { name: "overflow_penalty", .. })
        ));
    }

    #[test]
    fn test_validate_costs() {
        let zero_penalty = OverflowPolicy::Penalize {
            unit_cost: Decimal::ZERO,
        };
        assert!(validate_costs(Decimal::ZERO, Decimal::ZERO, zero_penalty).is_ok());
        assert!(validate_costs(-Decimal::ZERO, Decimal::ONE, OverflowPolicy::Clip).is_ok());

        assert!(matches!(
            validate_costs(Decimal::new(-1, 2), Decimal::ONE, OverflowPolicy::Clip),
            Err(PlannerError::NegativeCost { name: "holding_cost", .. })
        ));
        // 非罰金策略不檢查罰金
        assert!(validate_costs(Decimal::ONE, Decimal::ONE, OverflowPolicy::Reject).is_ok());
    }

    #[test]
    fn test_zero_costs_are_valid() {
        let config = PlanningConfig::new(Decimal::ZERO, Decimal::ZERO, 0).with_initial_stock(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_stock_out_of_range() {
        let config = PlanningConfig::new(Decimal::ONE, Decimal::ONE, 100).with_initial_stock(101);
        assert!(matches!(
            config.validate(),
            Err(PlannerError::InitialStockOutOfRange {
                initial_stock: 101,
                max_stock: 100
            })
        ));
    }

    #[rstest]
    #[case(None, 152.4, 152)]
    #[case(None, 152.6, 152)]
    #[case(None, 152.999, 152)]
    #[case(None, -0.7, 0)]
    #[case(None, -10.0, 0)]
    #[case(None, 900.0, 500)]
    #[case(None, f64::NAN, 0)]
    #[case(Some(42), 152.4, 42)]
    fn test_resolve_initial_stock(
        #[case] configured: Option<u32>,
        #[case] observed: f64,
        #[case] expected: u32,
    ) {
        let mut config = PlanningConfig::default();
        config.initial_stock = configured;
        assert_eq!(config.resolve_initial_stock(observed), expected);
    }

    #[test]
    fn test_from_json_with_defaults() {
        let config = PlanningConfig::from_json(
            r#"{ "holding_cost": "1.5", "max_stock": 400, "initial_stock": 100 }"#,
        )
        .unwrap();

        assert_eq!(config.holding_cost, Decimal::new(15, 1));
        assert_eq!(config.import_cost, Decimal::from(5));
        assert_eq!(config.max_stock, 400);
        assert_eq!(config.initial_stock, Some(100));
        assert_eq!(config.overflow_policy, OverflowPolicy::Clip);
    }

    #[test]
    fn test_from_json_penalize_policy() {
        let config = PlanningConfig::from_json(
            r#"{ "overflow_policy": { "Penalize": { "unit_cost": "4" } } }"#,
        )
        .unwrap();

        assert_eq!(
            config.overflow_policy,
            OverflowPolicy::Penalize {
                unit_cost: Decimal::from(4)
            }
        );
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            PlanningConfig::from_json("{ not json"),
            Err(PlannerError::ConfigParse(_))
        ));
        assert!(matches!(
            PlanningConfig::from_json(r#"{ "max_stock": 10, "initial_stock": 20 }"#),
            Err(PlannerError::InitialStockOutOfRange { .. })
        ));
    }
}
