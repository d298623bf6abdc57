//! 規則庫

use planner_core::{PlannerError, Result};
use serde::{Deserialize, Serialize};

use crate::variable::Level;

/// 模糊規則：IF 需求 AND 庫存 AND 產能 THEN 進口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub demand: Level,
    pub stock: Level,
    pub capacity: Level,
    pub import: Level,
}

impl Rule {
    pub const fn new(demand: Level, stock: Level, capacity: Level, import: Level) -> Self {
        Self {
            demand,
            stock,
            capacity,
            import,
        }
    }
}

use Level::{High as H, Low as L, Medium as M};

/// 參考系統的 27 條規則（庫存：Low = small，Medium = Moderate，High = Many）
pub const STANDARD_RULES: [Rule; 27] = [
    Rule::new(L, H, H, L),
    Rule::new(L, H, M, L),
    Rule::new(L, H, L, L),
    Rule::new(L, M, H, L),
    Rule::new(L, M, M, L),
    Rule::new(L, M, L, M),
    Rule::new(L, L, H, L),
    Rule::new(L, L, M, M),
    Rule::new(L, L, L, M),
    Rule::new(M, H, H, L),
    Rule::new(M, H, M, M),
    Rule::new(M, H, L, M),
    Rule::new(M, M, H, M),
    Rule::new(M, M, M, M),
    Rule::new(M, M, L, H),
    Rule::new(M, L, H, M),
    Rule::new(M, L, M, M),
    Rule::new(M, L, L, H),
    Rule::new(H, H, H, M),
    Rule::new(H, H, M, M),
    Rule::new(H, H, L, H),
    Rule::new(H, M, H, M),
    Rule::new(H, M, M, M),
    Rule::new(H, M, L, H),
    Rule::new(H, L, H, M),
    Rule::new(H, L, M, H),
    Rule::new(H, L, L, H),
];

/// 已驗證完整性的規則庫：每一種前件組合恰好一條規則
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// 創建規則庫，缺漏或重複的組合會被拒絕
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = [[[false; 3]; 3]; 3];

        for rule in &rules {
            let slot = &mut seen[rule.demand.index()][rule.stock.index()][rule.capacity.index()];
            if *slot {
                return Err(PlannerError::IncompleteRuleBase(format!(
                    "重複的前件組合: {:?}/{:?}/{:?}",
                    rule.demand, rule.stock, rule.capacity
                )));
            }
            *slot = true;
        }

        for demand in Level::ALL {
            for stock in Level::ALL {
                for capacity in Level::ALL {
                    if !seen[demand.index()][stock.index()][capacity.index()] {
                        return Err(PlannerError::IncompleteRuleBase(format!(
                            "缺少前件組合: {demand:?}/{stock:?}/{capacity:?}"
                        )));
                    }
                }
            }
        }

        Ok(Self { rules })
    }

    /// 參考系統規則庫
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 查詢某一前件組合的結論
    pub fn consequent(&self, demand: Level, stock: Level, capacity: Level) -> Option<Level> {
        self.rules
            .iter()
            .find(|r| r.demand == demand && r.stock == stock && r.capacity == capacity)
            .map(|r| r.import)
    }

    /// Mamdani 觸發與聚合：AND 取 min，同一結論的規則取 max
    pub fn activate(&self, demand: &[f64; 3], stock: &[f64; 3], capacity: &[f64; 3]) -> [f64; 3] {
        let mut activations = [0.0_f64; 3];
        for rule in &self.rules {
            let strength = demand[rule.demand.index()]
                .min(stock[rule.stock.index()])
                .min(capacity[rule.capacity.index()]);
            let slot = &mut activations[rule.import.index()];
            *slot = slot.max(strength);
        }
        activations
    }
}

impl Default for RuleBase {
    fn default() -> Self {
        Self::standard()
    }
}
