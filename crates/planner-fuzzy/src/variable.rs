//! 語言變數

use planner_core::{PlannerError, Result};
use serde::{Deserialize, Serialize};

use crate::membership::MembershipFunction;

/// 語言項等級（每個變數皆分為三個有序等級）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// 由低到高的全部等級
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    /// 陣列索引
    pub const fn index(self) -> usize {
        match self {
            Level::Low => 0,
            Level::Medium => 1,
            Level::High => 2,
        }
    }
}

/// 模糊集合（語言項）
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyTerm {
    /// 顯示名稱
    pub label: String,

    /// 隸屬函數
    pub membership: MembershipFunction,
}

/// 語言變數：有界論域 + 三個重疊的語言項
///
/// 建構後不可變更。
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    min: f64,
    max: f64,
    terms: [FuzzyTerm; 3],
}

impl LinguisticVariable {
    /// 創建語言變數，`terms` 依 Low / Medium / High 順序
    pub fn new(
        name: impl Into<String>,
        min: f64,
        max: f64,
        terms: [(&str, MembershipFunction); 3],
    ) -> Result<Self> {
        let name = name.into();
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(PlannerError::InvalidMembership(format!(
                "變數 {name} 的論域無效: [{min}, {max}]"
            )));
        }

        let terms = terms.map(|(label, membership)| FuzzyTerm {
            label: label.to_string(),
            membership,
        });

        Ok(Self {
            name,
            min,
            max,
            terms,
        })
    }

    /// 市場需求 ∈ [200, 400]
    pub fn market_demand() -> Result<Self> {
        Self::new(
            "market_demand",
            200.0,
            400.0,
            [
                ("Low", MembershipFunction::triangular(200.0, 200.0, 300.0)?),
                ("Medium", MembershipFunction::triangular(200.0, 300.0, 400.0)?),
                ("High", MembershipFunction::triangular(300.0, 400.0, 400.0)?),
            ],
        )
    }

    /// 產品庫存 ∈ [100, 250]
    pub fn product_stock() -> Result<Self> {
        Self::new(
            "product_stock",
            100.0,
            250.0,
            [
                ("small", MembershipFunction::trapezoidal(75.0, 100.0, 130.0, 175.0)?),
                ("Moderate", MembershipFunction::triangular(130.0, 175.0, 220.0)?),
                ("Many", MembershipFunction::trapezoidal(175.0, 220.0, 250.0, 300.0)?),
            ],
        )
    }

    /// 生產產能 ∈ [0, 210]
    pub fn production_capacity() -> Result<Self> {
        Self::new(
            "production_capacity",
            0.0,
            210.0,
            [
                ("Low", MembershipFunction::trapezoidal(0.0, 0.0, 60.0, 100.0)?),
                ("Medium", MembershipFunction::trapezoidal(60.0, 100.0, 130.0, 170.0)?),
                ("High", MembershipFunction::trapezoidal(130.0, 170.0, 210.0, 210.0)?),
            ],
        )
    }

    /// 產品進口量 ∈ [30, 400]（輸出變數）
    pub fn product_import() -> Result<Self> {
        Self::new(
            "product_import",
            30.0,
            400.0,
            [
                ("Low", MembershipFunction::trapezoidal(30.0, 30.0, 90.0, 200.0)?),
                ("Medium", MembershipFunction::trapezoidal(90.0, 200.0, 250.0, 350.0)?),
                ("High", MembershipFunction::trapezoidal(250.0, 350.0, 400.0, 400.0)?),
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 論域 [min, max]
    pub fn universe(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn term(&self, level: Level) -> &FuzzyTerm {
        &self.terms[level.index()]
    }

    pub fn terms(&self) -> &[FuzzyTerm; 3] {
        &self.terms
    }

    /// 截斷至論域；回傳截斷後的值與是否發生截斷
    pub fn clamp(&self, x: f64) -> (f64, bool) {
        let clamped = x.clamp(self.min, self.max);
        (clamped, clamped != x)
    }

    /// 模糊化：三個語言項的隸屬度
    pub fn fuzzify(&self, x: f64) -> [f64; 3] {
        [
            self.terms[0].membership.degree(x),
            self.terms[1].membership.degree(x),
            self.terms[2].membership.degree(x),
        ]
    }

    /// 檢查論域內沒有推論空隙：每一點至少有一個語言項的隸屬度大於零
    pub fn covers_universe(&self, step: f64) -> bool {
        let n = ((self.max - self.min) / step).floor() as usize;
        (0..=n)
            .map(|i| self.min + i as f64 * step)
            .chain(std::iter::once(self.max))
            .all(|x| self.fuzzify(x).iter().any(|&mu| mu > 0.0))
    }
}
