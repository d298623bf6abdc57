//! Mamdani 模糊推論引擎

use planner_core::{MonthlyObservation, PlannerError, Result};
use rayon::prelude::*;

use crate::defuzz;
use crate::rules::RuleBase;
use crate::variable::{Level, LinguisticVariable};
use crate::{FuzzyInference, InputWarning};

/// 預設輸出論域取樣間隔
pub const DEFAULT_RESOLUTION: f64 = 1.0;

/// 模糊推論引擎
///
/// 變數與規則在建構後唯讀，可在多個執行緒間共享；每次評估只使用呼叫端自己的輸入。
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    demand: LinguisticVariable,
    stock: LinguisticVariable,
    capacity: LinguisticVariable,
    import: LinguisticVariable,
    rules: RuleBase,
    resolution: f64,
}

impl FuzzyEngine {
    /// 創建推論引擎
    pub fn new(
        demand: LinguisticVariable,
        stock: LinguisticVariable,
        capacity: LinguisticVariable,
        import: LinguisticVariable,
        rules: RuleBase,
    ) -> Self {
        Self {
            demand,
            stock,
            capacity,
            import,
            rules,
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// 參考系統的變數與 27 條規則
    pub fn standard() -> Result<Self> {
        Ok(Self::new(
            LinguisticVariable::market_demand()?,
            LinguisticVariable::product_stock()?,
            LinguisticVariable::production_capacity()?,
            LinguisticVariable::product_import()?,
            RuleBase::standard(),
        ))
    }

    /// 建構器模式：設置輸出論域取樣間隔
    pub fn with_resolution(mut self, step: f64) -> Result<Self> {
        let (min, max) = self.import.universe();
        if !step.is_finite() || step <= 0.0 || step > max - min {
            return Err(PlannerError::InvalidConfig(format!(
                "取樣間隔必須在 (0, {}] 之間: {step}",
                max - min
            )));
        }
        self.resolution = step;
        Ok(self)
    }

    /// 建構器模式：替換規則庫
    pub fn with_rules(mut self, rules: RuleBase) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    pub fn output_variable(&self) -> &LinguisticVariable {
        &self.import
    }

    /// 估計進口量
    pub fn evaluate(&self, demand: f64, stock: f64, capacity: f64) -> Result<f64> {
        self.infer(demand, stock, capacity).map(|inference| inference.estimate)
    }

    /// 完整推論：模糊化 → 規則觸發 → 聚合 → 重心法解模糊
    pub fn infer(&self, demand: f64, stock: f64, capacity: f64) -> Result<FuzzyInference> {
        let mut warnings = Vec::new();
        let demand_x = bind_input(&self.demand, demand, &mut warnings)?;
        let stock_x = bind_input(&self.stock, stock, &mut warnings)?;
        let capacity_x = bind_input(&self.capacity, capacity, &mut warnings)?;

        let activations = self.rules.activate(
            &self.demand.fuzzify(demand_x),
            &self.stock.fuzzify(stock_x),
            &self.capacity.fuzzify(capacity_x),
        );
        tracing::trace!(?activations, "規則聚合啟動度");

        let no_rule_fired = || PlannerError::NoRuleFired {
            demand,
            stock,
            capacity,
        };

        if activations.iter().all(|&a| a <= 0.0) {
            return Err(no_rule_fired());
        }

        let aggregated = defuzz::aggregate(&self.import, &activations, self.resolution);
        let estimate = defuzz::centroid(&aggregated).ok_or_else(no_rule_fired)?;

        Ok(FuzzyInference {
            estimate,
            activations,
            warnings,
        })
    }

    /// 依序評估整個觀測序列（並行計算，結果順序與輸入一致）
    pub fn evaluate_batch(&self, observations: &[MonthlyObservation]) -> Result<Vec<FuzzyInference>> {
        observations
            .par_iter()
            .map(|obs| self.infer(obs.demand_f64(), obs.stock, obs.production_capacity))
            .collect()
    }

    /// 某一輸出等級的啟動度最高者
    pub fn dominant_level(inference: &FuzzyInference) -> Level {
        Level::ALL
            .into_iter()
            .rev()
            .max_by(|a, b| {
                inference.activations[a.index()].total_cmp(&inference.activations[b.index()])
            })
            .unwrap_or(Level::Medium)
    }
}

/// 綁定單一輸入：拒絕非有限值，超出論域時截斷並記錄警告
fn bind_input(
    variable: &LinguisticVariable,
    value: f64,
    warnings: &mut Vec<InputWarning>,
) -> Result<f64> {
    if !value.is_finite() {
        return Err(PlannerError::InvalidInput {
            variable: variable.name().to_string(),
            value,
        });
    }

    let (clamped, was_clamped) = variable.clamp(value);
    if was_clamped {
        tracing::warn!(
            "{} = {} 超出論域 {:?}，以 {} 計算",
            variable.name(),
            value,
            variable.universe(),
            clamped
        );
        warnings.push(InputWarning {
            variable: variable.name().to_string(),
            value,
            clamped_to: clamped,
        });
    }
    Ok(clamped)
}
