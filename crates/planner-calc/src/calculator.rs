//! 進口規劃主計算器

use planner_core::observation::demand_series;
use planner_core::{ImportPlan, MonthlyObservation, PlannerError, PlanningConfig};
use planner_fuzzy::{FuzzyEngine, FuzzyInference};
use planner_optimizer::DpSolver;

use crate::{PlanResult, PlanWarning};

/// 進口規劃器：模糊推論估計每期進口量，再以 DP 求最佳計劃
pub struct ImportPlanner {
    /// 模糊推論引擎
    engine: FuzzyEngine,

    /// 規劃配置
    config: PlanningConfig,
}

impl ImportPlanner {
    /// 創建新的規劃器
    pub fn new(engine: FuzzyEngine, config: PlanningConfig) -> Self {
        Self { engine, config }
    }

    /// 使用參考系統的模糊引擎
    pub fn standard(config: PlanningConfig) -> planner_core::Result<Self> {
        Ok(Self::new(FuzzyEngine::standard()?, config))
    }

    /// 主計算入口
    pub fn calculate(&self, observations: &[MonthlyObservation]) -> planner_core::Result<PlanResult> {
        tracing::info!("開始進口規劃：觀測 {} 期", observations.len());

        let start_time = std::time::Instant::now();
        let mut warnings = Vec::new();

        // Step 1: 檢查配置與輸入
        tracing::debug!("Step 1: 檢查配置");
        self.config.validate()?;
        let first = observations.first().ok_or(PlannerError::EmptyHorizon)?;
        warnings.extend(Self::check_month_order(observations));

        // Step 2: 模糊推論
        tracing::debug!("Step 2: 模糊推論");
        let estimates = self.estimate(observations)?;
        for (index, inference) in estimates.iter().enumerate() {
            for input in &inference.warnings {
                warnings.push(PlanWarning::warning(Some(index + 1), input.to_string()));
            }
        }

        // Step 3: 動態規劃
        tracing::debug!("Step 3: 動態規劃");
        let initial_stock = self.config.resolve_initial_stock(first.stock);
        if self.config.initial_stock.is_none() {
            warnings.push(PlanWarning::info(
                None,
                format!("未設定初始庫存，使用第一期觀測庫存 {initial_stock}"),
            ));
        }

        let demand = demand_series(observations);
        let fuzzy: Vec<f64> = estimates.iter().map(|e| e.estimate).collect();
        let solver = DpSolver::from_config(&self.config);
        let solution = solver.solve(&demand, &fuzzy, initial_stock)?;

        if solution.infeasible_states > 0 {
            warnings.push(PlanWarning::info(
                None,
                format!(
                    "{} 個 (階段, 庫存) 狀態無可行動作（未出現在最佳路徑上）",
                    solution.infeasible_states
                ),
            ));
        }

        // Step 4: 帶入月份
        tracing::debug!("Step 4: 帶入月份");
        let periods = solution
            .schedule
            .into_iter()
            .zip(observations)
            .map(|(record, obs)| record.with_month(obs.month))
            .collect();
        let plan = ImportPlan::new(periods, solution.total_cost);
        let kpis = plan.kpis(self.config.max_stock);

        tracing::info!("進口規劃完成，耗時 {:?}", start_time.elapsed());
        tracing::info!("總成本: {}，總進口量: {}", plan.total_cost, plan.total_import());

        Ok(PlanResult {
            estimates,
            plan,
            kpis,
            warnings,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        })
    }

    /// 只執行模糊推論
    pub fn estimate(&self, observations: &[MonthlyObservation]) -> planner_core::Result<Vec<FuzzyInference>> {
        self.engine.evaluate_batch(observations)
    }

    /// 月份需嚴格遞增；序列順序即期間順序，不會重新排序
    fn check_month_order(observations: &[MonthlyObservation]) -> Vec<PlanWarning> {
        observations
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1].month <= pair[0].month)
            .map(|(index, pair)| {
                PlanWarning::warning(
                    Some(index + 2),
                    format!("月份 {} 未晚於前一期 {}", pair[1].month, pair[0].month),
                )
            })
            .collect()
    }

    /// 獲取規劃配置引用
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 獲取模糊引擎引用
    pub fn engine(&self) -> &FuzzyEngine {
        &self.engine
    }
}
