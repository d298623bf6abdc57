//! 確定性有限時界動態規劃
//!
//! 狀態為整數庫存 0..=max_stock，共 T+1 個階段（階段 T 為終端，價值為 0）。
//! 逆向遞迴建立價值表與策略表，再由初始庫存前向模擬得到每期決策。

use planner_core::{
    validate_costs, ImportPlan, OverflowPolicy, PeriodRecord, PlannerError, PlanningConfig,
    Result,
};
use rust_decimal::Decimal;

use crate::action_window::ActionWindow;

/// 單期狀態轉移結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// 期末庫存（已截斷至容量）
    pub ending_stock: u32,

    /// 超出容量被捨棄的數量
    pub discarded: u32,
}

/// 價值表與策略表（以 (階段, 庫存) 為索引的稠密陣列）
///
/// `None` 表示該狀態沒有任何可行動作。
#[derive(Debug, Clone)]
pub struct StageTables {
    horizon: usize,
    width: usize,
    values: Vec<Option<Decimal>>,
    policy: Vec<Option<u32>>,
    infeasible_states: usize,
}

impl StageTables {
    fn new(horizon: usize, max_stock: u32) -> Self {
        let width = max_stock as usize + 1;
        let mut values = vec![None; (horizon + 1) * width];
        // 終端條件：時界之後不再計成本
        for slot in &mut values[horizon * width..] {
            *slot = Some(Decimal::ZERO);
        }
        Self {
            horizon,
            width,
            values,
            policy: vec![None; horizon * width],
            infeasible_states: 0,
        }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// 從 (stage, stock) 到時界結束的最小剩餘成本
    pub fn value(&self, stage: usize, stock: u32) -> Option<Decimal> {
        if stage > self.horizon || stock as usize >= self.width {
            return None;
        }
        self.values[stage * self.width + stock as usize]
    }

    /// (stage, stock) 的最佳進口量
    pub fn action(&self, stage: usize, stock: u32) -> Option<u32> {
        if stage >= self.horizon || stock as usize >= self.width {
            return None;
        }
        self.policy[stage * self.width + stock as usize]
    }

    /// 逆向遞迴中沒有可行動作的狀態數
    pub fn infeasible_states(&self) -> usize {
        self.infeasible_states
    }
}

/// DP 求解結果
#[derive(Debug, Clone)]
pub struct DpSolution {
    /// 每期決策
    pub schedule: Vec<PeriodRecord>,

    /// 最小總成本
    pub total_cost: Decimal,

    /// 逆向遞迴中沒有可行動作的狀態數
    pub infeasible_states: usize,
}

impl DpSolution {
    /// 轉換為進口計劃
    pub fn into_plan(self) -> ImportPlan {
        ImportPlan::new(self.schedule, self.total_cost)
    }
}

/// 確定性有限時界 DP 求解器
#[derive(Debug, Clone)]
pub struct DpSolver {
    holding_cost: Decimal,
    import_cost: Decimal,
    max_stock: u32,
    window: ActionWindow,
    overflow_policy: OverflowPolicy,
}

impl DpSolver {
    /// 創建求解器（預設 δ = 50、超出容量截斷）
    pub fn new(holding_cost: Decimal, import_cost: Decimal, max_stock: u32) -> Self {
        Self {
            holding_cost,
            import_cost,
            max_stock,
            window: ActionWindow::default(),
            overflow_policy: OverflowPolicy::Clip,
        }
    }

    /// 由規劃配置建立求解器（成本與初始庫存在求解時檢查）
    pub fn from_config(config: &PlanningConfig) -> Self {
        Self::new(config.holding_cost, config.import_cost, config.max_stock)
            .with_action_window(ActionWindow::new(config.action_window))
            .with_overflow_policy(config.overflow_policy)
    }

    /// 建構器模式：設置動作視窗
    pub fn with_action_window(mut self, window: ActionWindow) -> Self {
        self.window = window;
        self
    }

    /// 建構器模式：設置超出容量策略
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    pub fn max_stock(&self) -> u32 {
        self.max_stock
    }

    /// 逆向遞迴 + 前向模擬
    pub fn solve(&self, demand: &[u32], estimates: &[f64], initial_stock: u32) -> Result<DpSolution> {
        self.check_initial_stock(initial_stock)?;
        let tables = self.backward(demand, estimates)?;
        self.replay(&tables, demand, estimates, initial_stock)
    }

    /// 逆向遞迴：建立價值表與策略表
    ///
    /// 相同成本時保留動作集合中最先出現（最小）的進口量。
    pub fn backward(&self, demand: &[u32], estimates: &[f64]) -> Result<StageTables> {
        self.validate(demand, estimates)?;

        let horizon = demand.len();
        let mut tables = StageTables::new(horizon, self.max_stock);
        let width = tables.width;

        tracing::debug!(
            "開始逆向遞迴：{} 期，庫存狀態 {} 個",
            horizon,
            width
        );

        for t in (0..horizon).rev() {
            let actions = self.window.actions(estimates[t]);

            for s in 0..=self.max_stock {
                let mut best: Option<(Decimal, u32)> = None;

                for &action in &actions {
                    let Some(transition) = self.transition(s, action, demand[t]) else {
                        continue;
                    };
                    // 後繼狀態無可行解時，此動作同樣不可行
                    let Some(future) = tables.values[(t + 1) * width + transition.ending_stock as usize]
                    else {
                        continue;
                    };

                    let total = self
                        .stage_cost(action, transition)?
                        .checked_add(future)
                        .ok_or_else(cost_overflow)?;
                    if best.map_or(true, |(cost, _)| total < cost) {
                        best = Some((total, action));
                    }
                }

                let index = t * width + s as usize;
                match best {
                    Some((cost, action)) => {
                        tables.values[index] = Some(cost);
                        tables.policy[index] = Some(action);
                    }
                    None => tables.infeasible_states += 1,
                }
            }

            tracing::debug!("階段 {} 完成，動作集合 {:?}", t, actions);
        }

        if tables.infeasible_states > 0 {
            tracing::warn!(
                "{} 個 (階段, 庫存) 狀態沒有可行動作，動作視窗可能過窄",
                tables.infeasible_states
            );
        }

        Ok(tables)
    }

    /// 前向模擬：從初始庫存依策略表逐期決策
    ///
    /// 價值表 V[0, 初始庫存] 必須與逐期成本總和完全一致。
    pub fn replay(
        &self,
        tables: &StageTables,
        demand: &[u32],
        estimates: &[f64],
        initial_stock: u32,
    ) -> Result<DpSolution> {
        self.check_initial_stock(initial_stock)?;
        if tables.horizon != demand.len() || demand.len() != estimates.len() {
            return Err(PlannerError::HorizonMismatch {
                demand: demand.len(),
                estimates: estimates.len(),
            });
        }

        if tables.width != self.max_stock as usize + 1 {
            return Err(PlannerError::InvalidConfig(format!(
                "價值表容量 {} 與求解器容量 {} 不一致",
                tables.width - 1,
                self.max_stock
            )));
        }

        let mut stock = initial_stock;
        let mut schedule = Vec::with_capacity(demand.len());
        let mut replayed = Decimal::ZERO;

        for t in 0..tables.horizon {
            let infeasible = || PlannerError::InfeasibleState {
                period: t + 1,
                stock,
            };
            let action = tables.action(t, stock).ok_or_else(infeasible)?;
            let transition = self
                .transition(stock, action, demand[t])
                .ok_or_else(infeasible)?;

            let record = PeriodRecord {
                period: t + 1,
                month: None,
                demand: demand[t],
                fuzzy_estimate: estimates[t],
                import: action,
                starting_stock: stock,
                ending_stock: transition.ending_stock,
                discarded: transition.discarded,
                holding_cost: unit_cost(self.holding_cost, transition.ending_stock)?,
                import_cost: unit_cost(self.import_cost, action)?,
                overflow_cost: self.overflow_cost(transition)?,
            };
            replayed = replayed
                .checked_add(self.stage_cost(action, transition)?)
                .ok_or_else(cost_overflow)?;
            schedule.push(record);

            stock = transition.ending_stock;
        }

        let total_cost = tables
            .value(0, initial_stock)
            .ok_or(PlannerError::InfeasibleState {
                period: 1,
                stock: initial_stock,
            })?;

        if total_cost != replayed {
            return Err(PlannerError::ReplayMismatch {
                value: total_cost,
                replayed,
            });
        }

        tracing::debug!("前向模擬完成，總成本 {}", total_cost);

        Ok(DpSolution {
            schedule,
            total_cost,
            infeasible_states: tables.infeasible_states,
        })
    }

    /// 狀態轉移：期末庫存 = 期初 + 進口 − 需求
    ///
    /// 缺貨（期末庫存為負）不可行；超出容量依策略截斷或拒絕。
    pub fn transition(&self, stock: u32, action: u32, demand: u32) -> Option<Transition> {
        let tentative = (u64::from(stock) + u64::from(action)).checked_sub(u64::from(demand))?;
        let max_stock = u64::from(self.max_stock);

        if tentative <= max_stock {
            return Some(Transition {
                ending_stock: tentative as u32,
                discarded: 0,
            });
        }

        match self.overflow_policy {
            OverflowPolicy::Reject => None,
            OverflowPolicy::Clip | OverflowPolicy::Penalize { .. } => Some(Transition {
                ending_stock: self.max_stock,
                discarded: (tentative - max_stock).min(u64::from(u32::MAX)) as u32,
            }),
        }
    }

    /// 單期成本 = 進口成本 × 進口量 + 持有成本 × 期末庫存 (+ 超出罰金)
    ///
    /// 超出 `Decimal` 表示範圍時回傳錯誤。
    pub fn stage_cost(&self, action: u32, transition: Transition) -> Result<Decimal> {
        let cost = unit_cost(self.import_cost, action)?
            .checked_add(unit_cost(self.holding_cost, transition.ending_stock)?)
            .ok_or_else(cost_overflow)?;
        cost.checked_add(self.overflow_cost(transition)?)
            .ok_or_else(cost_overflow)
    }

    fn overflow_cost(&self, transition: Transition) -> Result<Decimal> {
        match self.overflow_policy {
            OverflowPolicy::Penalize { unit_cost: penalty } => unit_cost(penalty, transition.discarded),
            OverflowPolicy::Clip | OverflowPolicy::Reject => Ok(Decimal::ZERO),
        }
    }

    fn validate(&self, demand: &[u32], estimates: &[f64]) -> Result<()> {
        if demand.is_empty() {
            return Err(PlannerError::EmptyHorizon);
        }
        if demand.len() != estimates.len() {
            return Err(PlannerError::HorizonMismatch {
                demand: demand.len(),
                estimates: estimates.len(),
            });
        }

        validate_costs(self.holding_cost, self.import_cost, self.overflow_policy)?;

        if let Some((t, &value)) = estimates
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(PlannerError::InvalidEstimate {
                period: t + 1,
                value,
            });
        }

        Ok(())
    }

    fn check_initial_stock(&self, initial_stock: u32) -> Result<()> {
        if initial_stock > self.max_stock {
            return Err(PlannerError::InitialStockOutOfRange {
                initial_stock,
                max_stock: self.max_stock,
            });
        }
        Ok(())
    }
}

/// 單價 × 數量
fn unit_cost(price: Decimal, quantity: u32) -> Result<Decimal> {
    price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(cost_overflow)
}

fn cost_overflow() -> PlannerError {
    PlannerError::InvalidConfig("成本超出 Decimal 可表示範圍".to_string())
}

/// 以參數形式呼叫 DP（δ = 50、超出容量截斷）
pub fn solve_dp(
    demand: &[u32],
    fuzzy_estimate: &[f64],
    holding_cost: Decimal,
    import_cost: Decimal,
    max_stock: u32,
    initial_stock: u32,
) -> Result<(Vec<PeriodRecord>, Decimal)> {
    let solution = DpSolver::new(holding_cost, import_cost, max_stock).solve(
        demand,
        fuzzy_estimate,
        initial_stock,
    )?;
    Ok((solution.schedule, solution.total_cost))
}
