//! 進口計劃模型（DP 求解結果）

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 單期決策紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 期間序號（從 1 開始）
    pub period: usize,

    /// 對應月份（由觀測資料帶入）
    pub month: Option<NaiveDate>,

    /// 需求
    pub demand: u32,

    /// 模糊推論估計的進口量
    pub fuzzy_estimate: f64,

    /// 最佳進口量
    pub import: u32,

    /// 期初庫存
    pub starting_stock: u32,

    /// 期末庫存（已截斷至容量）
    pub ending_stock: u32,

    /// 因超出容量而捨棄的數量
    pub discarded: u32,

    /// 持有成本
    pub holding_cost: Decimal,

    /// 進口成本
    pub import_cost: Decimal,

    /// 超出容量罰金
    pub overflow_cost: Decimal,
}

impl PeriodRecord {
    /// 本期總成本
    pub fn stage_cost(&self) -> Decimal {
        self.holding_cost + self.import_cost + self.overflow_cost
    }

    /// 最佳進口量與模糊估計的差距
    pub fn deviation_from_estimate(&self) -> f64 {
        f64::from(self.import) - self.fuzzy_estimate
    }

    /// 建構器模式：設置月份
    pub fn with_month(mut self, month: NaiveDate) -> Self {
        self.month = Some(month);
        self
    }
}

/// 進口計劃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPlan {
    /// 計劃ID
    pub id: Uuid,

    /// 每期決策
    pub periods: Vec<PeriodRecord>,

    /// 最小總成本（價值表 V[0, 初始庫存]）
    pub total_cost: Decimal,
}

impl ImportPlan {
    /// 創建新的進口計劃
    pub fn new(periods: Vec<PeriodRecord>, total_cost: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            periods,
            total_cost,
        }
    }

    /// 計劃時界長度
    pub fn horizon(&self) -> usize {
        self.periods.len()
    }

    /// 總進口量
    pub fn total_import(&self) -> u64 {
        self.periods.iter().map(|p| u64::from(p.import)).sum()
    }

    /// 總持有成本
    pub fn total_holding_cost(&self) -> Decimal {
        self.periods.iter().map(|p| p.holding_cost).sum()
    }

    /// 總進口成本
    pub fn total_import_cost(&self) -> Decimal {
        self.periods.iter().map(|p| p.import_cost).sum()
    }

    /// 逐期累加的成本，應與 `total_cost` 完全一致
    pub fn replayed_cost(&self) -> Decimal {
        self.periods.iter().map(|p| p.stage_cost()).sum()
    }

    /// 期末庫存
    pub fn final_stock(&self) -> Option<u32> {
        self.periods.last().map(|p| p.ending_stock)
    }

    /// 總需求
    pub fn total_demand(&self) -> u64 {
        self.periods.iter().map(|p| u64::from(p.demand)).sum()
    }

    /// 計算績效指標
    ///
    /// 空計劃的比例類指標皆為 0，服務水準為 1。
    pub fn kpis(&self, max_stock: u32) -> PlanKpis {
        let horizon = self.periods.len();
        let total_demand = self.total_demand();
        let share = |count: usize| {
            if horizon == 0 {
                0.0
            } else {
                count as f64 / horizon as f64
            }
        };

        let inventory: u64 = self.periods.iter().map(|p| u64::from(p.ending_stock)).sum();
        let average_inventory = if horizon == 0 {
            0.0
        } else {
            inventory as f64 / horizon as f64
        };

        let stockout_rate = share(self.periods.iter().filter(|p| p.ending_stock == 0).count());
        // ending ≥ 0.9 × max_stock，以整數比較
        let overstock_rate = share(
            self.periods
                .iter()
                .filter(|p| 10 * u64::from(p.ending_stock) >= 9 * u64::from(max_stock))
                .count(),
        );

        let cost_per_unit_demand = if total_demand == 0 {
            Decimal::ZERO
        } else {
            self.total_cost
                .checked_div(Decimal::from(total_demand))
                .unwrap_or(Decimal::ZERO)
        };

        let inventory_turnover = if average_inventory > 0.0 {
            total_demand as f64 / average_inventory
        } else {
            0.0
        };

        PlanKpis {
            total_import: self.total_import(),
            total_demand,
            total_cost: self.total_cost,
            average_inventory,
            stockout_rate,
            overstock_rate,
            service_level: 1.0 - stockout_rate,
            cost_per_unit_demand,
            inventory_turnover,
        }
    }

    /// 平均絕對偏差（最佳進口量 vs 模糊估計）
    pub fn fuzzy_deviation(&self) -> f64 {
        if self.periods.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .periods
            .iter()
            .map(|p| p.deviation_from_estimate().abs())
            .sum();
        sum / self.periods.len() as f64
    }
}

/// 計劃績效指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanKpis {
    pub total_import: u64,
    pub total_demand: u64,
    pub total_cost: Decimal,

    /// 平均期末庫存
    pub average_inventory: f64,

    /// 期末庫存為 0 的期數比例
    pub stockout_rate: f64,

    /// 期末庫存達容量 90% 以上的期數比例
    pub overstock_rate: f64,

    /// 1 − 缺貨率
    pub service_level: f64,

    /// 總成本 / 總需求（總需求為 0 時為 0）
    pub cost_per_unit_demand: Decimal,

    /// 總需求 / 平均庫存（平均庫存為 0 時為 0）
    pub inventory_turnover: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: usize, import: u32, ending_stock: u32) -> PeriodRecord {
        PeriodRecord {
            period,
            month: None,
            demand: 100,
            fuzzy_estimate: 110.0,
            import,
            starting_stock: 0,
            ending_stock,
            discarded: 0,
            holding_cost: Decimal::from(2) * Decimal::from(ending_stock),
            import_cost: Decimal::from(5) * Decimal::from(import),
            overflow_cost: Decimal::ZERO,
        }
    }

    #[test]
    fn test_stage_cost() {
        let mut r = record(1, 100, 10);
        assert_eq!(r.stage_cost(), Decimal::from(520));

        r.overflow_cost = Decimal::from(7);
        assert_eq!(r.stage_cost(), Decimal::from(527));
    }

    #[test]
    fn test_plan_totals() {
        let plan = ImportPlan::new(vec![record(1, 100, 10), record(2, 90, 0)], Decimal::from(970));

        assert_eq!(plan.horizon(), 2);
        assert_eq!(plan.total_import(), 190);
        assert_eq!(plan.total_holding_cost(), Decimal::from(20));
        assert_eq!(plan.total_import_cost(), Decimal::from(950));
        assert_eq!(plan.replayed_cost(), plan.total_cost);
        assert_eq!(plan.final_stock(), Some(0));
    }

    #[test]
    fn test_fuzzy_deviation() {
        let plan = ImportPlan::new(vec![record(1, 100, 0), record(2, 130, 0)], Decimal::ZERO);
        // |100 - 110| 與 |130 - 110| 的平均
        assert!((plan.fuzzy_deviation() - 15.0).abs() < 1e-12);

        let empty = ImportPlan::new(Vec::new(), Decimal::ZERO);
        assert_eq!(empty.fuzzy_deviation(), 0.0);
        assert_eq!(empty.final_stock(), None);
    }

    #[test]
    fn test_kpis() {
        // 期末庫存 0 / 450 / 200，容量 500：缺貨 1 期、超量 1 期（450 = 0.9 × 500）
        let plan = ImportPlan::new(
            vec![record(1, 100, 0), record(2, 550, 450), record(3, 0, 200)],
            Decimal::from(1500),
        );
        let kpis = plan.kpis(500);

        assert_eq!(kpis.total_import, 650);
        assert_eq!(kpis.total_demand, 300);
        assert_eq!(kpis.total_cost, Decimal::from(1500));
        assert!((kpis.average_inventory - 650.0 / 3.0).abs() < 1e-9);
        assert!((kpis.stockout_rate - 1.0 / 3.0).abs() < 1e-12);
        assert!((kpis.overstock_rate - 1.0 / 3.0).abs() < 1e-12);
        assert!((kpis.service_level - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(kpis.cost_per_unit_demand, Decimal::from(5));
        assert!((kpis.inventory_turnover - 300.0 / (650.0 / 3.0)).abs() < 1e-9);

        // 449 < 0.9 × 500
        let below = ImportPlan::new(vec![record(1, 100, 449)], Decimal::ZERO);
        assert_eq!(below.kpis(500).overstock_rate, 0.0);
    }

    #[test]
    fn test_kpis_zero_denominators() {
        let mut idle = record(1, 0, 0);
        idle.demand = 0;
        let plan = ImportPlan::new(vec![idle], Decimal::ZERO);
        let kpis = plan.kpis(500);

        assert_eq!(kpis.cost_per_unit_demand, Decimal::ZERO);
        assert_eq!(kpis.inventory_turnover, 0.0);
        assert_eq!(kpis.stockout_rate, 1.0);
        assert_eq!(kpis.service_level, 0.0);

        let empty = ImportPlan::new(Vec::new(), Decimal::ZERO).kpis(500);
        assert_eq!(empty.average_inventory, 0.0);
        assert_eq!(empty.stockout_rate, 0.0);
        assert_eq!(empty.overstock_rate, 0.0);
        assert_eq!(empty.service_level, 1.0);
        assert_eq!(empty.cost_per_unit_demand, Decimal::ZERO);
    }

    #[test]
    fn test_with_month() {
        let month = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let r = record(3, 50, 0).with_month(month);
        assert_eq!(r.month, Some(month));
    }
}
