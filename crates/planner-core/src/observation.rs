//! 月度觀測資料模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 單月營運觀測值（由資料匯入層提供）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyObservation {
    /// 月份（以該月第一天表示）
    pub month: NaiveDate,

    /// 市場需求
    pub demand: u32,

    /// 產品庫存
    pub stock: f64,

    /// 生產產能
    pub production_capacity: f64,
}

impl MonthlyObservation {
    /// 創建新的觀測值
    pub fn new(month: NaiveDate, demand: u32, stock: f64, production_capacity: f64) -> Self {
        Self {
            month,
            demand,
            stock,
            production_capacity,
        }
    }

    /// 需求量（模糊推論使用的實數形式）
    pub fn demand_f64(&self) -> f64 {
        f64::from(self.demand)
    }
}

/// 取出觀測序列的需求序列
pub fn demand_series(observations: &[MonthlyObservation]) -> Vec<u32> {
    observations.iter().map(|o| o.demand).collect()
}
