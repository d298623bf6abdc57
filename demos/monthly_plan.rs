//! 十二個月進口規劃示例
//!
//! `RUST_LOG=debug cargo run --example monthly_plan` 可看到每一步的追蹤日誌。

use chrono::NaiveDate;
use import_planner::{ImportPlanner, MonthlyObservation, PlanningConfig};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{
    "holding_cost": "2",
    "import_cost": "5",
    "max_stock": 500,
    "initial_stock": 300
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 月度進口規劃示例 ===\n");

    let config = PlanningConfig::from_json(CONFIG)?;
    let planner = ImportPlanner::standard(config)?;

    // (需求, 月初庫存, 產能)
    let rows = [
        (220, 260.0, 150.0),
        (240, 240.0, 140.0),
        (250, 220.0, 120.0),
        (270, 200.0, 100.0),
        (290, 180.0, 90.0),
        (300, 170.0, 80.0),
        (310, 160.0, 75.0),
        (280, 180.0, 95.0),
        (260, 200.0, 120.0),
        (240, 220.0, 140.0),
        (220, 240.0, 160.0),
        (200, 260.0, 180.0),
    ];

    let mut observations = Vec::with_capacity(rows.len());
    for (index, &(demand, stock, capacity)) in rows.iter().enumerate() {
        let month = NaiveDate::from_ymd_opt(2025, index as u32 + 1, 1)
            .ok_or_else(|| anyhow::anyhow!("無效月份 {}", index + 1))?;
        observations.push(MonthlyObservation::new(month, demand, stock, capacity));
    }

    let result = planner.calculate(&observations)?;

    println!(
        "{:<10} {:>6} {:>10} {:>6} {:>6} {:>6} {:>8}",
        "月份", "需求", "模糊估計", "進口", "期初", "期末", "成本"
    );
    for period in &result.plan.periods {
        let month = period
            .month
            .map(|m| m.format("%Y-%m").to_string())
            .unwrap_or_default();
        println!(
            "{:<10} {:>6} {:>10.2} {:>6} {:>6} {:>6} {:>8}",
            month,
            period.demand,
            period.fuzzy_estimate,
            period.import,
            period.starting_stock,
            period.ending_stock,
            period.stage_cost()
        );
    }

    println!("\n總成本: {}", result.plan.total_cost);
    println!("總進口量: {}", result.plan.total_import());
    println!("偏離模糊估計: {:.2}", result.plan.fuzzy_deviation());

    let kpis = &result.kpis;
    println!("\n績效指標:");
    println!("  平均庫存: {:.1}", kpis.average_inventory);
    println!("  缺貨率: {:.1}%", kpis.stockout_rate * 100.0);
    println!("  超量率: {:.1}%", kpis.overstock_rate * 100.0);
    println!("  服務水準: {:.1}%", kpis.service_level * 100.0);
    println!("  單位需求成本: {}", kpis.cost_per_unit_demand.round_dp(2));
    println!("  庫存周轉: {:.2}", kpis.inventory_turnover);

    if !result.warnings.is_empty() {
        println!("\n警告:");
        for warning in &result.warnings {
            println!("  - [{:?}] {}", warning.severity, warning.message);
        }
    }

    Ok(())
}
