//! 隸屬函數

use planner_core::{PlannerError, Result};
use serde::{Deserialize, Serialize};

/// 隸屬函數（三角形或梯形）
///
/// 允許肩形端點：`a == b` 或 `c == d` 時該點的隸屬度為 1。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// 三角形 (a, b, c)，頂點在 b
    Triangular { a: f64, b: f64, c: f64 },

    /// 梯形 (a, b, c, d)，平台在 [b, c]
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// 創建三角形隸屬函數
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        check_breakpoints(&[a, b, c])?;
        Ok(Self::Triangular { a, b, c })
    }

    /// 創建梯形隸屬函數
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        check_breakpoints(&[a, b, c, d])?;
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// 計算隸屬度，結果必在 [0, 1]
    pub fn degree(&self, x: f64) -> f64 {
        let (a, b, c, d) = self.breakpoints();
        if x < a || x > d {
            0.0
        } else if x >= b && x <= c {
            1.0
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (d - x) / (d - c)
        }
    }

    /// 支撐集 [a, d]
    pub fn support(&self) -> (f64, f64) {
        let (a, _, _, d) = self.breakpoints();
        (a, d)
    }

    /// 隸屬度恰為 `level` 的兩個交點（上升邊、下降邊）
    ///
    /// 垂直邊沒有交點，`level` 不在 (0, 1) 時亦無交點。
    pub fn cut_points(&self, level: f64) -> [Option<f64>; 2] {
        if level <= 0.0 || level >= 1.0 {
            return [None, None];
        }
        let (a, b, c, d) = self.breakpoints();
        let rising = (b > a).then(|| a + level * (b - a));
        let falling = (d > c).then(|| d - level * (d - c));
        [rising, falling]
    }

    /// 統一成梯形參數；三角形的平台退化為單點
    fn breakpoints(&self) -> (f64, f64, f64, f64) {
        match *self {
            Self::Triangular { a, b, c } => (a, b, b, c),
            Self::Trapezoidal { a, b, c, d } => (a, b, c, d),
        }
    }
}

fn check_breakpoints(points: &[f64]) -> Result<()> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(PlannerError::InvalidMembership(format!(
            "參數必須為有限數值: {points:?}"
        )));
    }
    if points.windows(2).any(|w| w[0] > w[1]) {
        return Err(PlannerError::InvalidMembership(format!(
            "參數必須遞增排列: {points:?}"
        )));
    }
    if points.first() == points.last() {
        return Err(PlannerError::InvalidMembership(format!(
            "支撐集寬度為零: {points:?}"
        )));
    }
    Ok(())
}
