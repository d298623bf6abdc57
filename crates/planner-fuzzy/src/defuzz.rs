//! 聚合與重心法解模糊

use crate::variable::{Level, LinguisticVariable};

/// 依啟動度截斷各輸出語言項，取逐點最大值形成聚合輸出集合
///
/// 取樣點為論域上間隔 `step` 的網格，再加上各截斷項與截斷高度的交點，
/// 使分段線性的聚合集合在平台轉折處不失真。
pub fn aggregate(output: &LinguisticVariable, activations: &[f64; 3], step: f64) -> Vec<(f64, f64)> {
    let (min, max) = output.universe();
    let n = ((max - min) / step).floor() as usize;

    let mut xs: Vec<f64> = (0..=n).map(|i| min + i as f64 * step).collect();
    xs.push(max);

    for level in Level::ALL {
        let cut = activations[level.index()];
        for x in output.term(level).membership.cut_points(cut).into_iter().flatten() {
            if x >= min && x <= max {
                xs.push(x);
            }
        }
    }

    xs.sort_by(f64::total_cmp);
    xs.dedup();

    xs.into_iter()
        .map(|x| {
            let mu = Level::ALL
                .iter()
                .map(|&level| {
                    let cut = activations[level.index()];
                    cut.min(output.term(level).membership.degree(x))
                })
                .fold(0.0_f64, f64::max);
            (x, mu)
        })
        .collect()
}

/// 分段線性函數的重心；總面積為零時回傳 `None`
pub fn centroid(points: &[(f64, f64)]) -> Option<f64> {
    let mut moment = 0.0;
    let mut area = 0.0;

    for pair in points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        let width = x2 - x1;
        if width <= 0.0 || (y1 == 0.0 && y2 == 0.0) {
            continue;
        }

        // 梯形面積與其重心
        let segment_area = 0.5 * width * (y1 + y2);
        let segment_centroid = x1 + width * (y1 + 2.0 * y2) / (3.0 * (y1 + y2));

        moment += segment_centroid * segment_area;
        area += segment_area;
    }

    if area > 0.0 {
        Some(moment / area)
    } else {
        None
    }
}
