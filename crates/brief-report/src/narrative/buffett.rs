//! 버핏 지표 요약문 생성.

use brief_core::domain::BuffettStatus;

use super::BUFFETT_UNAVAILABLE;

/// 버핏 지표 요약문 생성.
pub fn buffett_summary(status: Option<&BuffettStatus>) -> String {
    let Some(status) = status else {
        return BUFFETT_UNAVAILABLE.to_string();
    };

    let mean_relation = if status.current_ratio >= status.historical_mean {
        "상회"
    } else {
        "하회"
    };
    let trend_relation = if status.deviation_from_trend >= 0.0 {
        "높은"
    } else {
        "낮은"
    };

    format!(
        "현재 버핏 지표는 {:.1}%로 장기 평균({:.1}%)을 {}하고 있습니다. \
         2년 트렌드({:.1}%) 대비 {:.1}% {} 수준이며, 전체 기간 Z-Score는 \
         {:+.2}로 시장은 '{}' 구간에 있습니다. \
         트렌드 ±2σ 밴드는 {:.1}% ~ {:.1}% 입니다.",
        status.current_ratio,
        status.historical_mean,
        mean_relation,
        status.trend_value,
        status.deviation_from_trend.abs(),
        trend_relation,
        status.z_score,
        status.market_status,
        status.lower_2std,
        status.upper_2std,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::domain::MarketStatus;

    #[test]
    fn test_overvalued_summary() {
        let status = BuffettStatus {
            current_ratio: 180.5,
            trend_value: 165.0,
            historical_mean: 150.2,
            historical_std: 20.0,
            deviation_from_trend: 9.4,
            z_score: 1.5,
            upper_2std: 195.0,
            lower_2std: 135.0,
            market_status: MarketStatus::Overvalued,
        };

        let summary = buffett_summary(Some(&status));
        assert!(summary.contains("180.5%로 장기 평균(150.2%)을 상회"));
        assert!(summary.contains("9.4% 높은 수준"));
        assert!(summary.contains("Z-Score는 +1.50"));
        assert!(summary.contains("'과대평가' 구간"));
        assert!(summary.contains("135.0% ~ 195.0%"));
    }

    #[test]
    fn test_missing_status() {
        assert_eq!(buffett_summary(None), BUFFETT_UNAVAILABLE);
    }
}
