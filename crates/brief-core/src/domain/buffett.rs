//! 버핏 지표 (시가총액/GDP) 상태 레코드.

use serde::{Deserialize, Serialize};

/// Z-score 기반 시장 평가 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    /// z > 2
    VeryOvervalued,
    /// 1 < z <= 2
    Overvalued,
    /// -1 <= z <= 1
    FairValue,
    /// -2 <= z < -1
    Undervalued,
    /// z < -2
    VeryUndervalued,
}

impl MarketStatus {
    /// 전체 기간 Z-score로부터 시장 상태 분류.
    pub fn from_z_score(z: f64) -> Self {
        if z > 2.0 {
            Self::VeryOvervalued
        } else if z > 1.0 {
            Self::Overvalued
        } else if z < -2.0 {
            Self::VeryUndervalued
        } else if z < -1.0 {
            Self::Undervalued
        } else {
            Self::FairValue
        }
    }
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::VeryOvervalued => "매우 과대평가",
            Self::Overvalued => "과대평가",
            Self::FairValue => "적정가치",
            Self::Undervalued => "과소평가",
            Self::VeryUndervalued => "매우 과소평가",
        };
        write!(f, "{}", label)
    }
}

/// 버핏 지표 현재 상태.
///
/// 비율 값은 모두 % 단위 (시가총액/GDP × 100)입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffettStatus {
    /// 현재 비율
    pub current_ratio: f64,
    /// 2년 이동평균 트렌드 값
    pub trend_value: f64,
    /// 전체 기간 평균
    pub historical_mean: f64,
    /// 전체 기간 표준편차
    pub historical_std: f64,
    /// 트렌드 대비 괴리율 (%)
    pub deviation_from_trend: f64,
    /// 전체 기간 Z-score
    pub z_score: f64,
    /// 트렌드 + 2σ 밴드
    pub upper_2std: f64,
    /// 트렌드 - 2σ 밴드
    pub lower_2std: f64,
    /// 시장 평가 상태
    pub market_status: MarketStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(MarketStatus::from_z_score(2.5), MarketStatus::VeryOvervalued);
        assert_eq!(MarketStatus::from_z_score(1.5), MarketStatus::Overvalued);
        assert_eq!(MarketStatus::from_z_score(0.0), MarketStatus::FairValue);
        assert_eq!(MarketStatus::from_z_score(-1.5), MarketStatus::Undervalued);
        assert_eq!(
            MarketStatus::from_z_score(-2.5),
            MarketStatus::VeryUndervalued
        );
    }

    #[test]
    fn test_status_boundaries() {
        // 경계값은 적정가치/과대·과소평가 쪽으로 떨어진다
        assert_eq!(MarketStatus::from_z_score(1.0), MarketStatus::FairValue);
        assert_eq!(MarketStatus::from_z_score(-1.0), MarketStatus::FairValue);
        assert_eq!(MarketStatus::from_z_score(2.0), MarketStatus::Overvalued);
        assert_eq!(MarketStatus::from_z_score(-2.0), MarketStatus::Undervalued);
    }

    #[test]
    fn test_status_korean_labels() {
        assert_eq!(MarketStatus::VeryOvervalued.to_string(), "매우 과대평가");
        assert_eq!(MarketStatus::FairValue.to_string(), "적정가치");
    }
}
