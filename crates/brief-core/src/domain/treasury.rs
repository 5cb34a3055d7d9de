//! 미국 국채 수익률 레코드.

use serde::{Deserialize, Serialize};

/// 국채 만기별 수익률 요약.
///
/// 수익률은 % 단위, 변동은 %p 단위입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryPoint {
    /// 현재 수익률 (%)
    pub yield_rate: f64,
    /// 전일 대비 변동 (%p)
    pub change_bp: f64,
    /// 52주 최고 수익률 (%)
    pub year_high: f64,
    /// 52주 최저 수익률 (%)
    pub year_low: f64,
    /// 90일(3개월) 평균 수익률 (데이터 부족 시 None)
    pub ma_90: Option<f64>,
    /// 180일(6개월) 평균 수익률 (데이터 부족 시 None)
    pub ma_180: Option<f64>,
    /// 최근 20일 수익률 표준편차
    pub monthly_volatility: f64,
    /// 전체 윈도우 수익률 표준편차
    pub long_term_volatility: f64,
    /// 단기/장기 변동성 비율
    pub volatility_ratio: f64,
    /// 기준금리(연방기금금리 목표 상단) 대비 스프레드 (%p)
    pub fed_spread: Option<f64>,
}

impl TreasuryPoint {
    /// 52주 변동범위 내 현재 수익률의 위치 (%).
    ///
    /// 범위가 퇴화한 경우(최고 == 최저) 중앙값 50을 반환합니다.
    pub fn range_position(&self) -> f64 {
        let width = self.year_high - self.year_low;
        if width <= f64::EPSILON {
            50.0
        } else {
            (self.yield_rate - self.year_low) / width * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreasuryPoint {
        TreasuryPoint {
            yield_rate: 4.25,
            change_bp: 0.03,
            year_high: 5.0,
            year_low: 3.5,
            ma_90: Some(4.2),
            ma_180: Some(4.1),
            monthly_volatility: 0.08,
            long_term_volatility: 0.12,
            volatility_ratio: 0.67,
            fed_spread: Some(-1.25),
        }
    }

    #[test]
    fn test_range_position() {
        let point = sample();
        // (4.25 - 3.5) / 1.5 * 100 = 50
        assert!((point.range_position() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_position_degenerate() {
        let point = TreasuryPoint {
            year_high: 4.0,
            year_low: 4.0,
            ..sample()
        };
        assert_eq!(point.range_position(), 50.0);
    }
}
