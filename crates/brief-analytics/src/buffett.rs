//! 버핏 지표 (시가총액/GDP) 계산.
//!
//! Wilshire 5000 시가총액 프록시와 분기 GDP를 병합해 비율 시계열을 만들고,
//! 2년(504 거래일) 롤링 트렌드와 표준편차 밴드, 전체 기간 Z-score로 현재
//! 시장 상태를 분류합니다.

use chrono::NaiveDate;
use tracing::debug;

use brief_core::domain::{BuffettStatus, MarketStatus};

use crate::error::{AnalyticsError, Result};
use crate::series::{daily_interpolate, mean, merge_on_date, rolling_mean, rolling_std, std_dev};

/// 트렌드 롤링 윈도우 (2년 거래일 수).
pub const TREND_WINDOW: usize = 504;

/// 트렌드 계산에 필요한 최소 관측치 수.
pub const TREND_MIN_PERIODS: usize = TREND_WINDOW / 2;

/// 버핏 지표 계산기.
#[derive(Debug, Default)]
pub struct BuffettIndicator;

impl BuffettIndicator {
    /// 새로운 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 비율 시계열 계산 (날짜, 시가총액/GDP × 100).
    ///
    /// GDP는 일 단위로 선형 보간한 뒤 시장 시계열과 inner join 합니다.
    /// GDP가 0 이하인 날은 제외합니다.
    pub fn ratio_series(
        &self,
        market: &[(NaiveDate, f64)],
        gdp: &[(NaiveDate, f64)],
    ) -> Vec<(NaiveDate, f64)> {
        let gdp_daily = daily_interpolate(gdp);
        merge_on_date(market, &gdp_daily)
            .into_iter()
            .filter(|(_, _, g)| *g > 0.0)
            .map(|(date, m, g)| (date, m / g * 100.0))
            .collect()
    }

    /// 현재 상태 분석.
    ///
    /// 병합된 비율 시계열이 [`TREND_MIN_PERIODS`]에 미달하면
    /// `InsufficientData`를 반환합니다.
    pub fn current_status(
        &self,
        market: &[(NaiveDate, f64)],
        gdp: &[(NaiveDate, f64)],
    ) -> Result<BuffettStatus> {
        let ratios = self.ratio_series(market, gdp);
        if ratios.is_empty() {
            return Err(AnalyticsError::EmptySeries(
                "버핏 지표 병합 시계열".to_string(),
            ));
        }

        let values: Vec<f64> = ratios.iter().map(|(_, v)| *v).collect();
        debug!(points = values.len(), "버핏 지표 비율 시계열 계산 완료");

        let trend = rolling_mean(&values, TREND_WINDOW, TREND_MIN_PERIODS);
        let band_std = rolling_std(&values, TREND_WINDOW, TREND_MIN_PERIODS);

        let last = values.len() - 1;
        let (trend_value, band) = match (trend[last], band_std[last]) {
            (Some(t), Some(s)) => (t, s),
            _ => {
                return Err(AnalyticsError::InsufficientData(format!(
                    "트렌드 계산에 최소 {}개 관측치 필요 (현재 {}개)",
                    TREND_MIN_PERIODS,
                    values.len()
                )))
            }
        };

        let current_ratio = values[last];
        let historical_mean = mean(&values);
        let historical_std = std_dev(&values);

        let z_score = if historical_std > 0.0 {
            (current_ratio - historical_mean) / historical_std
        } else {
            0.0
        };
        let deviation_from_trend = if trend_value.abs() > f64::EPSILON {
            (current_ratio - trend_value) / trend_value * 100.0
        } else {
            0.0
        };

        Ok(BuffettStatus {
            current_ratio,
            trend_value,
            historical_mean,
            historical_std,
            deviation_from_trend,
            z_score,
            upper_2std: trend_value + 2.0 * band,
            lower_2std: trend_value - 2.0 * band,
            market_status: MarketStatus::from_z_score(z_score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(seq: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(seq)
    }

    /// 시장 시계열과 GDP 시계열을 합성해 지표 입력을 만든다.
    fn synthetic_inputs(days: i64) -> (Vec<(NaiveDate, f64)>, Vec<(NaiveDate, f64)>) {
        let market: Vec<(NaiveDate, f64)> =
            (0..days).map(|i| (date(i), 150.0 + (i as f64) * 0.01)).collect();
        // 분기 간격 GDP
        let gdp: Vec<(NaiveDate, f64)> = (0..=(days / 90))
            .map(|q| (date(q * 90), 100.0))
            .collect();
        (market, gdp)
    }

    #[test]
    fn test_ratio_series_merges_on_interpolated_gdp() {
        let market = vec![(date(0), 150.0), (date(45), 160.0), (date(90), 170.0)];
        let gdp = vec![(date(0), 100.0), (date(90), 110.0)];

        let indicator = BuffettIndicator::new();
        let ratios = indicator.ratio_series(&market, &gdp);

        assert_eq!(ratios.len(), 3);
        assert!((ratios[0].1 - 150.0).abs() < 1e-9);
        // 45일차 GDP 보간값 105
        assert!((ratios[1].1 - 160.0 / 105.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_current_status_requires_min_periods() {
        let (market, gdp) = synthetic_inputs(100);
        let indicator = BuffettIndicator::new();

        let err = indicator.current_status(&market, &gdp).unwrap_err();
        assert!(matches!(err, AnalyticsError::InsufficientData(_)));
    }

    #[test]
    fn test_current_status_flat_ratio_is_fair_value() {
        // 시장과 GDP가 같은 비율로 유지되면 Z-score ≈ 0
        let days = 600;
        let market: Vec<(NaiveDate, f64)> = (0..days).map(|i| (date(i), 150.0)).collect();
        let gdp: Vec<(NaiveDate, f64)> =
            (0..=(days / 90)).map(|q| (date(q * 90), 100.0)).collect();

        let indicator = BuffettIndicator::new();
        let status = indicator.current_status(&market, &gdp).unwrap();

        assert!((status.current_ratio - 150.0).abs() < 1e-9);
        assert!((status.z_score).abs() < 1e-9);
        assert_eq!(status.market_status, MarketStatus::FairValue);
        assert!((status.deviation_from_trend).abs() < 1e-9);
    }

    #[test]
    fn test_current_status_detects_overvaluation() {
        // 마지막 구간에서 시장이 급등하면 과대평가로 분류
        // (GDP 보간 범위가 마지막 분기 관측일까지이므로 급등 구간을 넉넉히 잡는다)
        let days = 700;
        let mut market: Vec<(NaiveDate, f64)> = (0..days).map(|i| (date(i), 150.0)).collect();
        let len = market.len();
        for point in market.iter_mut().skip(len - 100) {
            point.1 = 220.0;
        }
        let gdp: Vec<(NaiveDate, f64)> =
            (0..=(days / 90)).map(|q| (date(q * 90), 100.0)).collect();

        let indicator = BuffettIndicator::new();
        let status = indicator.current_status(&market, &gdp).unwrap();

        assert!(status.z_score > 1.0);
        assert!(matches!(
            status.market_status,
            MarketStatus::Overvalued | MarketStatus::VeryOvervalued
        ));
        assert!(status.deviation_from_trend > 0.0);
        assert!(status.upper_2std > status.trend_value);
        assert!(status.lower_2std < status.trend_value);
    }
}
