//! 국채 수익률 요약 통계.
//!
//! 수익률 일봉에서 전일 대비 변동(%p), 90/180일 평균, 단기/장기 변동성
//! 비율, 기준금리 스프레드를 계산합니다.

use brief_core::domain::{DailyBar, TreasuryPoint};
use rust_decimal::prelude::ToPrimitive;

use crate::error::{AnalyticsError, Result};
use crate::series::{std_dev, tail_mean, tail_std};

/// 단기 변동성 윈도우 (거래일, 약 1개월).
pub const MONTHLY_WINDOW: usize = 20;

/// 수익률 일봉을 국채 요약으로 변환합니다.
pub fn summarize(bars: &[DailyBar], fed_rate: Option<f64>) -> Result<TreasuryPoint> {
    let latest = bars
        .last()
        .ok_or_else(|| AnalyticsError::EmptySeries("국채 수익률".to_string()))?;
    let prev = if bars.len() > 1 {
        &bars[bars.len() - 2]
    } else {
        latest
    };

    let yield_rate = latest
        .close
        .to_f64()
        .ok_or_else(|| AnalyticsError::InvalidInput("수익률 변환 실패".to_string()))?;
    let prev_rate = prev.close.to_f64().unwrap_or(yield_rate);

    let closes: Vec<f64> = bars.iter().filter_map(|b| b.close.to_f64()).collect();
    let highs: Vec<f64> = bars.iter().filter_map(|b| b.high.to_f64()).collect();
    let lows: Vec<f64> = bars.iter().filter_map(|b| b.low.to_f64()).collect();

    let year_high = highs.iter().cloned().fold(f64::MIN, f64::max);
    let year_low = lows.iter().cloned().fold(f64::MAX, f64::min);

    let monthly_volatility = tail_std(&closes, MONTHLY_WINDOW);
    let long_term_volatility = std_dev(&closes);
    let volatility_ratio = if long_term_volatility > 0.0 {
        monthly_volatility / long_term_volatility
    } else {
        0.0
    };

    Ok(TreasuryPoint {
        yield_rate,
        change_bp: yield_rate - prev_rate,
        year_high,
        year_low,
        ma_90: tail_mean(&closes, 90),
        ma_180: tail_mean(&closes, 180),
        monthly_volatility,
        long_term_volatility,
        volatility_ratio,
        fed_spread: fed_rate.map(|rate| yield_rate - rate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal::Decimal;

    fn yield_bar(seq: u32, rate: f64) -> DailyBar {
        let close = Decimal::from_f64(rate).unwrap();
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(seq as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }

    #[test]
    fn test_summarize_change_and_range() {
        let bars = vec![yield_bar(0, 4.20), yield_bar(1, 4.30), yield_bar(2, 4.25)];
        let point = summarize(&bars, Some(5.50)).unwrap();

        assert!((point.yield_rate - 4.25).abs() < 1e-9);
        assert!((point.change_bp - (-0.05)).abs() < 1e-9);
        assert!((point.year_high - 4.30).abs() < 1e-9);
        assert!((point.year_low - 4.20).abs() < 1e-9);
        assert!((point.fed_spread.unwrap() - (-1.25)).abs() < 1e-9);
    }

    #[test]
    fn test_moving_averages_require_window() {
        let bars: Vec<DailyBar> = (0..100).map(|i| yield_bar(i, 4.0)).collect();
        let point = summarize(&bars, None).unwrap();

        assert!(point.ma_90.is_some());
        assert!(point.ma_180.is_none());
        assert!(point.fed_spread.is_none());
    }

    #[test]
    fn test_volatility_ratio_flat_series() {
        // 평탄한 시계열은 장기 변동성이 0이므로 비율도 0
        let bars: Vec<DailyBar> = (0..30).map(|i| yield_bar(i, 4.0)).collect();
        let point = summarize(&bars, None).unwrap();
        assert_eq!(point.volatility_ratio, 0.0);
    }

    #[test]
    fn test_volatility_ratio_recent_spike() {
        // 최근 구간만 출렁이면 단기 변동성이 장기보다 커진다
        let mut bars: Vec<DailyBar> = (0..200).map(|i| yield_bar(i, 4.0)).collect();
        for (k, i) in (200..220).enumerate() {
            let rate = if k % 2 == 0 { 4.5 } else { 3.5 };
            bars.push(yield_bar(i, rate));
        }

        let point = summarize(&bars, None).unwrap();
        assert!(point.volatility_ratio > 1.0);
    }
}
