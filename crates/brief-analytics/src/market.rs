//! 시장 지수 요약 통계.
//!
//! 일봉 시계열에서 전일 대비 변동률, 52주 범위, 거래량 이동평균 비율을
//! 계산해 [`MarketQuote`]를 생성합니다.

use brief_core::domain::{DailyBar, MarketQuote};
use rust_decimal::prelude::ToPrimitive;

use crate::error::{AnalyticsError, Result};
use crate::series::tail_mean;

/// 거래량 이동평균 기간 (거래일).
pub const VOLUME_MA_WINDOW: usize = 20;

/// 일봉 시계열을 요약 시세로 변환합니다.
///
/// `with_volume_ma`가 true면 20일 평균 거래량과 당일 거래량 비율을 함께
/// 계산합니다 (국내 지수 섹션에서 사용).
///
/// 일봉이 하나뿐이면 전일 종가는 당일 종가로 간주되어 변동률이 0이
/// 됩니다.
pub fn summarize(bars: &[DailyBar], with_volume_ma: bool) -> Result<MarketQuote> {
    let latest = bars
        .last()
        .ok_or_else(|| AnalyticsError::EmptySeries("시장 일봉".to_string()))?;
    let prev = if bars.len() > 1 {
        &bars[bars.len() - 2]
    } else {
        latest
    };

    let latest_close = latest
        .close
        .to_f64()
        .ok_or_else(|| AnalyticsError::InvalidInput("종가 변환 실패".to_string()))?;
    let prev_close = prev.close.to_f64().unwrap_or(latest_close);

    let change_pct = if prev_close.abs() <= f64::EPSILON {
        0.0
    } else {
        (latest_close - prev_close) / prev_close * 100.0
    };

    let year_high = bars.iter().map(|b| b.high).max().unwrap_or(latest.close);
    let year_low = bars.iter().map(|b| b.low).min().unwrap_or(latest.close);

    let year_high_f = year_high.to_f64().unwrap_or(latest_close);
    let year_high_ratio = if year_high_f.abs() <= f64::EPSILON {
        0.0
    } else {
        (latest_close - year_high_f) / year_high_f * 100.0
    };

    let (volume_ma20, volume_ratio) = if with_volume_ma {
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
        match tail_mean(&volumes, VOLUME_MA_WINDOW) {
            Some(ma) if ma > 0.0 => (Some(ma), Some(latest.volume as f64 / ma)),
            Some(ma) => (Some(ma), None),
            None => (None, None),
        }
    } else {
        (None, None)
    };

    Ok(MarketQuote {
        close: latest.close,
        volume: latest.volume,
        change_pct,
        year_high,
        year_low,
        year_high_ratio,
        volume_ma20,
        volume_ratio,
    })
}
