//! 환율 요약 통계.

use brief_core::domain::{DailyBar, ForexPoint};
use rust_decimal::prelude::ToPrimitive;

use crate::error::{AnalyticsError, Result};

/// 환율 일봉을 요약으로 변환합니다.
pub fn summarize(bars: &[DailyBar]) -> Result<ForexPoint> {
    let latest = bars
        .last()
        .ok_or_else(|| AnalyticsError::EmptySeries("환율".to_string()))?;
    let prev = if bars.len() > 1 {
        &bars[bars.len() - 2]
    } else {
        latest
    };

    let rate = latest
        .close
        .to_f64()
        .ok_or_else(|| AnalyticsError::InvalidInput("환율 변환 실패".to_string()))?;
    let prev_rate = prev.close.to_f64().unwrap_or(rate);

    let change_pct = if prev_rate.abs() <= f64::EPSILON {
        0.0
    } else {
        (rate - prev_rate) / prev_rate * 100.0
    };

    let year_high = bars
        .iter()
        .filter_map(|b| b.high.to_f64())
        .fold(f64::MIN, f64::max);
    let year_low = bars
        .iter()
        .filter_map(|b| b.low.to_f64())
        .fold(f64::MAX, f64::min);

    Ok(ForexPoint {
        rate,
        change_pct,
        year_high,
        year_low,
    })
}
