//! 시장 지수 시세 레코드.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 일봉 (OHLCV).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: u64,
}

/// 시장 지수 요약 시세.
///
/// 조회 윈도우(52주)에 대한 파생 통계를 포함합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    /// 종가
    pub close: Decimal,
    /// 당일 거래량
    pub volume: u64,
    /// 전일 대비 변동률 (%)
    pub change_pct: f64,
    /// 52주 최고가
    pub year_high: Decimal,
    /// 52주 최저가
    pub year_low: Decimal,
    /// 52주 최고가 대비 비율 (%, 0 이하)
    pub year_high_ratio: f64,
    /// 20일 평균 거래량 (데이터 부족 시 None)
    pub volume_ma20: Option<f64>,
    /// 당일 거래량 / 20일 평균 거래량
    pub volume_ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_daily_bar_serde_roundtrip() {
        let bar = DailyBar {
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            open: dec!(2500.1),
            high: dec!(2520.0),
            low: dec!(2490.5),
            close: dec!(2510.3),
            volume: 350_000_000,
        };

        let json = serde_json::to_string(&bar).unwrap();
        let parsed: DailyBar = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.close, bar.close);
        assert_eq!(parsed.volume, bar.volume);
    }
}
