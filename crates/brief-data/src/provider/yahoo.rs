//! Yahoo Finance 일봉 시세 제공자.
//!
//! 지수, 국채 수익률, 환율, Wilshire 5000 등 모든 Yahoo 심볼의 일봉을
//! 조회합니다.
//!
//! # 심볼 형식
//!
//! - 미국 지수: "^GSPC", "^IXIC", "^DJI"
//! - 한국 지수: "^KS11" (코스피), "^KQ11" (코스닥)
//! - 국채 수익률: "^TNX" (10년), "^TYX" (30년), "2YY=F" (2년)
//! - 환율: "USDKRW=X", "EURKRW=X"
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use brief_data::YahooHistoryProvider;
//!
//! let provider = YahooHistoryProvider::new()?;
//! let bars = provider.get_daily_history_days("^KS11", 365).await?;
//! ```

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use yahoo_finance_api as yahoo;

use brief_core::domain::DailyBar;

use crate::error::{DataError, Result};
use crate::provider::DailyHistoryProvider;

/// Yahoo Finance 일봉 제공자.
pub struct YahooHistoryProvider {
    connector: yahoo::YahooConnector,
}

impl YahooHistoryProvider {
    /// 새로운 제공자 생성.
    pub fn new() -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DataError::ConnectionError(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self { connector })
    }

    /// 조회 일수를 Yahoo Finance range 문자열로 변환.
    pub fn range_for_days(days: i64) -> &'static str {
        if days <= 5 {
            "5d"
        } else if days <= 30 {
            "1mo"
        } else if days <= 90 {
            "3mo"
        } else if days <= 180 {
            "6mo"
        } else if days <= 365 {
            "1y"
        } else if days <= 730 {
            "2y"
        } else if days <= 1825 {
            "5y"
        } else if days <= 3650 {
            "10y"
        } else {
            "max"
        }
    }

    /// 일봉 조회 (조회 일수 기준).
    pub async fn get_daily_history_days(&self, symbol: &str, days: i64) -> Result<Vec<DailyBar>> {
        self.fetch_daily_history(symbol, Self::range_for_days(days))
            .await
    }

    /// 일봉 조회 (range 문자열 기준: "5d", "1mo", "1y", "max" 등).
    async fn fetch_daily_history(&self, symbol: &str, range: &str) -> Result<Vec<DailyBar>> {
        info!("Yahoo Finance 일봉 조회: {} (range: {})", symbol, range);

        let response = self
            .connector
            .get_quote_range(symbol, "1d", range)
            .await
            .map_err(|e| DataError::ApiError {
                symbol: symbol.to_string(),
                message: format!("{}", e),
            })?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::ParseError(format!("Quote 파싱 오류 ({}): {}", symbol, e)))?;

        if quotes.is_empty() {
            warn!("Yahoo Finance: {} 데이터 없음", symbol);
            return Err(DataError::NoData(format!("심볼 {} 데이터 없음", symbol)));
        }

        debug!("{} 캔들 {} 개 수신", symbol, quotes.len());

        let mut bars: Vec<DailyBar> = quotes
            .iter()
            .filter(|q| q.close > 0.0)
            .filter_map(|q| Self::quote_to_bar(q))
            .collect();

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        if bars.is_empty() {
            return Err(DataError::NoData(format!(
                "심볼 {} 유효한 캔들 없음",
                symbol
            )));
        }

        Ok(bars)
    }

    /// 종가 시계열 조회 (날짜, f64 종가).
    ///
    /// 버핏 지표처럼 종가만 필요한 계산 입력용입니다.
    pub async fn get_close_series(
        &self,
        symbol: &str,
        range: &str,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        use rust_decimal::prelude::ToPrimitive;

        let bars = self.fetch_daily_history(symbol, range).await?;
        Ok(bars
            .iter()
            .filter_map(|b| b.close.to_f64().map(|c| (b.date, c)))
            .collect())
    }

    /// Yahoo Quote를 일봉으로 변환.
    fn quote_to_bar(quote: &yahoo::Quote) -> Option<DailyBar> {
        let date = Utc
            .timestamp_opt(quote.timestamp, 0)
            .single()?
            .date_naive();

        Some(DailyBar {
            date,
            open: Decimal::from_f64_retain(quote.open).unwrap_or_default(),
            high: Decimal::from_f64_retain(quote.high).unwrap_or_default(),
            low: Decimal::from_f64_retain(quote.low).unwrap_or_default(),
            close: Decimal::from_f64_retain(quote.close).unwrap_or_default(),
            volume: quote.volume,
        })
    }
}

#[async_trait]
impl DailyHistoryProvider for YahooHistoryProvider {
    async fn get_daily_history(&self, symbol: &str, range: &str) -> Result<Vec<DailyBar>> {
        self.fetch_daily_history(symbol, range).await
    }
}
