//! 외부 데이터 제공자.

use async_trait::async_trait;

use brief_core::domain::DailyBar;

use crate::error::Result;

pub mod fred;
pub mod krx;
pub mod news;
pub mod options;
pub mod yahoo;

/// 일봉 시계열 제공자 인터페이스.
///
/// 시세 소스를 교체하거나 테스트에서 고정 데이터를 주입할 때 사용하는
/// 시임입니다. 기본 구현은 [`yahoo::YahooHistoryProvider`]입니다.
#[async_trait]
pub trait DailyHistoryProvider: Send + Sync {
    /// 심볼의 일봉 조회 (range: "5d", "1mo", "1y", "max" 등).
    async fn get_daily_history(&self, symbol: &str, range: &str) -> Result<Vec<DailyBar>>;
}
