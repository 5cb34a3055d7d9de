//! 경제지표 이벤트 레코드.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 최근 발표된 경제지표 이벤트.
///
/// FRED 시리즈의 최신 관측치와 직전 관측치로 구성됩니다.
/// FRED는 예측치를 제공하지 않으므로 `forecast`는 다른 소스가 연결된
/// 경우에만 채워집니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicEvent {
    /// 발표(관측) 기준일
    pub date: NaiveDate,
    /// FRED 시리즈 ID
    pub series_id: String,
    /// 한글 지표명
    pub name: String,
    /// 발표치
    pub actual: f64,
    /// 직전 발표치
    pub previous: Option<f64>,
    /// 예상치
    pub forecast: Option<f64>,
    /// 중요도 (1~3)
    pub importance: u8,
    /// 시리즈 설명 (FRED 타이틀)
    pub description: String,
}

impl EconomicEvent {
    /// 직전 발표치 대비 변화율 (%).
    pub fn change_from_previous(&self) -> Option<f64> {
        let previous = self.previous?;
        if previous.abs() <= f64::EPSILON {
            return None;
        }
        Some((self.actual - previous) / previous * 100.0)
    }
}
