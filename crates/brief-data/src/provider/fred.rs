//! FRED (St. Louis Fed) 경제 시계열 제공자.
//!
//! GDP, 연방기금금리 목표, 경제지표 캘린더 시리즈를 조회합니다.
//!
//! ## 사용 API
//! - `/fred/series/observations`: 시계열 관측치 (`file_type=json`)
//! - `/fred/series`: 시리즈 메타데이터 (타이틀)
//!
//! 결측치는 `"."` 문자열로 내려오며 건너뜁니다.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{DataError, Result};

/// 연방기금금리 목표 상단 시리즈 ID.
pub const FED_TARGET_UPPER_SERIES: &str = "DFEDTARU";

/// FRED API 클라이언트.
#[derive(Clone)]
pub struct FredProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// 관측치 응답.
#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// 시리즈 메타데이터 응답.
#[derive(Debug, Deserialize)]
struct SeriesResponse {
    seriess: Vec<RawSeries>,
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    title: String,
}

impl FredProvider {
    /// 새로운 클라이언트 생성.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: "https://api.stlouisfed.org".to_string(),
        }
    }

    /// 테스트용 base URL 교체.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 시계열 관측치 조회 (날짜 오름차순).
    pub async fn get_series(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        info!("FRED 시리즈 조회: {}", series_id);

        let url = format!("{}/fred/series/observations", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("series_id", series_id.to_string()),
            ("api_key", self.api_key.clone()),
            ("file_type", "json".to_string()),
        ];
        if let Some(start) = start {
            query.push(("observation_start", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = end {
            query.push(("observation_end", end.format("%Y-%m-%d").to_string()));
        }

        let response = self.client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::ApiError {
                symbol: series_id.to_string(),
                message: format!("{} - {}", status, body),
            });
        }

        let data: ObservationsResponse = response
            .json()
            .await
            .map_err(|e| DataError::ParseError(format!("FRED 응답 파싱 실패: {}", e)))?;

        // 결측치(".")는 건너뛴다
        let mut points: Vec<(NaiveDate, f64)> = data
            .observations
            .iter()
            .filter(|obs| obs.value != ".")
            .filter_map(|obs| {
                let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d").ok()?;
                let value = obs.value.parse::<f64>().ok()?;
                Some((date, value))
            })
            .collect();
        points.sort_by_key(|(date, _)| *date);

        if points.is_empty() {
            return Err(DataError::NoData(format!(
                "시리즈 {} 관측치 없음",
                series_id
            )));
        }

        debug!("{} 관측치 {} 개 수신", series_id, points.len());
        Ok(points)
    }

    /// 시리즈 최신 관측치 조회.
    pub async fn latest_value(&self, series_id: &str) -> Result<(NaiveDate, f64)> {
        let points = self.get_series(series_id, None, None).await?;
        points
            .last()
            .copied()
            .ok_or_else(|| DataError::NoData(format!("시리즈 {} 관측치 없음", series_id)))
    }

    /// 연방기금금리 목표 상단 최신값 조회.
    pub async fn latest_fed_rate(&self) -> Result<f64> {
        let (_, rate) = self.latest_value(FED_TARGET_UPPER_SERIES).await?;
        Ok(rate)
    }

    /// 시리즈 타이틀 조회.
    pub async fn get_series_title(&self, series_id: &str) -> Result<String> {
        let url = format!("{}/fred/series", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DataError::ApiError {
                symbol: series_id.to_string(),
                message: status.to_string(),
            });
        }

        let data: SeriesResponse = response
            .json()
            .await
            .map_err(|e| DataError::ParseError(format!("FRED 시리즈 파싱 실패: {}", e)))?;

        data.seriess
            .into_iter()
            .next()
            .map(|s| s.title)
            .ok_or_else(|| DataError::NoData(format!("시리즈 {} 메타데이터 없음", series_id)))
    }
}
