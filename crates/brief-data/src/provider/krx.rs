//! KRX Open API 국내 지수 제공자.
//!
//! 한국거래소 Open API에서 코스피/코스닥 지수의 일별 확정치를 조회합니다.
//! Yahoo Finance의 국내 지수는 간혹 지연/보정 전 값이 내려오므로, API 키가
//! 설정된 경우 최근 거래일 일봉을 KRX 확정치로 교체하는 용도로 사용합니다.
//!
//! ## 데이터 소스
//! - `kospi_dd_trd`: KOSPI 시리즈 지수 일별 시세
//! - `kosdaq_dd_trd`: KOSDAQ 시리즈 지수 일별 시세
//!
//! 인증키는 `AUTH_KEY` HTTP 헤더로 전달합니다 (KRX OPEN API 명세 준수).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use brief_core::domain::DailyBar;

use crate::error::{DataError, Result};

/// 국내 지수 시장 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KrxIndexMarket {
    /// 코스피
    Kospi,
    /// 코스닥
    Kosdaq,
}

impl KrxIndexMarket {
    /// 일별 시세 API ID.
    fn api_id(&self) -> &'static str {
        match self {
            Self::Kospi => "kospi_dd_trd",
            Self::Kosdaq => "kosdaq_dd_trd",
        }
    }

    /// 대표 지수명 (응답 필터링용).
    pub fn headline_index(&self) -> &'static str {
        match self {
            Self::Kospi => "코스피",
            Self::Kosdaq => "코스닥",
        }
    }
}

/// API 응답 래퍼.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(rename = "OutBlock_1")]
    out_block: Option<Vec<T>>,
}

/// 지수 일별 시세 원본 행.
#[derive(Debug, Deserialize)]
struct RawIndex {
    #[serde(rename = "BAS_DD")]
    date: String,
    #[serde(rename = "IDX_NM")]
    index_name: String,
    #[serde(rename = "CLSPRC_IDX")]
    close: String,
    #[serde(rename = "OPNPRC_IDX", default)]
    open: Option<String>,
    #[serde(rename = "HGPRC_IDX", default)]
    high: Option<String>,
    #[serde(rename = "LWPRC_IDX", default)]
    low: Option<String>,
    #[serde(rename = "ACC_TRDVOL", default)]
    volume: Option<String>,
}

/// KRX Open API 지수 클라이언트.
#[derive(Clone)]
pub struct KrxIndexProvider {
    client: reqwest::Client,
    auth_key: String,
    base_url: String,
}

impl KrxIndexProvider {
    /// 새로운 클라이언트 생성.
    pub fn new(auth_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            auth_key: auth_key.into(),
            base_url: "https://data-dbg.krx.co.kr".to_string(),
        }
    }

    /// 환경변수 `KRX_API_KEY`에서 인증키를 로드하여 클라이언트 생성.
    pub fn from_env() -> Option<Self> {
        std::env::var("KRX_API_KEY").ok().map(Self::new)
    }

    /// 테스트용 base URL 교체.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 특정 기준일의 대표 지수 일봉 조회.
    ///
    /// 해당 일자에 시세가 없으면(휴장일 등) `Ok(None)`을 반환합니다.
    pub async fn fetch_headline_bar(
        &self,
        market: KrxIndexMarket,
        base_date: NaiveDate,
    ) -> Result<Option<DailyBar>> {
        let bas_dd = base_date.format("%Y%m%d").to_string();
        let url = format!(
            "{}/svc/sample/apis/idx/{}",
            self.base_url,
            market.api_id()
        );

        debug!(api_id = market.api_id(), bas_dd = %bas_dd, "KRX 지수 조회");

        let response = self
            .client
            .get(&url)
            .query(&[("basDd", bas_dd.as_str())])
            .header("AUTH_KEY", &self.auth_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::ApiError {
                symbol: market.api_id().to_string(),
                message: format!("{} - {}", status, body),
            });
        }

        let data: ApiResponse<RawIndex> = response
            .json()
            .await
            .map_err(|e| DataError::ParseError(format!("KRX 응답 파싱 실패: {}", e)))?;

        let headline = market.headline_index();
        let bar = data
            .out_block
            .unwrap_or_default()
            .into_iter()
            .find(|row| row.index_name == headline)
            .and_then(|row| Self::raw_to_bar(&row));

        Ok(bar)
    }

    /// 원본 행을 일봉으로 변환.
    fn raw_to_bar(raw: &RawIndex) -> Option<DailyBar> {
        let date = parse_date_yyyymmdd(&raw.date)?;
        let close = parse_decimal(&raw.close)?;

        Some(DailyBar {
            date,
            open: parse_decimal_opt(&raw.open).unwrap_or(close),
            high: parse_decimal_opt(&raw.high).unwrap_or(close),
            low: parse_decimal_opt(&raw.low).unwrap_or(close),
            close,
            volume: raw
                .volume
                .as_ref()
                .and_then(|v| v.replace(',', "").parse().ok())
                .unwrap_or(0),
        })
    }
}

/// `YYYYMMDD` 문자열을 날짜로 파싱.
fn parse_date_yyyymmdd(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y%m%d").ok()
}

/// 천 단위 구분자가 포함된 숫자 문자열 파싱.
fn parse_decimal(s: &str) -> Option<Decimal> {
    s.replace(',', "").trim().parse().ok()
}

/// Optional 숫자 문자열 파싱.
fn parse_decimal_opt(s: &Option<String>) -> Option<Decimal> {
    s.as_ref().and_then(|v| parse_decimal(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(
            parse_date_yyyymmdd("20250115"),
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
        assert_eq!(parse_decimal("2,510.35"), Some(dec!(2510.35)));
        assert_eq!(parse_decimal("-"), None);
    }

    #[tokio::test]
    async fn test_fetch_headline_bar() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "OutBlock_1": [
                {
                    "BAS_DD": "20250115",
                    "IDX_NM": "코스피 200",
                    "CLSPRC_IDX": "335.12",
                    "OPNPRC_IDX": "333.80",
                    "HGPRC_IDX": "336.00",
                    "LWPRC_IDX": "333.10",
                    "ACC_TRDVOL": "85,000,000"
                },
                {
                    "BAS_DD": "20250115",
                    "IDX_NM": "코스피",
                    "CLSPRC_IDX": "2,510.35",
                    "OPNPRC_IDX": "2,498.10",
                    "HGPRC_IDX": "2,515.77",
                    "LWPRC_IDX": "2,495.02",
                    "ACC_TRDVOL": "350,123,456"
                }
            ]
        }"#;

        let mock = server
            .mock("GET", "/svc/sample/apis/idx/kospi_dd_trd")
            .match_query(mockito::Matcher::UrlEncoded(
                "basDd".into(),
                "20250115".into(),
            ))
            .match_header("AUTH_KEY", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let provider = KrxIndexProvider::new("test-key").with_base_url(server.url());
        let bar = provider
            .fetch_headline_bar(
                KrxIndexMarket::Kospi,
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            )
            .await
            .unwrap()
            .expect("headline bar");

        mock.assert_async().await;
        assert_eq!(bar.close, dec!(2510.35));
        assert_eq!(bar.volume, 350_123_456);
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[tokio::test]
    async fn test_fetch_headline_bar_holiday_returns_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/svc/sample/apis/idx/kosdaq_dd_trd")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"OutBlock_1": []}"#)
            .create_async()
            .await;

        let provider = KrxIndexProvider::new("test-key").with_base_url(server.url());
        let bar = provider
            .fetch_headline_bar(
                KrxIndexMarket::Kosdaq,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )
            .await
            .unwrap();

        assert!(bar.is_none());
    }
}
