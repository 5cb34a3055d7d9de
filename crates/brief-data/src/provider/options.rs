//! Yahoo Finance 옵션 체인 제공자.
//!
//! `query2.finance.yahoo.com/v7/finance/options/{symbol}` JSON API로
//! 만기일 목록과 콜/풋 체인을 조회합니다.
//!
//! # 만기 선택
//!
//! - 근월물: 만기 파라미터 없이 호출하면 가장 가까운 만기가 내려옵니다.
//! - 월물: 각 월의 마지막 금요일을 목표로, 실제 상장된 만기 중 가장
//!   가까운 것을 선택합니다 (중복 제거).

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info};

use brief_core::domain::{OptionChain, OptionContract};

use crate::error::{DataError, Result};

/// 옵션 API가 봇 차단을 피하기 위해 사용하는 User-Agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct OptionsEnvelope {
    #[serde(rename = "optionChain")]
    option_chain: OptionChainResult,
}

#[derive(Debug, Deserialize)]
struct OptionChainResult {
    result: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    quote: RawQuote,
    #[serde(default)]
    options: Vec<RawOptions>,
}

#[derive(Debug, Default, Deserialize)]
struct RawQuote {
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawOptions {
    #[serde(rename = "expirationDate")]
    expiration_date: i64,
    #[serde(default)]
    calls: Vec<RawContract>,
    #[serde(default)]
    puts: Vec<RawContract>,
}

#[derive(Debug, Deserialize)]
struct RawContract {
    strike: f64,
    #[serde(default)]
    volume: Option<u64>,
    #[serde(rename = "openInterest", default)]
    open_interest: Option<u64>,
    #[serde(rename = "impliedVolatility", default)]
    implied_volatility: Option<f64>,
}

impl From<RawContract> for OptionContract {
    fn from(raw: RawContract) -> Self {
        OptionContract {
            strike: raw.strike,
            volume: raw.volume.unwrap_or(0),
            open_interest: raw.open_interest.unwrap_or(0),
            implied_volatility: raw.implied_volatility,
        }
    }
}

/// Yahoo Finance 옵션 체인 클라이언트.
#[derive(Clone)]
pub struct OptionChainProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OptionChainProvider {
    /// 새로운 클라이언트 생성.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: "https://query2.finance.yahoo.com".to_string(),
        }
    }

    /// 테스트용 base URL 교체.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 사용 가능한 만기일 목록 조회.
    pub async fn expiry_dates(&self, symbol: &str) -> Result<Vec<NaiveDate>> {
        let result = self.fetch_raw(symbol, None).await?;
        Ok(result
            .expiration_dates
            .iter()
            .filter_map(|ts| timestamp_to_date(*ts))
            .collect())
    }

    /// 근월물 옵션 체인 조회.
    pub async fn nearest_chain(&self, symbol: &str) -> Result<OptionChain> {
        self.fetch_chain(symbol, None).await
    }

    /// 월간 만기 옵션 체인 조회.
    ///
    /// `months`개월에 대해 각 월의 마지막 금요일에 가장 가까운 상장 만기를
    /// 선택합니다. 서로 다른 목표가 같은 만기로 수렴하면 한 번만
    /// 조회합니다.
    pub async fn monthly_chains(
        &self,
        symbol: &str,
        months: u32,
        today: NaiveDate,
    ) -> Result<Vec<OptionChain>> {
        let expiries = self.expiry_dates(symbol).await?;
        if expiries.is_empty() {
            return Err(DataError::NoData(format!("{} 만기일 없음", symbol)));
        }

        let mut selected: Vec<NaiveDate> = Vec::new();
        for i in 0..months {
            let target_month = today
                .checked_add_months(Months::new(i))
                .unwrap_or(today);
            let target = last_friday_of_month(target_month.year(), target_month.month());

            if let Some(closest) = expiries
                .iter()
                .min_by_key(|e| (**e - target).num_days().abs())
            {
                if !selected.contains(closest) {
                    selected.push(*closest);
                }
            }
        }

        let mut chains = Vec::new();
        for expiry in selected {
            match self.fetch_chain(symbol, Some(expiry)).await {
                Ok(chain) if !chain.calls.is_empty() && !chain.puts.is_empty() => {
                    chains.push(chain);
                }
                Ok(_) => debug!("{} {} 만기 체인 비어 있음", symbol, expiry),
                Err(e) => debug!("{} {} 만기 체인 조회 실패: {}", symbol, expiry, e),
            }
        }

        Ok(chains)
    }

    /// 특정 만기(없으면 근월물)의 옵션 체인 조회.
    pub async fn fetch_chain(&self, symbol: &str, expiry: Option<NaiveDate>) -> Result<OptionChain> {
        let result = self.fetch_raw(symbol, expiry).await?;

        let underlying_price = result.quote.regular_market_price.unwrap_or(0.0);
        let options = result
            .options
            .into_iter()
            .next()
            .ok_or_else(|| DataError::NoData(format!("{} 옵션 체인 없음", symbol)))?;

        let expiry_date = timestamp_to_date(options.expiration_date)
            .ok_or_else(|| DataError::ParseError("만기일 변환 실패".to_string()))?;

        Ok(OptionChain {
            expiry: expiry_date,
            calls: options.calls.into_iter().map(OptionContract::from).collect(),
            puts: options.puts.into_iter().map(OptionContract::from).collect(),
            underlying_price,
        })
    }

    async fn fetch_raw(&self, symbol: &str, expiry: Option<NaiveDate>) -> Result<RawResult> {
        let url = format!("{}/v7/finance/options/{}", self.base_url, symbol);
        info!("옵션 체인 조회: {} (만기: {:?})", symbol, expiry);

        let mut request = self.client.get(&url).header("User-Agent", USER_AGENT);
        if let Some(expiry) = expiry {
            let ts = expiry
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp())
                .unwrap_or(0);
            request = request.query(&[("date", ts.to_string())]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DataError::ApiError {
                symbol: symbol.to_string(),
                message: status.to_string(),
            });
        }

        let envelope: OptionsEnvelope = response
            .json()
            .await
            .map_err(|e| DataError::ParseError(format!("옵션 응답 파싱 실패: {}", e)))?;

        envelope
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::NoData(format!("{} 옵션 결과 없음", symbol)))
    }
}

impl Default for OptionChainProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix timestamp를 날짜로 변환.
fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// 해당 월의 마지막 금요일.
pub fn last_friday_of_month(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid month start");
    let last_day = first_of_next - Duration::days(1);

    // 금요일 = num_days_from_monday() == 4
    let offset = (last_day.weekday().num_days_from_monday() + 7 - 4) % 7;
    last_day - Duration::days(offset as i64)
}
