//! DeepSearch 뉴스 API 제공자.
//!
//! 국내 경제 / 글로벌 경제 / 글로벌 비즈니스 세 카테고리의 당일 기사를
//! 조회합니다. 카테고리별로 독립적으로 실패할 수 있으며, 실패한
//! 카테고리는 빈 목록으로 강등됩니다.
//!
//! ## 엔드포인트
//! - `/v1/articles/economy`: 국내 경제
//! - `/v1/global-articles/economy`: 글로벌 경제
//! - `/v1/global-articles/business`: 글로벌 비즈니스

use serde::Deserialize;
use tracing::{info, warn};

use brief_core::domain::{NewsDigest, NewsItem};

use crate::error::{DataError, Result};

/// 글로벌 뉴스 섹션.
#[derive(Debug, Clone, Copy)]
pub enum GlobalSection {
    /// 경제
    Economy,
    /// 비즈니스
    Business,
}

impl GlobalSection {
    fn path(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Business => "business",
        }
    }
}

/// 기사 응답 래퍼.
#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    #[serde(default)]
    data: Vec<RawArticle>,
}

/// 기사 원본 행.
#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    title_ko: Option<String>,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    summary_ko: Option<String>,
}

impl From<RawArticle> for NewsItem {
    fn from(raw: RawArticle) -> Self {
        NewsItem {
            title: raw.title,
            title_ko: raw.title_ko.filter(|t| !t.is_empty()),
            publisher: raw.publisher,
            published_at: raw.published_at,
            summary: raw.summary,
            summary_ko: raw.summary_ko.filter(|s| !s.is_empty()),
        }
    }
}

/// DeepSearch 뉴스 클라이언트.
#[derive(Clone)]
pub struct NewsProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    page_size: usize,
}

impl NewsProvider {
    /// 새로운 클라이언트 생성.
    pub fn new(api_key: impl Into<String>, page_size: usize) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: "https://api-v2.deepsearch.com".to_string(),
            page_size,
        }
    }

    /// 테스트용 base URL 교체.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 국내 경제 뉴스 조회.
    pub async fn fetch_kr_economic(&self, date: &str) -> Result<Vec<NewsItem>> {
        let url = format!("{}/v1/articles/economy", self.base_url);
        self.fetch_articles(&url, date).await
    }

    /// 글로벌 뉴스 조회.
    pub async fn fetch_global(&self, section: GlobalSection, date: &str) -> Result<Vec<NewsItem>> {
        let url = format!("{}/v1/global-articles/{}", self.base_url, section.path());
        self.fetch_articles(&url, date).await
    }

    /// 모든 카테고리 뉴스 수집.
    ///
    /// 카테고리별로 독립 강등: 실패한 카테고리는 경고 로그 후 빈 목록.
    pub async fn fetch_all(&self, date: &str) -> NewsDigest {
        let kr_economic = self
            .fetch_kr_economic(date)
            .await
            .unwrap_or_else(|e| {
                warn!("국내 경제 뉴스 수집 실패: {}", e);
                Vec::new()
            });
        let global_economic = self
            .fetch_global(GlobalSection::Economy, date)
            .await
            .unwrap_or_else(|e| {
                warn!("글로벌 경제 뉴스 수집 실패: {}", e);
                Vec::new()
            });
        let global_business = self
            .fetch_global(GlobalSection::Business, date)
            .await
            .unwrap_or_else(|e| {
                warn!("글로벌 비즈니스 뉴스 수집 실패: {}", e);
                Vec::new()
            });

        NewsDigest {
            kr_economic,
            global_economic,
            global_business,
        }
    }

    async fn fetch_articles(&self, url: &str, date: &str) -> Result<Vec<NewsItem>> {
        info!("뉴스 조회: {} ({})", url, date);

        let page_size = self.page_size.to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("date_from", date),
                ("date_to", date),
                ("page_size", page_size.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DataError::ApiError {
                symbol: url.to_string(),
                message: status.to_string(),
            });
        }

        let data: ArticlesResponse = response
            .json()
            .await
            .map_err(|e| DataError::ParseError(format!("뉴스 응답 파싱 실패: {}", e)))?;

        Ok(data.data.into_iter().map(NewsItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": [
            {
                "title": "Fed signals patience on rate cuts",
                "title_ko": "연준, 금리 인하에 신중론",
                "publisher": "Reuters",
                "published_at": "2025-01-15 08:30",
                "summary": "The Federal Reserve signaled it is in no hurry to cut rates.",
                "summary_ko": "연준이 금리 인하를 서두르지 않겠다는 신호를 보냈다."
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_kr_economic() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/articles/economy")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("date_from".into(), "2025-01-15".into()),
                mockito::Matcher::UrlEncoded("page_size".into(), "5".into()),
                mockito::Matcher::UrlEncoded("api_key".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE)
            .create_async()
            .await;

        let provider = NewsProvider::new("test-key", 5).with_base_url(server.url());
        let items = provider.fetch_kr_economic("2025-01-15").await.unwrap();

        mock.assert_async().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display_title(), "연준, 금리 인하에 신중론");
        assert_eq!(items[0].publisher, "Reuters");
    }

    #[tokio::test]
    async fn test_fetch_all_degrades_per_category() {
        let mut server = mockito::Server::new_async().await;
        // 국내 경제만 성공, 글로벌 두 카테고리는 500
        let _kr = server
            .mock("GET", "/v1/articles/economy")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE)
            .create_async()
            .await;
        let _global = server
            .mock("GET", mockito::Matcher::Regex(r"^/v1/global-articles/.*$".into()))
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let provider = NewsProvider::new("test-key", 5).with_base_url(server.url());
        let digest = provider.fetch_all("2025-01-15").await;

        assert_eq!(digest.kr_economic.len(), 1);
        assert!(digest.global_economic.is_empty());
        assert!(digest.global_business.is_empty());
        assert!(!digest.is_empty());
    }
}
