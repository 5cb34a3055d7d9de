//! 리포트 생성 파이프라인.
//!
//! 섹션별 수집은 순차적으로 진행되며, 각 섹션의 실패는 로그 후 해당
//! 섹션만 플레이스홀더로 강등됩니다. 최종 리포트 파일 쓰기 실패만
//! 호출자에게 전파되는 치명적 에러입니다.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{Duration, NaiveDate};
use tracing::{error, info, warn};

use brief_analytics::{forex, market, treasury, BuffettIndicator, OptionAnalyzer};
use brief_core::config::{
    IndexSpec, ReportConfig, BUFFETT_START_DATE, CURRENCY_PAIRS, DATE_FORMAT,
    ECONOMIC_INDICATORS, KR_INDICES, OPTION_UNDERLYINGS, US_INDICES, US_TREASURIES,
    WILSHIRE_SYMBOL,
};
use brief_core::domain::{
    BuffettStatus, DailyBar, EconomicEvent, ForexPoint, MarketQuote, NewsDigest, OptionAnalysis,
    TreasuryPoint,
};
use brief_core::error::{BriefError, BriefResult};
use brief_data::{
    FredProvider, KrxIndexMarket, KrxIndexProvider, NewsProvider, OptionChainProvider,
    YahooHistoryProvider,
};
use brief_report::narrative;
use brief_report::{MarkdownBuilder, PriceChartGenerator, ReportContext};

use crate::stats::SectionStats;

/// 옵션 기간 구조 분석에 사용할 월물 수.
const OPTION_MONTHS: u32 = 3;

/// 수집된 전체 섹션 데이터.
#[derive(Debug, Default)]
pub struct CollectedData {
    /// 미국 지수 요약
    pub us_market: Vec<(String, MarketQuote)>,
    /// 한국 지수 요약
    pub kr_market: Vec<(String, MarketQuote)>,
    /// 국채 요약
    pub treasury: Vec<(String, TreasuryPoint)>,
    /// 환율 요약
    pub forex: Vec<(String, ForexPoint)>,
    /// 뉴스
    pub news: NewsDigest,
    /// 경제지표 이벤트
    pub calendar: Vec<EconomicEvent>,
    /// 버핏 지표 상태
    pub buffett: Option<BuffettStatus>,
    /// 옵션 분석
    pub options: Vec<(String, OptionAnalysis)>,
    /// 차트용 일봉 (지수별, 차트 윈도우로 절단)
    pub chart_series: Vec<(IndexSpec, Vec<DailyBar>)>,
}

/// 리포트 생성 파이프라인.
pub struct ReportPipeline {
    config: ReportConfig,
    date: String,
    today: NaiveDate,
    yahoo: YahooHistoryProvider,
    option_chains: OptionChainProvider,
    krx: Option<KrxIndexProvider>,
}

impl ReportPipeline {
    /// 새로운 파이프라인 생성.
    pub fn new(config: ReportConfig, date: Option<String>) -> BriefResult<Self> {
        let date = date.unwrap_or_else(brief_core::config::today_kst);
        let today = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| BriefError::Config(format!("잘못된 날짜 형식 '{}': {}", date, e)))?;

        let yahoo = YahooHistoryProvider::new()
            .map_err(|e| BriefError::Data(e.to_string()))?;
        let krx = config
            .krx_api_key
            .as_deref()
            .map(KrxIndexProvider::new);

        Ok(Self {
            config,
            date,
            today,
            yahoo,
            option_chains: OptionChainProvider::new(),
            krx,
        })
    }

    /// 리포트 날짜 (`%Y-%m-%d`).
    pub fn date(&self) -> &str {
        &self.date
    }

    /// FRED 클라이언트 생성 (키 없으면 에러).
    fn fred(&self) -> BriefResult<FredProvider> {
        Ok(FredProvider::new(self.config.require_fred_key()?))
    }

    /// 뉴스 클라이언트 생성 (키 없으면 에러).
    fn news_provider(&self) -> BriefResult<NewsProvider> {
        Ok(NewsProvider::new(
            self.config.require_news_key()?,
            self.config.news_page_size,
        ))
    }

    /// 차트 윈도우로 일봉 절단.
    fn chart_window(&self, bars: &[DailyBar]) -> Vec<DailyBar> {
        let cutoff = self.today - Duration::days(self.config.chart_lookback_days);
        bars.iter().filter(|b| b.date >= cutoff).cloned().collect()
    }

    /// 지수 집합 수집 (요약 + 차트용 일봉).
    async fn collect_indices(
        &self,
        specs: &[IndexSpec],
        with_volume_ma: bool,
        chart_series: &mut Vec<(IndexSpec, Vec<DailyBar>)>,
    ) -> Vec<(String, MarketQuote)> {
        let mut quotes = Vec::new();

        for spec in specs {
            let mut bars = match self
                .yahoo
                .get_daily_history_days(spec.symbol, self.config.lookback_days)
                .await
            {
                Ok(bars) => bars,
                Err(e) => {
                    error!("{} 시세 수집 실패: {}", spec.name, e);
                    continue;
                }
            };

            self.apply_krx_override(spec, &mut bars).await;

            match market::summarize(&bars, with_volume_ma) {
                Ok(quote) => {
                    chart_series.push((*spec, self.chart_window(&bars)));
                    quotes.push((spec.name.to_string(), quote));
                }
                Err(e) => error!("{} 요약 계산 실패: {}", spec.name, e),
            }
        }

        quotes
    }

    /// 국내 지수의 최근 일봉을 KRX 확정치로 교체.
    async fn apply_krx_override(&self, spec: &IndexSpec, bars: &mut [DailyBar]) {
        let Some(krx) = &self.krx else { return };
        let market = match spec.name {
            "KOSPI" => KrxIndexMarket::Kospi,
            "KOSDAQ" => KrxIndexMarket::Kosdaq,
            _ => return,
        };
        let Some(last_date) = bars.last().map(|b| b.date) else {
            return;
        };

        match krx.fetch_headline_bar(market, last_date).await {
            Ok(Some(krx_bar)) => {
                info!("{} 최근 일봉을 KRX 확정치로 교체 ({})", spec.name, krx_bar.date);
                let idx = bars.len() - 1;
                bars[idx] = krx_bar;
            }
            Ok(None) => {}
            Err(e) => warn!("{} KRX 확정치 조회 실패: {}", spec.name, e),
        }
    }

    /// 미국 시장 섹션만 수집 (섹션 미리보기용).
    pub async fn collect_us_market(&self) -> Vec<(String, MarketQuote)> {
        let mut charts = Vec::new();
        self.collect_indices(US_INDICES, false, &mut charts).await
    }

    /// 한국 시장 섹션만 수집 (섹션 미리보기용).
    pub async fn collect_kr_market(&self) -> Vec<(String, MarketQuote)> {
        let mut charts = Vec::new();
        self.collect_indices(KR_INDICES, true, &mut charts).await
    }

    /// 국채 수익률 수집.
    pub async fn collect_treasury(&self) -> Vec<(String, TreasuryPoint)> {
        // 기준금리는 한 번만 조회하고, 실패하면 스프레드 없이 진행
        let fed_rate = match self.fred() {
            Ok(fred) => match fred.latest_fed_rate().await {
                Ok(rate) => Some(rate),
                Err(e) => {
                    warn!("기준금리 조회 실패: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        let mut points = Vec::new();
        for spec in US_TREASURIES {
            let bars = match self
                .yahoo
                .get_daily_history_days(spec.symbol, self.config.lookback_days)
                .await
            {
                Ok(bars) => bars,
                Err(e) => {
                    error!("{} 수익률 수집 실패: {}", spec.name, e);
                    continue;
                }
            };

            match treasury::summarize(&bars, fed_rate) {
                Ok(point) => points.push((spec.name.to_string(), point)),
                Err(e) => error!("{} 요약 계산 실패: {}", spec.name, e),
            }
        }

        points
    }

    /// 환율 수집.
    pub async fn collect_forex(&self) -> Vec<(String, ForexPoint)> {
        let mut points = Vec::new();

        for pair in CURRENCY_PAIRS {
            // "USD/KRW" → "USDKRW=X"
            let symbol = format!("{}=X", pair.replace('/', ""));

            let bars = match self
                .yahoo
                .get_daily_history_days(&symbol, self.config.lookback_days)
                .await
            {
                Ok(bars) => bars,
                Err(e) => {
                    error!("{} 환율 수집 실패: {}", pair, e);
                    continue;
                }
            };

            match forex::summarize(&bars) {
                Ok(point) => points.push((pair.to_string(), point)),
                Err(e) => error!("{} 요약 계산 실패: {}", pair, e),
            }
        }

        points
    }

    /// 뉴스 수집.
    pub async fn collect_news(&self) -> NewsDigest {
        match self.news_provider() {
            Ok(provider) => provider.fetch_all(&self.date).await,
            Err(e) => {
                warn!("{}", e);
                NewsDigest::default()
            }
        }
    }

    /// 경제지표 수집 (최근 발표치).
    pub async fn collect_calendar(&self) -> Vec<EconomicEvent> {
        let fred = match self.fred() {
            Ok(fred) => fred,
            Err(e) => {
                warn!("{}", e);
                return Vec::new();
            }
        };

        let start = self.today - Duration::days(self.config.calendar_lookback_days);
        let mut events = Vec::new();

        for spec in ECONOMIC_INDICATORS {
            let points = match fred
                .get_series(spec.series_id, Some(start), Some(self.today))
                .await
            {
                Ok(points) => points,
                Err(e) => {
                    warn!("{} 지표 조회 실패: {}", spec.series_id, e);
                    continue;
                }
            };

            let Some(&(date, actual)) = points.last() else {
                continue;
            };
            let previous = points
                .len()
                .checked_sub(2)
                .and_then(|i| points.get(i))
                .map(|(_, v)| *v);

            let description = fred
                .get_series_title(spec.series_id)
                .await
                .unwrap_or_else(|_| spec.name_ko.to_string());

            events.push(EconomicEvent {
                date,
                series_id: spec.series_id.to_string(),
                name: spec.name_ko.to_string(),
                actual,
                previous,
                forecast: None,
                importance: spec.importance,
                description,
            });
        }

        events
    }

    /// 버핏 지표 수집.
    pub async fn collect_buffett(&self) -> Option<BuffettStatus> {
        let fred = match self.fred() {
            Ok(fred) => fred,
            Err(e) => {
                warn!("{}", e);
                return None;
            }
        };

        let start = NaiveDate::parse_from_str(BUFFETT_START_DATE, DATE_FORMAT).ok()?;

        let market = match self.yahoo.get_close_series(WILSHIRE_SYMBOL, "max").await {
            Ok(series) => series
                .into_iter()
                .filter(|(date, _)| *date >= start)
                .collect::<Vec<_>>(),
            Err(e) => {
                error!("Wilshire 5000 수집 실패: {}", e);
                return None;
            }
        };

        let gdp = match fred.get_series("GDP", Some(start), None).await {
            Ok(series) => series,
            Err(e) => {
                error!("GDP 수집 실패: {}", e);
                return None;
            }
        };

        match BuffettIndicator::new().current_status(&market, &gdp) {
            Ok(status) => Some(status),
            Err(e) => {
                error!("버핏 지표 계산 실패: {}", e);
                None
            }
        }
    }

    /// 옵션 시장 수집/분석.
    pub async fn collect_options(&self) -> Vec<(String, OptionAnalysis)> {
        let analyzer = OptionAnalyzer::new();
        let mut results = Vec::new();

        for (name, symbol) in OPTION_UNDERLYINGS {
            match self
                .option_chains
                .monthly_chains(symbol, OPTION_MONTHS, self.today)
                .await
            {
                Ok(chains) if !chains.is_empty() => {
                    info!("{} 옵션 체인 {} 개 수집", name, chains.len());
                    results.push((name.to_string(), analyzer.analyze(&chains)));
                }
                Ok(_) => warn!("{} 옵션 체인 없음", name),
                Err(e) => error!("{} 옵션 수집 실패: {}", name, e),
            }
        }

        results
    }

    /// 전체 섹션 수집.
    pub async fn collect_all(&self) -> (CollectedData, SectionStats) {
        info!("데이터 수집 시작: {}", self.date);
        let started = Instant::now();

        let mut stats = SectionStats::new();
        let mut data = CollectedData::default();

        data.kr_market = self
            .collect_indices(KR_INDICES, true, &mut data.chart_series)
            .await;
        stats.record(!data.kr_market.is_empty());

        data.us_market = self
            .collect_indices(US_INDICES, false, &mut data.chart_series)
            .await;
        stats.record(!data.us_market.is_empty());

        data.treasury = self.collect_treasury().await;
        stats.record(!data.treasury.is_empty());

        data.forex = self.collect_forex().await;
        stats.record(!data.forex.is_empty());

        data.news = self.collect_news().await;
        stats.record(!data.news.is_empty());

        data.calendar = self.collect_calendar().await;
        stats.record(!data.calendar.is_empty());

        data.buffett = self.collect_buffett().await;
        stats.record(data.buffett.is_some());

        data.options = self.collect_options().await;
        stats.record(!data.options.is_empty());

        stats.elapsed = started.elapsed();
        (data, stats)
    }

    /// 차트 생성. 성공한 차트 수를 반환합니다.
    pub fn generate_charts(&self, chart_series: &[(IndexSpec, Vec<DailyBar>)]) -> usize {
        let generator = PriceChartGenerator::new();
        let mut success = 0;

        for (spec, bars) in chart_series {
            let path = self.config.image_filepath(spec.name, &self.date);
            let title = format!("{} 가격 추이", spec.chart_title);

            match generator.generate(bars, &title, &path) {
                Ok(()) => success += 1,
                Err(e) => error!("{} 차트 생성 실패: {}", spec.name, e),
            }
        }

        success
    }

    /// 수집 데이터로 렌더 컨텍스트 구성.
    fn build_context(&self, data: &CollectedData) -> ReportContext {
        ReportContext {
            us_market_summary: narrative::market::us_market_summary(&data.us_market),
            kr_market_summary: narrative::market::kr_market_summary(&data.kr_market),
            treasury_summary: narrative::treasury::treasury_summary(&data.treasury),
            forex_summary: narrative::forex::forex_summary(&data.forex),
            news_summary: narrative::news::news_summary(&data.news),
            calendar_summary: narrative::calendar::calendar_summary(&data.calendar),
            buffett_summary: narrative::buffett::buffett_summary(data.buffett.as_ref()),
            options_summary: narrative::options::options_summary(&data.options),
            us_market: data.us_market.clone(),
            kr_market: data.kr_market.clone(),
            treasury: data.treasury.clone(),
            forex: data.forex.clone(),
            buffett: data.buffett.clone(),
        }
    }

    /// 전체 리포트 생성 (수집 → 차트 → 내러티브 → 저장).
    pub async fn generate(&self, skip_charts: bool) -> BriefResult<PathBuf> {
        let (data, stats) = self.collect_all().await;
        stats.log_summary("섹션 수집");

        if skip_charts {
            info!("차트 생성 건너뜀 (--skip-charts)");
        } else {
            let generated = self.generate_charts(&data.chart_series);
            if generated < data.chart_series.len() {
                warn!(
                    "일부 차트 생성 실패 ({}/{})",
                    generated,
                    data.chart_series.len()
                );
            } else {
                info!("차트 {} 개 생성 완료", generated);
            }
        }

        let context = self.build_context(&data);
        let builder = MarkdownBuilder::new(self.date.clone(), self.config.clone());
        let report = builder.build_report(&context);

        let path = builder.save_report(&report)?;
        info!("리포트 생성 완료: {}", path.display());
        Ok(path)
    }
}
