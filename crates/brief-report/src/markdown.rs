//! 마크다운 리포트 조립.
//!
//! 섹션 순서는 고정입니다:
//! 미국 시장 → 옵션 → 미국 국채 → 한국 시장 → 환율 → 버핏 지표 → 뉴스 →
//! 경제지표. 각 시장/국채/환율 섹션은 요약문 뒤에 항목별 상세 블록을
//! 붙입니다.

use std::fs;
use std::path::PathBuf;

use brief_core::config::ReportConfig;
use brief_core::domain::{BuffettStatus, ForexPoint, MarketQuote, TreasuryPoint};
use brief_core::error::BriefResult;
use brief_core::format::{format_grouped_decimal, format_thousands_u64};
use tracing::info;

/// 렌더링에 필요한 전체 섹션 데이터.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    /// 미국 지수 (이름, 요약) 목록
    pub us_market: Vec<(String, MarketQuote)>,
    /// 미국 시장 요약문
    pub us_market_summary: String,
    /// 옵션 시장 요약문
    pub options_summary: String,
    /// 국채 (만기, 요약) 목록
    pub treasury: Vec<(String, TreasuryPoint)>,
    /// 국채 요약문
    pub treasury_summary: String,
    /// 한국 지수 (이름, 요약) 목록
    pub kr_market: Vec<(String, MarketQuote)>,
    /// 한국 시장 요약문
    pub kr_market_summary: String,
    /// 환율 (통화쌍, 요약) 목록
    pub forex: Vec<(String, ForexPoint)>,
    /// 환율 요약문
    pub forex_summary: String,
    /// 버핏 지표 상태
    pub buffett: Option<BuffettStatus>,
    /// 버핏 지표 요약문
    pub buffett_summary: String,
    /// 뉴스 요약문
    pub news_summary: String,
    /// 경제지표 요약문
    pub calendar_summary: String,
}

/// 마크다운 리포트 빌더.
pub struct MarkdownBuilder {
    date: String,
    config: ReportConfig,
}

impl MarkdownBuilder {
    /// 새로운 빌더 생성.
    pub fn new(date: impl Into<String>, config: ReportConfig) -> Self {
        Self {
            date: date.into(),
            config,
        }
    }

    /// 시장 섹션 (요약 + 지수별 상세 + 차트 링크).
    fn build_market_section(&self, data: &[(String, MarketQuote)], summary: &str) -> String {
        let mut section = summary.to_string();

        for (name, quote) in data {
            section.push_str(&format!(
                "\n\n### {name}\n\
                 - 종가: {close} ({change:+.2}%)\n\
                 - 거래량: {volume}\n\
                 - 52주 최고가 대비: {ratio:.1}%\n\n\
                 ![{name} Price Movement]({image})",
                name = name,
                close = format_grouped_decimal(&quote.close, 2),
                change = quote.change_pct,
                volume = format_thousands_u64(quote.volume),
                ratio = quote.year_high_ratio,
                image = self.config.image_relative_path(name, &self.date),
            ));
        }

        section
    }

    /// 국채 섹션 (요약 + 만기별 상세).
    fn build_treasury_section(&self, data: &[(String, TreasuryPoint)], summary: &str) -> String {
        let mut section = summary.to_string();

        for (name, point) in data {
            section.push_str(&format!(
                "\n\n### {}\n\
                 - 수익률: {:.3}% ({:+.3}%p)\n\
                 - 52주 범위: {:.3}% ~ {:.3}%",
                name, point.yield_rate, point.change_bp, point.year_low, point.year_high,
            ));

            if let (Some(ma_90), Some(ma_180)) = (point.ma_90, point.ma_180) {
                section.push_str(&format!(
                    "\n- 3개월 평균: {:.3}% / 6개월 평균: {:.3}%",
                    ma_90, ma_180
                ));
            }
            if let Some(spread) = point.fed_spread {
                section.push_str(&format!("\n- 기준금리 대비: {:+.2}%p", spread));
            }
        }

        section
    }

    /// 환율 섹션 (요약 + 통화쌍별 상세, JPY는 100엔 기준).
    fn build_forex_section(&self, data: &[(String, ForexPoint)], summary: &str) -> String {
        let mut section = summary.to_string();

        for (pair, point) in data {
            let currency = pair.split('/').next().unwrap_or(pair);
            if currency == "JPY" {
                section.push_str(&format!(
                    "\n\n### {}\n\
                     - 환율: {:.2}원/100엔 ({:+.2}%)\n\
                     - 52주 변동폭: {:.2}원 ~ {:.2}원",
                    pair,
                    point.rate * 100.0,
                    point.change_pct,
                    point.year_low * 100.0,
                    point.year_high * 100.0,
                ));
            } else {
                section.push_str(&format!(
                    "\n\n### {}\n\
                     - 환율: {:.2}원 ({:+.2}%)\n\
                     - 52주 변동폭: {:.2}원 ~ {:.2}원",
                    pair, point.rate, point.change_pct, point.year_low, point.year_high,
                ));
            }
        }

        section
    }

    /// 버핏 지표 섹션 (요약 + 상세 블록).
    fn build_buffett_section(&self, status: Option<&BuffettStatus>, summary: &str) -> String {
        let Some(status) = status else {
            return summary.to_string();
        };

        format!(
            "{}\n\n\
             - 현재 비율: {:.1}%\n\
             - 장기 평균: {:.1}%\n\
             - 트렌드 대비 괴리: {:+.1}%\n\
             - Z-Score: {:+.2}\n\
             - ±2σ 밴드: {:.1}% ~ {:.1}%\n\
             - 시장 상태: {}",
            summary,
            status.current_ratio,
            status.historical_mean,
            status.deviation_from_trend,
            status.z_score,
            status.lower_2std,
            status.upper_2std,
            status.market_status,
        )
    }

    /// 전체 리포트 렌더링.
    pub fn build_report(&self, ctx: &ReportContext) -> String {
        format!(
            "# {date} 시장 동향 리포트\n\n\
             ## 1. 미국 시장 동향\n{us}\n\n\
             ## 2. 옵션 시장 동향\n{options}\n\n\
             ## 3. 미국 국채 수익률\n{treasury}\n\n\
             ## 4. 한국 시장 동향\n{kr}\n\n\
             ## 5. 주요 환율\n{forex}\n\n\
             ## 6. 버핏 지표\n{buffett}\n\n\
             ## 7. 주요 뉴스\n{news}\n\n\
             ## 8. 다가오는 경제 지표\n{calendar}\n",
            date = self.date,
            us = self.build_market_section(&ctx.us_market, &ctx.us_market_summary),
            options = ctx.options_summary,
            treasury = self.build_treasury_section(&ctx.treasury, &ctx.treasury_summary),
            kr = self.build_market_section(&ctx.kr_market, &ctx.kr_market_summary),
            forex = self.build_forex_section(&ctx.forex, &ctx.forex_summary),
            buffett = self.build_buffett_section(ctx.buffett.as_ref(), &ctx.buffett_summary),
            news = ctx.news_summary,
            calendar = ctx.calendar_summary,
        )
    }

    /// 리포트를 파일로 저장하고 경로를 반환합니다.
    pub fn save_report(&self, content: &str) -> BriefResult<PathBuf> {
        let path = self.config.report_filepath(&self.date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;

        info!(path = %path.display(), "리포트 저장 완료");
        Ok(path)
    }
}
