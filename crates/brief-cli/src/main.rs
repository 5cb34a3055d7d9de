//! MarketBrief CLI.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brief_cli::ReportPipeline;
use brief_core::config::ReportConfig;
use brief_report::narrative;

#[derive(Parser)]
#[command(name = "marketbrief")]
#[command(about = "MarketBrief 일일 시장 동향 리포트 생성기", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 일일 리포트 생성 (수집 → 차트 → 마크다운)
    Generate {
        /// 리포트 날짜 (YYYY-MM-DD, 기본: 오늘 KST)
        #[arg(long)]
        date: Option<String>,

        /// 차트 생성 건너뛰기
        #[arg(long)]
        skip_charts: bool,

        /// 리포트 출력 디렉토리 (기본: reports)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// 단일 섹션만 수집하여 요약문 출력
    Section {
        /// 섹션 이름
        #[arg(value_enum)]
        name: SectionName,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SectionName {
    /// 미국 시장
    UsMarket,
    /// 한국 시장
    KrMarket,
    /// 미국 국채
    Treasury,
    /// 환율
    Forex,
    /// 뉴스
    News,
    /// 경제지표
    Calendar,
    /// 버핏 지표
    Buffett,
    /// 옵션 시장
    Options,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("MarketBrief 시작");

    // 설정 로드
    let mut config = ReportConfig::from_env()?;

    match cli.command {
        Commands::Generate {
            date,
            skip_charts,
            output_dir,
        } => {
            if let Some(dir) = output_dir {
                config.reports_dir = dir;
            }

            let pipeline = ReportPipeline::new(config, date)?;
            let path = pipeline.generate(skip_charts).await?;

            println!("리포트 생성 완료: {}", path.display());
        }

        Commands::Section { name } => {
            let pipeline = ReportPipeline::new(config, None)?;
            let summary = run_section(&pipeline, name).await;
            println!("{}", summary);
        }
    }

    tracing::info!("MarketBrief 종료");
    Ok(())
}

/// 단일 섹션 수집 후 요약문 반환.
async fn run_section(pipeline: &ReportPipeline, name: SectionName) -> String {
    match name {
        SectionName::UsMarket => {
            narrative::market::us_market_summary(&pipeline.collect_us_market().await)
        }
        SectionName::KrMarket => {
            narrative::market::kr_market_summary(&pipeline.collect_kr_market().await)
        }
        SectionName::Treasury => {
            narrative::treasury::treasury_summary(&pipeline.collect_treasury().await)
        }
        SectionName::Forex => narrative::forex::forex_summary(&pipeline.collect_forex().await),
        SectionName::News => narrative::news::news_summary(&pipeline.collect_news().await),
        SectionName::Calendar => {
            narrative::calendar::calendar_summary(&pipeline.collect_calendar().await)
        }
        SectionName::Buffett => {
            narrative::buffett::buffett_summary(pipeline.collect_buffett().await.as_ref())
        }
        SectionName::Options => {
            narrative::options::options_summary(&pipeline.collect_options().await)
        }
    }
}
