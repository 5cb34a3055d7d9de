//! 환경변수 기반 설정 모듈.
//!
//! `.env` 파일과 환경변수에서 설정을 로드합니다. 수집 대상(지수, 국채,
//! 통화쌍, 경제지표)은 리포트 섹션 순서가 곧 출력 순서이므로 순서가
//! 보존되는 정적 테이블로 정의합니다.

use chrono::NaiveDate;
use chrono_tz::Asia::Seoul;
use std::path::PathBuf;

use crate::error::{BriefError, BriefResult};

/// 리포트 날짜 형식.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 시장 지수 정의.
#[derive(Debug, Clone, Copy)]
pub struct IndexSpec {
    /// 리포트에 표기되는 이름
    pub name: &'static str,
    /// Yahoo Finance 심볼
    pub symbol: &'static str,
    /// 차트 제목용 한글 이름
    pub chart_title: &'static str,
}

/// 미국 주요 지수.
pub const US_INDICES: &[IndexSpec] = &[
    IndexSpec {
        name: "S&P 500",
        symbol: "^GSPC",
        chart_title: "S&P 500 지수",
    },
    IndexSpec {
        name: "NASDAQ",
        symbol: "^IXIC",
        chart_title: "나스닥 지수",
    },
    IndexSpec {
        name: "DOW",
        symbol: "^DJI",
        chart_title: "다우존스 지수",
    },
];

/// 한국 주요 지수.
///
/// 과거 시세는 Yahoo Finance에서 조회하고, KRX API 키가 설정된 경우
/// 최근 거래일 데이터를 KRX 확정치로 교체합니다.
pub const KR_INDICES: &[IndexSpec] = &[
    IndexSpec {
        name: "KOSPI",
        symbol: "^KS11",
        chart_title: "코스피 지수",
    },
    IndexSpec {
        name: "KOSDAQ",
        symbol: "^KQ11",
        chart_title: "코스닥 지수",
    },
];

/// 미국 국채 만기 정의.
#[derive(Debug, Clone, Copy)]
pub struct TenorSpec {
    /// 만기 표기 (예: "10년물")
    pub name: &'static str,
    /// Yahoo Finance 심볼
    pub symbol: &'static str,
}

/// 미국 국채 수익률 수집 대상.
pub const US_TREASURIES: &[TenorSpec] = &[
    TenorSpec {
        name: "2년물",
        symbol: "2YY=F",
    },
    TenorSpec {
        name: "10년물",
        symbol: "^TNX",
    },
    TenorSpec {
        name: "30년물",
        symbol: "^TYX",
    },
];

/// 환율 수집 대상 (원화 기준 통화쌍).
pub const CURRENCY_PAIRS: &[&str] = &["USD/KRW", "EUR/KRW", "JPY/KRW", "CNY/KRW"];

/// 옵션 분석 대상 지수.
pub const OPTION_UNDERLYINGS: &[(&str, &str)] =
    &[("SPX", "^SPX"), ("NDX", "^NDX"), ("VIX", "^VIX")];

/// 버핏 지표 입력 심볼.
pub const WILSHIRE_SYMBOL: &str = "^W5000";

/// 버핏 지표 GDP 시계열 시작일.
pub const BUFFETT_START_DATE: &str = "1980-01-01";

/// FRED 경제지표 정의.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSpec {
    /// FRED 시리즈 ID
    pub series_id: &'static str,
    /// 한글 지표명
    pub name_ko: &'static str,
    /// 중요도 (1~3, 내러티브에서 ⭐ 개수)
    pub importance: u8,
}

/// 경제지표 캘린더 수집 대상.
pub const ECONOMIC_INDICATORS: &[IndicatorSpec] = &[
    IndicatorSpec {
        series_id: "GDP",
        name_ko: "국내총생산(GDP)",
        importance: 3,
    },
    IndicatorSpec {
        series_id: "UNRATE",
        name_ko: "실업률",
        importance: 3,
    },
    IndicatorSpec {
        series_id: "CPIAUCSL",
        name_ko: "소비자물가지수",
        importance: 3,
    },
    IndicatorSpec {
        series_id: "FEDFUNDS",
        name_ko: "기준금리",
        importance: 3,
    },
    IndicatorSpec {
        series_id: "INDPRO",
        name_ko: "산업생산지수",
        importance: 2,
    },
    IndicatorSpec {
        series_id: "PAYEMS",
        name_ko: "비농업부문고용",
        importance: 3,
    },
    IndicatorSpec {
        series_id: "PCE",
        name_ko: "개인소비지출",
        importance: 2,
    },
    IndicatorSpec {
        series_id: "HOUST",
        name_ko: "주택착공건수",
        importance: 1,
    },
    IndicatorSpec {
        series_id: "BOGMBASE",
        name_ko: "본원통화",
        importance: 1,
    },
    IndicatorSpec {
        series_id: "RETAILSMNSA",
        name_ko: "소매판매",
        importance: 2,
    },
];

/// 리포트 생성기 전체 설정.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// 리포트 출력 디렉토리
    pub reports_dir: PathBuf,
    /// 통계 계산용 과거 조회 기간 (일)
    pub lookback_days: i64,
    /// 차트 렌더링용 과거 조회 기간 (일)
    pub chart_lookback_days: i64,
    /// 카테고리별 뉴스 기사 수
    pub news_page_size: usize,
    /// 경제지표 캘린더 조회 기간 (일)
    pub calendar_lookback_days: i64,
    /// FRED API 키 (국채/버핏 지표/경제지표 섹션에 필요)
    pub fred_api_key: Option<String>,
    /// DeepSearch 뉴스 API 키
    pub news_api_key: Option<String>,
    /// KRX Open API 키 (국내 지수 확정치 조회, 선택)
    pub krx_api_key: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            lookback_days: 365,
            chart_lookback_days: 30,
            news_page_size: 5,
            calendar_lookback_days: 45,
            fred_api_key: None,
            news_api_key: None,
            krx_api_key: None,
        }
    }
}

impl ReportConfig {
    /// 환경변수에서 설정 로드.
    pub fn from_env() -> BriefResult<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            reports_dir: std::env::var("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("reports")),
            lookback_days: env_var_parse("LOOKBACK_DAYS", 365),
            chart_lookback_days: env_var_parse("CHART_LOOKBACK_DAYS", 30),
            news_page_size: env_var_parse("NEWS_PAGE_SIZE", 5),
            calendar_lookback_days: env_var_parse("CALENDAR_LOOKBACK_DAYS", 45),
            fred_api_key: env_var_nonempty("FRED_API_KEY"),
            news_api_key: env_var_nonempty("NEWSAPI_KEY"),
            krx_api_key: env_var_nonempty("KRX_API_KEY"),
        })
    }

    /// FRED API 키 반환 (없으면 설정 에러).
    pub fn require_fred_key(&self) -> BriefResult<&str> {
        self.fred_api_key.as_deref().ok_or_else(|| {
            BriefError::Config("FRED_API_KEY 환경변수가 설정되지 않았습니다".to_string())
        })
    }

    /// 뉴스 API 키 반환 (없으면 설정 에러).
    pub fn require_news_key(&self) -> BriefResult<&str> {
        self.news_api_key.as_deref().ok_or_else(|| {
            BriefError::Config("NEWSAPI_KEY 환경변수가 설정되지 않았습니다".to_string())
        })
    }

    /// 리포트 파일 경로: `{reports_dir}/{date}_market_report.md`
    pub fn report_filepath(&self, date: &str) -> PathBuf {
        self.reports_dir.join(format!("{}_market_report.md", date))
    }

    /// 날짜별 이미지 디렉토리: `{reports_dir}/images/{date}`
    pub fn daily_image_dir(&self, date: &str) -> PathBuf {
        self.reports_dir.join("images").join(date)
    }

    /// 차트 이미지 파일 경로: `{reports_dir}/images/{date}/{market}_price.png`
    pub fn image_filepath(&self, market_name: &str, date: &str) -> PathBuf {
        self.daily_image_dir(date)
            .join(format!("{}_price.png", market_name))
    }

    /// 마크다운에 삽입되는 상대 이미지 경로.
    ///
    /// 리포트 파일이 `reports_dir` 바로 아래에 있으므로 이미지는
    /// `images/{date}/...`로 참조합니다.
    pub fn image_relative_path(&self, market_name: &str, date: &str) -> String {
        format!("images/{}/{}_price.png", date, market_name)
    }
}

/// 오늘 날짜 (한국 표준시, `%Y-%m-%d`).
pub fn today_kst() -> String {
    chrono::Utc::now()
        .with_timezone(&Seoul)
        .format(DATE_FORMAT)
        .to_string()
}

/// 오늘 날짜 (한국 표준시, `NaiveDate`).
pub fn today_kst_date() -> NaiveDate {
    chrono::Utc::now().with_timezone(&Seoul).date_naive()
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용).
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// 환경변수에서 비어 있지 않은 문자열 읽기.
fn env_var_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
