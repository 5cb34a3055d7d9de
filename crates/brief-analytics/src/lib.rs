//! # Brief Analytics
//!
//! 수집된 시계열에 대한 기술 통계를 계산합니다.
//!
//! 이 크레이트의 함수는 전부 순수 계산이며 I/O를 수행하지 않습니다:
//! - 시장 지수: 전일 대비 변동률, 52주 범위, 거래량 이동평균 비율
//! - 국채: 90/180일 평균, 단기/장기 변동성 비율, 기준금리 스프레드
//! - 환율: 변동률과 52주 범위
//! - 버핏 지표: 시가총액/GDP 병합 시계열의 롤링 트렌드 밴드와 Z-score
//! - 옵션: P/C 비율, 변동성 스큐, 기간 구조 분류

pub mod buffett;
pub mod error;
pub mod forex;
pub mod market;
pub mod options;
pub mod series;
pub mod treasury;

pub use buffett::BuffettIndicator;
pub use error::{AnalyticsError, Result};
pub use options::OptionAnalyzer;
