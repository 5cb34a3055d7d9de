//! MarketBrief 일일 리포트 파이프라인.
//!
//! 이 crate는 데이터 수집 → 차트 생성 → 내러티브 → 마크다운 저장을
//! 순차 실행하는 바이너리를 제공합니다:
//! - 시장/국채/환율/뉴스/경제지표/버핏 지표/옵션 섹션 수집
//! - 섹션 단위 실패 격리 (실패 섹션은 플레이스홀더로 대체)
//! - 수집 통계 로그

pub mod pipeline;
pub mod stats;

pub use pipeline::{CollectedData, ReportPipeline};
pub use stats::SectionStats;
