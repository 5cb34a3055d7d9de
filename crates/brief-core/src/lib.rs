//! # Brief Core
//!
//! 일일 시장 리포트 생성기의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 리포트 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 시장/국채/환율/뉴스/경제지표 레코드 타입
//! - 버핏 지표 및 옵션 분석 결과 타입
//! - 설정 관리 (환경변수 기반)
//! - 로깅 인프라
//! - 한국어 숫자 포맷팅 유틸리티

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
