//! 통계 계산 오류 타입.

use thiserror::Error;

/// 계산 관련 오류.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// 빈 시계열
    #[error("빈 시계열: {0}")]
    EmptySeries(String),

    /// 계산에 필요한 데이터 부족
    #[error("데이터 부족: {0}")]
    InsufficientData(String),

    /// 잘못된 입력 값
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
