//! 리포트 파이프라인의 에러 타입.
//!
//! 섹션 단위 실패는 파이프라인에서 로그 후 플레이스홀더로 대체되므로,
//! 여기의 에러는 대부분 호출자에게 전파된 뒤 해당 섹션에서 소멸합니다.
//! 최종 리포트 파일 쓰기 실패만 치명적입니다.

use thiserror::Error;

/// 핵심 리포트 에러.
#[derive(Debug, Error)]
pub enum BriefError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 수집 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 통계 계산 에러
    #[error("계산 에러: {0}")]
    Analytics(String),

    /// 리포트 렌더링 에러
    #[error("렌더링 에러: {0}")]
    Render(String),

    /// 차트 생성 에러
    #[error("차트 에러: {0}")]
    Chart(String),

    /// 파일 입출력 에러
    #[error("파일 입출력 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 리포트 작업을 위한 Result 타입.
pub type BriefResult<T> = Result<T, BriefError>;

impl BriefError {
    /// 리포트 생성을 중단해야 하는 에러인지 확인합니다.
    ///
    /// 데이터/계산/차트 에러는 해당 섹션만 건너뛰고 계속 진행합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BriefError::Config(_) | BriefError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_errors_are_not_fatal() {
        let data_err = BriefError::Data("수집 실패".to_string());
        assert!(!data_err.is_fatal());

        let chart_err = BriefError::Chart("렌더 실패".to_string());
        assert!(!chart_err.is_fatal());
    }

    #[test]
    fn test_config_and_io_errors_are_fatal() {
        let config_err = BriefError::Config("FRED_API_KEY 누락".to_string());
        assert!(config_err.is_fatal());

        let io_err = BriefError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(io_err.is_fatal());
    }
}
