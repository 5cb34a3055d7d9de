//! 데이터 수집 오류 타입.

use thiserror::Error;

/// 데이터 제공자 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 제공자 연결 실패
    #[error("데이터 소스 연결 실패: {0}")]
    ConnectionError(String),

    /// API 요청 실패
    #[error("API 요청 실패 ({symbol}): {message}")]
    ApiError { symbol: String, message: String },

    /// 응답 파싱 실패
    #[error("데이터 파싱 실패: {0}")]
    ParseError(String),

    /// 데이터 없음
    #[error("데이터 없음: {0}")]
    NoData(String),

    /// API 키 미설정
    #[error("API 키 미설정: {0}")]
    MissingKey(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::ConnectionError(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
