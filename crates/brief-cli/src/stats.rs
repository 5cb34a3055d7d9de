//! 수집 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 섹션 수집 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionStats {
    /// 총 섹션 수
    pub total: usize,
    /// 성공 섹션 수
    pub success: usize,
    /// 실패 섹션 수
    pub errors: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SectionStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 섹션 결과 기록
    pub fn record(&mut self, ok: bool) {
        self.total += 1;
        if ok {
            self.success += 1;
        } else {
            self.errors += 1;
        }
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            success = self.success,
            errors = self.errors,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}
