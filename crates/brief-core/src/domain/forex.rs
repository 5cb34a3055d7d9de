//! 환율 레코드.

use serde::{Deserialize, Serialize};

/// 통화쌍 환율 요약.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForexPoint {
    /// 현재 환율 (원)
    pub rate: f64,
    /// 전일 대비 변동률 (%)
    pub change_pct: f64,
    /// 52주 최고 환율
    pub year_high: f64,
    /// 52주 최저 환율
    pub year_low: f64,
}

impl ForexPoint {
    /// 52주 변동범위 내 현재 환율의 위치 (%).
    pub fn range_position(&self) -> f64 {
        let width = self.year_high - self.year_low;
        if width <= f64::EPSILON {
            50.0
        } else {
            (self.rate - self.year_low) / width * 100.0
        }
    }

    /// 52주 변동폭 (최저 대비 %).
    pub fn range_percent(&self) -> f64 {
        if self.year_low <= f64::EPSILON {
            0.0
        } else {
            (self.year_high - self.year_low) / self.year_low * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_metrics() {
        let point = ForexPoint {
            rate: 1400.0,
            change_pct: 0.2,
            year_high: 1450.0,
            year_low: 1250.0,
        };

        // (1400 - 1250) / 200 * 100 = 75
        assert!((point.range_position() - 75.0).abs() < 1e-9);
        // (1450 - 1250) / 1250 * 100 = 16
        assert!((point.range_percent() - 16.0).abs() < 1e-9);
    }
}
