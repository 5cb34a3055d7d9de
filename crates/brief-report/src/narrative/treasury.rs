//! 미국 국채 수익률 요약문 생성.

use brief_core::domain::TreasuryPoint;

use super::{direction, TREASURY_UNAVAILABLE};

/// 52주 최고/최저 근접 판정 임계값 (%p).
const RANGE_EDGE_BAND: f64 = 0.1;
/// 특별 언급 임계값 (5bp).
const HIGHLIGHT_THRESHOLD: f64 = 0.05;

/// 국채 수익률 요약문 생성.
///
/// `data`는 (만기 표기, 요약) 쌍의 순서 있는 목록입니다. 2년물과 10년물이
/// 모두 있으면 수익률 곡선(2s10s) 해설을 덧붙입니다.
pub fn treasury_summary(data: &[(String, TreasuryPoint)]) -> String {
    if data.is_empty() {
        return TREASURY_UNAVAILABLE.to_string();
    }

    let positive = data.iter().filter(|(_, p)| p.change_bp > 0.0).count();
    let negative = data.iter().filter(|(_, p)| p.change_bp < 0.0).count();

    let mut summary = String::from("미국 국채 수익률은 ");
    if positive > negative {
        summary.push_str("전반적으로 상승했습니다. ");
    } else if positive < negative {
        summary.push_str("전반적으로 하락했습니다. ");
    } else {
        summary.push_str("혼조세를 보였습니다. ");
    }

    for (term, point) in data {
        summary.push_str(&format!(
            "{} 수익률은 {:.3}%로 전일 대비 {:.3}%p {}했으며, ",
            term,
            point.yield_rate,
            point.change_bp.abs(),
            direction(point.change_bp),
        ));

        if (point.yield_rate - point.year_high).abs() <= RANGE_EDGE_BAND {
            summary.push_str("52주 최고 수준에 근접해 있습니다. ");
        } else if (point.yield_rate - point.year_low).abs() <= RANGE_EDGE_BAND {
            summary.push_str("52주 최저 수준에 근접해 있습니다. ");
        } else {
            summary.push_str(&format!(
                "52주 변동범위 중 {:.1}% 수준에서 거래되고 있습니다. ",
                point.range_position()
            ));
        }
    }

    // 수익률 곡선 (2년물-10년물 스프레드)
    let two_year = data.iter().find(|(term, _)| term == "2년물");
    let ten_year = data.iter().find(|(term, _)| term == "10년물");
    if let (Some((_, two)), Some((_, ten))) = (two_year, ten_year) {
        let spread = ten.yield_rate - two.yield_rate;
        summary.push_str(&format!(
            "\n2년물과 10년물의 스프레드는 {:.3}%p로, ",
            spread.abs()
        ));

        if spread < 0.0 {
            summary.push_str(
                "수익률 곡선이 역전된 상태입니다. 이는 일반적으로 경기 침체에 대한 \
                 시장의 우려를 반영합니다. ",
            );
        } else if spread < 0.5 {
            summary.push_str("수익률 곡선이 매우 평탄화되어 있습니다. ");
        } else {
            summary.push_str("정상적인 우상향 곡선을 유지하고 있습니다. ");
        }
    }

    // 가장 큰 변동 만기 (5bp 이상일 때만)
    if let Some((top_term, top_point)) = data.iter().max_by(|a, b| {
        a.1.change_bp
            .abs()
            .partial_cmp(&b.1.change_bp.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        if top_point.change_bp.abs() > HIGHLIGHT_THRESHOLD {
            summary.push_str(&format!(
                "\n특히 {} 수익률이 {:.3}%p의 {}을 보이며 가장 큰 변동을 기록했습니다.",
                top_term,
                top_point.change_bp.abs(),
                direction(top_point.change_bp),
            ));
        }
    }

    summary.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(yield_rate: f64, change_bp: f64) -> TreasuryPoint {
        TreasuryPoint {
            yield_rate,
            change_bp,
            year_high: 5.0,
            year_low: 3.5,
            ma_90: None,
            ma_180: None,
            monthly_volatility: 0.05,
            long_term_volatility: 0.10,
            volatility_ratio: 0.5,
            fed_spread: None,
        }
    }

    #[test]
    fn test_inverted_curve_commentary() {
        let data = vec![
            ("2년물".to_string(), point(4.80, 0.02)),
            ("10년물".to_string(), point(4.20, -0.03)),
            ("30년물".to_string(), point(4.40, -0.01)),
        ];

        let summary = treasury_summary(&data);
        assert!(summary.contains("전반적으로 하락했습니다"));
        assert!(summary.contains("2년물과 10년물의 스프레드는 0.600%p"));
        assert!(summary.contains("역전된 상태"));
        assert!(summary.contains("경기 침체"));
    }

    #[test]
    fn test_normal_curve_and_range_position() {
        let data = vec![
            ("2년물".to_string(), point(3.80, 0.01)),
            ("10년물".to_string(), point(4.50, 0.02)),
        ];

        let summary = treasury_summary(&data);
        assert!(summary.contains("전반적으로 상승했습니다"));
        assert!(summary.contains("정상적인 우상향 곡선"));
        // 3.8: (3.8-3.5)/1.5 = 20%
        assert!(summary.contains("52주 변동범위 중 20.0% 수준"));
    }

    #[test]
    fn test_near_high_and_highlight() {
        let data = vec![
            ("10년물".to_string(), point(4.95, 0.08)),
            ("30년물".to_string(), point(4.40, 0.01)),
        ];

        let summary = treasury_summary(&data);
        assert!(summary.contains("52주 최고 수준에 근접"));
        assert!(summary.contains("특히 10년물 수익률이 0.080%p의 상승"));
        // 스프레드 문장은 2년물이 없으므로 생략
        assert!(!summary.contains("스프레드"));
    }

    #[test]
    fn test_small_moves_no_highlight() {
        let data = vec![("10년물".to_string(), point(4.20, 0.02))];
        let summary = treasury_summary(&data);
        assert!(!summary.contains("특히"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(treasury_summary(&[]), TREASURY_UNAVAILABLE);
    }
}
