//! 환율 요약문 생성.

use brief_core::domain::ForexPoint;

use super::{direction, FOREX_UNAVAILABLE};

/// 특별 언급 임계값 (%).
const HIGHLIGHT_THRESHOLD: f64 = 0.5;

/// 통화쌍에서 기준 통화 추출 ("USD/KRW" → "USD").
fn base_currency(pair: &str) -> &str {
    pair.split('/').next().unwrap_or(pair)
}

/// 환율 요약문 생성.
///
/// 환율 상승은 원화 약세, 하락은 원화 강세로 해석합니다. JPY는 100엔
/// 기준으로 표시합니다.
pub fn forex_summary(data: &[(String, ForexPoint)]) -> String {
    if data.is_empty() {
        return FOREX_UNAVAILABLE.to_string();
    }

    let weakening = data.iter().filter(|(_, p)| p.change_pct > 0.0).count();
    let strengthening = data.iter().filter(|(_, p)| p.change_pct < 0.0).count();

    let (trend, movement) = if weakening > strengthening {
        ("약세", "상승")
    } else if weakening < strengthening {
        ("강세", "하락")
    } else {
        ("보합", "혼조")
    };

    let mut summary = format!(
        "원화는 주요 통화 대비 {} 흐름을 보이며, 환율은 전반적으로 {}했습니다. ",
        trend, movement
    );

    for (pair, point) in data {
        let currency = base_currency(pair);

        if currency == "JPY" {
            summary.push_str(&format!(
                "{}는 100엔당 {:.2}원으로 전일 대비 {:.2}% {}했으며, ",
                currency,
                point.rate * 100.0,
                point.change_pct.abs(),
                direction(point.change_pct),
            ));
        } else {
            summary.push_str(&format!(
                "{}는 {:.2}원으로 전일 대비 {:.2}% {}했으며, ",
                currency,
                point.rate,
                point.change_pct.abs(),
                direction(point.change_pct),
            ));
        }

        let position = point.range_position();
        if position > 90.0 {
            summary.push_str("52주 최고치에 근접한 수준이며, ");
        } else if position < 10.0 {
            summary.push_str("52주 최저치에 근접한 수준이며, ");
        } else {
            summary.push_str(&format!(
                "52주 변동범위의 {:.1}% 수준에서 거래되고 있으며, ",
                position
            ));
        }

        let range_pct = point.range_percent();
        if range_pct > 15.0 {
            summary.push_str("높은 변동성을 보이고 있습니다. ");
        } else if range_pct > 8.0 {
            summary.push_str("보통 수준의 변동성을 보이고 있습니다. ");
        } else {
            summary.push_str("안정적인 범위 내에서 움직이고 있습니다. ");
        }
    }

    // 0.5% 이상 변동 통화만 특별 언급
    if let Some((top_pair, top_point)) = data.iter().max_by(|a, b| {
        a.1.change_pct
            .abs()
            .partial_cmp(&b.1.change_pct.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        if top_point.change_pct.abs() > HIGHLIGHT_THRESHOLD {
            summary.push_str(&format!(
                "\n특히 {}가 {:.2}%의 {}을 기록하며 가장 큰 변동을 보였습니다.",
                base_currency(top_pair),
                top_point.change_pct.abs(),
                direction(top_point.change_pct),
            ));
        }
    }

    summary.trim().to_string()
}
