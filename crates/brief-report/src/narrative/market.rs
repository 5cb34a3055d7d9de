//! 미국/한국 시장 요약문 생성.

use brief_core::domain::MarketQuote;
use brief_core::format::{format_grouped_decimal, format_grouped_f64};
use rust_decimal::prelude::ToPrimitive;

use super::{direction, KR_MARKET_UNAVAILABLE, US_MARKET_UNAVAILABLE};

/// 미국 시장 거래량 분류 (주식 수 기준).
fn us_volume_description(volume: u64) -> &'static str {
    if volume > 1_000_000_000 {
        "활발한"
    } else if volume > 500_000_000 {
        "평균적인"
    } else {
        "다소 낮은"
    }
}

/// 한국 시장 거래량 분류.
fn kr_volume_description(volume: u64) -> &'static str {
    if volume > 1_000_000_000 {
        "매우 활발한"
    } else if volume > 500_000_000 {
        "활발한"
    } else if volume > 300_000_000 {
        "평균적인"
    } else {
        "다소 낮은"
    }
}

/// 가장 큰 변화를 보인 지수.
fn max_mover<'a>(data: &'a [(String, MarketQuote)]) -> &'a (String, MarketQuote) {
    data.iter()
        .max_by(|a, b| {
            a.1.change_pct
                .abs()
                .partial_cmp(&b.1.change_pct.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("non-empty market data")
}

/// 상승/하락 지수 개수.
fn breadth(data: &[(String, MarketQuote)]) -> (usize, usize) {
    let positive = data.iter().filter(|(_, q)| q.change_pct > 0.0).count();
    let negative = data.iter().filter(|(_, q)| q.change_pct < 0.0).count();
    (positive, negative)
}

/// 미국 시장 요약문 생성.
pub fn us_market_summary(data: &[(String, MarketQuote)]) -> String {
    if data.is_empty() {
        return US_MARKET_UNAVAILABLE.to_string();
    }

    let (positive, negative) = breadth(data);
    let sentiment = if positive > negative {
        "긍정적인 흐름"
    } else if positive < negative {
        "부정적인 흐름"
    } else {
        "혼조세"
    };

    let mut summary = format!("미국 주요 지수는 전반적으로 {}을 보였습니다. ", sentiment);

    for (name, quote) in data {
        summary.push_str(&format!(
            "{}은 {}로 전일 대비 {:.2}% {}했으며, ",
            name,
            format_grouped_decimal(&quote.close, 2),
            quote.change_pct.abs(),
            direction(quote.change_pct),
        ));

        if quote.year_high_ratio.abs() <= 5.0 {
            summary.push_str("52주 최고가에 근접한 수준이며, ");
        } else if quote.year_high_ratio < -20.0 {
            summary.push_str("52주 최고가 대비 큰 폭의 조정을 보이고 있으며, ");
        }

        summary.push_str(&format!(
            "{} 거래량을 기록했습니다. ",
            us_volume_description(quote.volume)
        ));
    }

    let (top_name, top_quote) = max_mover(data);
    summary.push_str(&format!(
        "\n특히 {}가 {:.2}%의 {}을 기록하며 가장 큰 변화를 보였습니다.",
        top_name,
        top_quote.change_pct.abs(),
        direction(top_quote.change_pct),
    ));

    summary.trim().to_string()
}

/// 한국 시장 요약문 생성.
pub fn kr_market_summary(data: &[(String, MarketQuote)]) -> String {
    if data.is_empty() {
        return KR_MARKET_UNAVAILABLE.to_string();
    }

    let (positive, negative) = breadth(data);
    let sentiment = if positive > negative {
        "강세"
    } else if positive < negative {
        "약세"
    } else {
        "보합"
    };

    let mut summary = format!("국내 증시는 전반적으로 {} 흐름을 보였습니다. ", sentiment);

    for (name, quote) in data {
        let close = quote.close.to_f64().unwrap_or(0.0);
        // 변동률에서 포인트 변동 역산
        let points_change = (close - close / (1.0 + quote.change_pct / 100.0)).abs();

        summary.push_str(&format!(
            "{}는 {}pt로 전일 대비 {}pt({:.2}%) {}했으며, ",
            name,
            format_grouped_decimal(&quote.close, 2),
            format_grouped_f64(points_change, 2),
            quote.change_pct.abs(),
            direction(quote.change_pct),
        ));

        let high_ratio = quote.year_high_ratio;
        if high_ratio.abs() <= 5.0 {
            summary.push_str("52주 최고가 수준에서 거래되고 있으며, ");
        } else if high_ratio < -20.0 {
            summary.push_str(&format!(
                "52주 최고가 대비 {:.1}% 하락한 수준이며, ",
                high_ratio.abs()
            ));
        } else {
            summary.push_str(&format!(
                "52주 최고가 대비 {:.1}% 하락한 상태에서 거래되고 있으며, ",
                high_ratio.abs()
            ));
        }

        summary.push_str(&format!(
            "{} 거래량을 보였습니다. ",
            kr_volume_description(quote.volume)
        ));
    }

    // 1% 이상 변동 시에만 특별 언급
    let (top_name, top_quote) = max_mover(data);
    if top_quote.change_pct.abs() > 1.0 {
        summary.push_str(&format!(
            "\n특히 {}가 {:.2}%의 {}을 기록하며 큰 폭의 변동을 보였습니다.",
            top_name,
            top_quote.change_pct.abs(),
            direction(top_quote.change_pct),
        ));
    }

    summary.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(change_pct: f64, year_high_ratio: f64, volume: u64) -> MarketQuote {
        MarketQuote {
            close: dec!(4500.21),
            volume,
            change_pct,
            year_high: dec!(4600),
            year_low: dec!(3800),
            year_high_ratio,
            volume_ma20: None,
            volume_ratio: None,
        }
    }

    #[test]
    fn test_us_summary_positive_breadth() {
        let data = vec![
            ("S&P 500".to_string(), quote(1.2, -2.2, 2_500_000_000)),
            ("NASDAQ".to_string(), quote(0.8, -3.0, 1_800_000_000)),
            ("DOW".to_string(), quote(-0.1, -4.0, 400_000_000)),
        ];

        let summary = us_market_summary(&data);
        assert!(summary.contains("긍정적인 흐름"));
        assert!(summary.contains("S&P 500은 4,500.21로 전일 대비 1.20% 상승했으며"));
        assert!(summary.contains("52주 최고가에 근접한 수준이며"));
        assert!(summary.contains("활발한 거래량"));
        assert!(summary.contains("다소 낮은 거래량"));
        // 가장 큰 변화: S&P 500 (1.2%)
        assert!(summary.contains("특히 S&P 500가 1.20%의 상승"));
    }

    #[test]
    fn test_us_summary_deep_correction_branch() {
        let data = vec![("NASDAQ".to_string(), quote(-2.5, -25.0, 600_000_000))];
        let summary = us_market_summary(&data);
        assert!(summary.contains("부정적인 흐름"));
        assert!(summary.contains("큰 폭의 조정"));
    }

    #[test]
    fn test_us_summary_empty() {
        assert_eq!(us_market_summary(&[]), US_MARKET_UNAVAILABLE);
    }

    #[test]
    fn test_kr_summary_small_move_no_highlight() {
        let data = vec![
            ("KOSPI".to_string(), quote(0.5, -8.0, 350_000_000)),
            ("KOSDAQ".to_string(), quote(-0.3, -12.0, 250_000_000)),
        ];

        let summary = kr_market_summary(&data);
        // 상승 1개 / 하락 1개 → 보합
        assert!(summary.contains("보합 흐름"));
        assert!(summary.contains("52주 최고가 대비 8.0% 하락한 상태"));
        assert!(summary.contains("평균적인 거래량"));
        assert!(summary.contains("다소 낮은 거래량"));
        // 1% 미만 변동이므로 특별 언급 없음
        assert!(!summary.contains("특히"));
    }

    #[test]
    fn test_kr_summary_highlights_large_move() {
        let data = vec![
            ("KOSPI".to_string(), quote(2.1, -3.0, 1_200_000_000)),
            ("KOSDAQ".to_string(), quote(0.4, -6.0, 600_000_000)),
        ];

        let summary = kr_market_summary(&data);
        assert!(summary.contains("매우 활발한 거래량"));
        assert!(summary.contains("특히 KOSPI가 2.10%의 상승"));
    }
}
