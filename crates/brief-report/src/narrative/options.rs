//! 옵션 시장 요약문 생성.

use brief_core::domain::{OptionAnalysis, OptionSignal};

use super::OPTIONS_UNAVAILABLE;

/// 옵션 시장 요약문 생성.
///
/// 지수별 근월물 P/C 비율 신호, 스큐, 기간 구조를 나열하고, 최종 신호
/// 분포로 전체 분위기를 한 문장으로 요약합니다.
pub fn options_summary(data: &[(String, OptionAnalysis)]) -> String {
    if data.is_empty() {
        return OPTIONS_UNAVAILABLE.to_string();
    }

    let bearish = data
        .iter()
        .filter(|(_, a)| a.ratios.final_signal == OptionSignal::Bearish)
        .count();
    let bullish = data
        .iter()
        .filter(|(_, a)| a.ratios.final_signal == OptionSignal::Bullish)
        .count();

    let mut summary = if bearish > bullish {
        "옵션 시장은 하방 리스크에 대한 경계가 우세한 상태입니다. ".to_string()
    } else if bullish > bearish {
        "옵션 시장은 상방 기대가 우세한 상태입니다. ".to_string()
    } else {
        "옵션 시장은 뚜렷한 방향성 없이 균형을 이루고 있습니다. ".to_string()
    };

    for (name, analysis) in data {
        summary.push_str(&format!(
            "\n{}: P/C 비율은 거래량 기준 {:.2}, 미결제약정 기준 {:.2}로 {} 모습입니다",
            name,
            analysis.ratios.volume_ratio,
            analysis.ratios.oi_ratio,
            analysis.ratios.final_signal.describe_ko(),
        ));

        if analysis.ratios.final_signal != OptionSignal::Unknown {
            summary.push_str(&format!(" (신호 강도 {:.2})", analysis.ratios.strength));
        }
        summary.push_str(". ");

        summary.push_str(analysis.skew.trend.describe_ko());
        summary.push_str(". ");
        summary.push_str(analysis.term.trend.describe_ko());
        summary.push('.');
    }

    summary.trim().to_string()
}
