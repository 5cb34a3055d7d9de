//! 경제지표 요약문 생성.

use brief_core::domain::EconomicEvent;
use chrono::NaiveDate;

use super::CALENDAR_UNAVAILABLE;

/// 내러티브에 포함할 최소 중요도 (⭐⭐ 이상).
const MIN_IMPORTANCE: u8 = 2;

/// 경제지표 요약문 생성.
///
/// 중요도 2 이상인 이벤트만 발표일 기준으로 묶어 최신 날짜부터
/// 나열합니다.
pub fn calendar_summary(events: &[EconomicEvent]) -> String {
    let important: Vec<&EconomicEvent> = events
        .iter()
        .filter(|e| e.importance >= MIN_IMPORTANCE)
        .collect();

    if important.is_empty() {
        return CALENDAR_UNAVAILABLE.to_string();
    }

    // 날짜별 그룹화 (최신 날짜 먼저)
    let mut dates: Vec<NaiveDate> = important.iter().map(|e| e.date).collect();
    dates.sort();
    dates.dedup();
    dates.reverse();

    let mut lines: Vec<String> = vec!["최근 발표된 주요 경제지표".to_string()];

    for date in dates {
        lines.push(String::new());
        lines.push(format!("[{}]", date.format("%Y-%m-%d")));

        for event in important.iter().filter(|e| e.date == date) {
            lines.push(format!(
                "{} {} ({})",
                "⭐".repeat(event.importance as usize),
                event.name,
                event.description,
            ));
            lines.push(format!("  발표: {:.2}", event.actual));
            if let Some(forecast) = event.forecast {
                lines.push(format!("  예상: {:.2}", forecast));
            }
            if let Some(previous) = event.previous {
                match event.change_from_previous() {
                    Some(change) => lines.push(format!(
                        "  이전: {:.2} (전기대비 {:+.1}%)",
                        previous, change
                    )),
                    None => lines.push(format!("  이전: {:.2}", previous)),
                }
            }
        }
    }

    lines.join("\n").trim().to_string()
}
