//! 뉴스 요약문 생성.

use brief_core::domain::{NewsDigest, NewsItem};

use super::NEWS_UNAVAILABLE;

/// 단일 기사 블록 렌더링.
fn format_item(item: &NewsItem) -> String {
    format!(
        "### {}\n- 출처: {}\n- 시간: {}\n- {}",
        item.display_title(),
        item.publisher,
        item.published_at,
        item.display_summary(),
    )
}

/// 카테고리 블록 렌더링 (비어 있으면 None).
fn format_category(label: &str, items: &[NewsItem]) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let mut block = format!("[{}]", label);
    for item in items {
        block.push_str("\n\n");
        block.push_str(&format_item(item));
    }
    Some(block)
}

/// 뉴스 요약문 생성.
///
/// 국내 경제 → 글로벌 경제 → 글로벌 비즈니스 순으로, 기사가 있는
/// 카테고리만 포함합니다.
pub fn news_summary(digest: &NewsDigest) -> String {
    if digest.is_empty() {
        return NEWS_UNAVAILABLE.to_string();
    }

    let blocks: Vec<String> = [
        ("국내 경제", &digest.kr_economic),
        ("글로벌 경제", &digest.global_economic),
        ("글로벌 비즈니스", &digest.global_business),
    ]
    .iter()
    .filter_map(|(label, items)| format_category(label, items))
    .collect();

    blocks.join("\n\n")
}
