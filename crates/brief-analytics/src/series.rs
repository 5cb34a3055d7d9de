//! 시계열 공통 연산.
//!
//! 롤링 평균/표준편차, 일별 선형 보간, 날짜 기준 병합을 제공합니다.
//! 표준편차는 표본 표준편차(n-1)를 사용합니다.

use chrono::{Duration, NaiveDate};

/// 날짜가 붙은 관측치 시계열.
pub type DatedSeries = Vec<(NaiveDate, f64)>;

/// 산술 평균. 빈 슬라이스는 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 표본 표준편차 (n-1). 관측치가 2개 미만이면 0.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// 마지막 `n`개 관측치의 평균. 관측치가 `n`개 미만이면 None.
pub fn tail_mean(values: &[f64], n: usize) -> Option<f64> {
    if values.len() < n || n == 0 {
        return None;
    }
    Some(mean(&values[values.len() - n..]))
}

/// 마지막 `n`개(부족하면 전체) 관측치의 표준편차.
pub fn tail_std(values: &[f64], n: usize) -> f64 {
    let take = n.min(values.len());
    std_dev(&values[values.len() - take..])
}

/// 롤링 평균.
///
/// 각 위치에서 직전 `window`개(자기 자신 포함)의 평균을 계산합니다.
/// 누적 관측치가 `min_periods` 미만인 위치는 None입니다.
pub fn rolling_mean(values: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, min_periods, mean)
}

/// 롤링 표본 표준편차.
pub fn rolling_std(values: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, min_periods, std_dev)
}

fn rolling_apply(
    values: &[f64],
    window: usize,
    min_periods: usize,
    f: fn(&[f64]) -> f64,
) -> Vec<Option<f64>> {
    let min_periods = min_periods.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let count = (i + 1).min(window);
            if i + 1 < min_periods {
                None
            } else {
                Some(f(&values[i + 1 - count..=i]))
            }
        })
        .collect()
}

/// 희소 시계열을 일 단위로 선형 보간합니다.
///
/// 분기 단위 GDP처럼 띄엄띄엄 관측되는 시계열을 일별 시계열과 병합하기
/// 위해 사용합니다. 입력은 날짜 오름차순이어야 합니다.
pub fn daily_interpolate(points: &[(NaiveDate, f64)]) -> DatedSeries {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut result = Vec::new();
    for pair in points.windows(2) {
        let (start_date, start_value) = pair[0];
        let (end_date, end_value) = pair[1];
        let span = (end_date - start_date).num_days();
        if span <= 0 {
            continue;
        }

        for offset in 0..span {
            let t = offset as f64 / span as f64;
            let value = start_value + (end_value - start_value) * t;
            result.push((start_date + Duration::days(offset), value));
        }
    }
    // 마지막 관측치 포함
    result.push(points[points.len() - 1]);
    result
}

/// 두 시계열을 날짜 기준 inner join 합니다.
///
/// 양쪽 모두 날짜 오름차순이어야 합니다.
pub fn merge_on_date(left: &[(NaiveDate, f64)], right: &[(NaiveDate, f64)]) -> Vec<(NaiveDate, f64, f64)> {
    let mut merged = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);

    while i < left.len() && j < right.len() {
        match left[i].0.cmp(&right[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                merged.push((left[i].0, left[i].1, right[j].1));
                i += 1;
                j += 1;
            }
        }
    }
    merged
}
