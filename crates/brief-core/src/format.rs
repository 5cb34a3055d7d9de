//! 한국어 리포트용 숫자 포맷팅 유틸리티.
//!
//! 내러티브와 마크다운 상세 블록에서 공통으로 사용하는 포맷 함수를
//! 제공합니다.

use rust_decimal::Decimal;

/// 정수 부분에 천 단위 구분자를 삽입합니다.
fn group_integer(integer_part: &str) -> String {
    integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<char>>()
        .into_iter()
        .rev()
        .collect()
}

/// `u64`를 천 단위 구분자와 함께 포맷합니다 (예: 거래량 `2,500,000,000`).
#[inline]
pub fn format_thousands_u64(value: u64) -> String {
    group_integer(&value.to_string())
}

/// `f64`를 천 단위 구분자 + 지정 소수 자리로 포맷합니다 (예: `4,500.21`).
pub fn format_grouped_f64(value: f64, precision: usize) -> String {
    let formatted = format!("{:.prec$}", value.abs(), prec = precision);
    let mut parts = formatted.splitn(2, '.');
    let integer_part = parts.next().unwrap_or("0");
    let grouped = group_integer(integer_part);

    let sign = if value < 0.0 { "-" } else { "" };
    match parts.next() {
        Some(decimal_part) => format!("{}{}.{}", sign, grouped, decimal_part),
        None => format!("{}{}", sign, grouped),
    }
}

/// `Decimal`을 천 단위 구분자 + 지정 소수 자리로 포맷합니다.
pub fn format_grouped_decimal(value: &Decimal, precision: u32) -> String {
    let rounded = value.abs().round_dp(precision);
    let formatted = format!("{:.prec$}", rounded, prec = precision as usize);
    let mut parts = formatted.splitn(2, '.');
    let integer_part = parts.next().unwrap_or("0");
    let grouped = group_integer(integer_part);

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    match parts.next() {
        Some(decimal_part) => format!("{}{}.{}", sign, grouped, decimal_part),
        None => format!("{}{}", sign, grouped),
    }
}

/// 부호를 포함한 변화율 포맷 (예: `+1.23`, `-0.45`).
#[inline]
pub fn format_signed(value: f64, precision: usize) -> String {
    format!("{:+.prec$}", value, prec = precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_thousands_u64() {
        assert_eq!(format_thousands_u64(0), "0");
        assert_eq!(format_thousands_u64(999), "999");
        assert_eq!(format_thousands_u64(1_000), "1,000");
        assert_eq!(format_thousands_u64(2_500_000_000), "2,500,000,000");
    }

    #[test]
    fn test_format_grouped_f64() {
        assert_eq!(format_grouped_f64(4500.214, 2), "4,500.21");
        assert_eq!(format_grouped_f64(-1234.5, 2), "-1,234.50");
        assert_eq!(format_grouped_f64(0.0, 2), "0.00");
        assert_eq!(format_grouped_f64(999.999, 2), "1,000.00");
    }

    #[test]
    fn test_format_grouped_decimal() {
        assert_eq!(format_grouped_decimal(&dec!(2500.5), 2), "2,500.50");
        assert_eq!(format_grouped_decimal(&dec!(-98765.432), 2), "-98,765.43");
        assert_eq!(format_grouped_decimal(&dec!(0), 2), "0.00");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(1.234, 2), "+1.23");
        assert_eq!(format_signed(-0.456, 2), "-0.46");
        assert_eq!(format_signed(0.0, 2), "+0.00");
    }
}
