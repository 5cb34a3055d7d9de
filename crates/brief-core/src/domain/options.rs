//! 옵션 시장 분석 레코드.
//!
//! Put/Call 비율, 변동성 스큐, 기간 구조의 분류 결과를 담습니다.
//! 분류 레이블은 리포트 원문 표기를 따라 영문 대문자로 표시합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 옵션 계약 (단일 행사가).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    /// 행사가
    pub strike: f64,
    /// 거래량
    pub volume: u64,
    /// 미결제약정
    pub open_interest: u64,
    /// 내재변동성 (제공되지 않는 경우 None)
    pub implied_volatility: Option<f64>,
}

/// 단일 만기의 옵션 체인.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    /// 만기일
    pub expiry: NaiveDate,
    /// 콜옵션 목록
    pub calls: Vec<OptionContract>,
    /// 풋옵션 목록
    pub puts: Vec<OptionContract>,
    /// 기초자산 현재가
    pub underlying_price: f64,
}

/// P/C 비율 기반 신호.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSignal {
    /// 비율 < 0.8
    Bullish,
    /// 비율 > 1.2
    Bearish,
    /// 0.8 <= 비율 <= 1.2
    Neutral,
    /// 데이터 없음
    Unknown,
}

impl std::fmt::Display for OptionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
            Self::Neutral => "NEUTRAL",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

impl OptionSignal {
    /// 내러티브용 한국어 설명.
    pub fn describe_ko(&self) -> &'static str {
        match self {
            Self::Bullish => "콜옵션 우위로 상방 기대가 우세한",
            Self::Bearish => "풋옵션 우위로 하방 경계가 강한",
            Self::Neutral => "풋/콜이 균형을 이루는 중립적인",
            Self::Unknown => "판단이 어려운",
        }
    }
}

/// Put/Call 비율 분석 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutCallRatios {
    /// 거래량 기준 P/C 비율
    pub volume_ratio: f64,
    /// 미결제약정 기준 P/C 비율
    pub oi_ratio: f64,
    /// 거래량 신호
    pub volume_signal: OptionSignal,
    /// 미결제약정 신호
    pub oi_signal: OptionSignal,
    /// 최종 신호
    pub final_signal: OptionSignal,
    /// 신호 강도 (0~1)
    pub strength: f64,
}

impl PutCallRatios {
    /// 데이터 없음 결과.
    pub fn unknown() -> Self {
        Self {
            volume_ratio: 0.0,
            oi_ratio: 0.0,
            volume_signal: OptionSignal::Unknown,
            oi_signal: OptionSignal::Unknown,
            final_signal: OptionSignal::Unknown,
            strength: 0.0,
        }
    }
}

/// 변동성 스큐 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkewTrend {
    /// 풋 스큐 우위 (하방 보호 수요)
    LeftSkewed,
    /// 콜 스큐 우위 (상방 추격 수요)
    RightSkewed,
    /// 스큐 미미
    Neutral,
    /// 데이터 없음
    Unknown,
}

impl std::fmt::Display for SkewTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::LeftSkewed => "LEFT_SKEWED",
            Self::RightSkewed => "RIGHT_SKEWED",
            Self::Neutral => "NEUTRAL",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

impl SkewTrend {
    /// 내러티브용 한국어 설명.
    pub fn describe_ko(&self) -> &'static str {
        match self {
            Self::LeftSkewed => "OTM 풋 수요가 높아 하방 리스크 헤지가 활발합니다",
            Self::RightSkewed => "OTM 콜 수요가 높아 상방 추격 매수가 나타납니다",
            Self::Neutral => "스큐가 뚜렷하지 않습니다",
            Self::Unknown => "스큐를 판단할 데이터가 부족합니다",
        }
    }
}

/// 변동성 스큐 분석 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkewAnalysis {
    /// ATM 내재변동성
    pub atm_iv: f64,
    /// OTM 풋 내재변동성
    pub otm_put_iv: f64,
    /// OTM 콜 내재변동성
    pub otm_call_iv: f64,
    /// 풋 스큐 (OTM 풋 IV - ATM IV)
    pub put_skew: f64,
    /// 콜 스큐 (OTM 콜 IV - ATM IV)
    pub call_skew: f64,
    /// 스큐 수준 (풋 스큐 - 콜 스큐)
    pub skew_level: f64,
    /// 스큐 방향
    pub trend: SkewTrend,
}

impl SkewAnalysis {
    /// 데이터 없음 결과.
    pub fn unknown() -> Self {
        Self {
            atm_iv: 0.0,
            otm_put_iv: 0.0,
            otm_call_iv: 0.0,
            put_skew: 0.0,
            call_skew: 0.0,
            skew_level: 0.0,
            trend: SkewTrend::Unknown,
        }
    }
}

/// 기간 구조 추세.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermTrend {
    /// 원월물 IV > 근월물 IV
    Contango,
    /// 원월물 IV < 근월물 IV
    Backwardation,
    /// 기울기 미미
    Flat,
    /// 데이터 없음
    Unknown,
}

impl std::fmt::Display for TermTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Contango => "CONTANGO",
            Self::Backwardation => "BACKWARDATION",
            Self::Flat => "FLAT",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

impl TermTrend {
    /// 내러티브용 한국어 설명.
    pub fn describe_ko(&self) -> &'static str {
        match self {
            Self::Contango => "원월물 변동성이 높은 콘탱고 구조로 현재 구간은 상대적으로 안정적입니다",
            Self::Backwardation => "근월물 변동성이 높은 백워데이션 구조로 단기 불확실성이 큽니다",
            Self::Flat => "만기별 변동성이 평탄한 구조입니다",
            Self::Unknown => "기간 구조를 판단할 데이터가 부족합니다",
        }
    }
}

/// 만기별 ATM 내재변동성 포인트.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermPoint {
    /// 만기일
    pub expiry: NaiveDate,
    /// ATM 내재변동성
    pub atm_iv: f64,
}

/// 기간 구조 분석 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermStructure {
    /// 만기순 ATM IV 목록
    pub points: Vec<TermPoint>,
    /// 일당 IV 기울기
    pub slope: f64,
    /// 추세
    pub trend: TermTrend,
}

impl TermStructure {
    /// 데이터 없음 결과.
    pub fn unknown() -> Self {
        Self {
            points: Vec::new(),
            slope: 0.0,
            trend: TermTrend::Unknown,
        }
    }
}

/// 지수별 옵션 분석 결과 묶음.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionAnalysis {
    /// P/C 비율 분석 (근월물)
    pub ratios: PutCallRatios,
    /// 스큐 분석 (근월물)
    pub skew: SkewAnalysis,
    /// 기간 구조 분석 (월물 전체)
    pub term: TermStructure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_labels() {
        assert_eq!(OptionSignal::Bearish.to_string(), "BEARISH");
        assert_eq!(SkewTrend::LeftSkewed.to_string(), "LEFT_SKEWED");
        assert_eq!(TermTrend::Backwardation.to_string(), "BACKWARDATION");
    }

    #[test]
    fn test_unknown_defaults() {
        let ratios = PutCallRatios::unknown();
        assert_eq!(ratios.final_signal, OptionSignal::Unknown);
        assert_eq!(ratios.strength, 0.0);

        assert_eq!(SkewAnalysis::unknown().trend, SkewTrend::Unknown);
        assert!(TermStructure::unknown().points.is_empty());
    }
}
