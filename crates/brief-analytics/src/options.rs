//! 옵션 시장 분석.
//!
//! Put/Call 비율, 변동성 스큐, 기간 구조를 고정 임계값으로 분류합니다.

use brief_core::domain::{
    OptionAnalysis, OptionChain, OptionContract, OptionSignal, PutCallRatios, SkewAnalysis,
    SkewTrend, TermPoint, TermStructure, TermTrend,
};

/// P/C 비율 약세 임계값.
pub const PC_BEARISH_THRESHOLD: f64 = 1.2;
/// P/C 비율 강세 임계값.
pub const PC_BULLISH_THRESHOLD: f64 = 0.8;
/// ATM 판정 moneyness 밴드 (±1%).
pub const ATM_BAND: f64 = 0.01;
/// OTM 풋 moneyness 구간 (-10% ~ -5%).
pub const OTM_PUT_RANGE: (f64, f64) = (-0.10, -0.05);
/// OTM 콜 moneyness 구간 (5% ~ 10%).
pub const OTM_CALL_RANGE: (f64, f64) = (0.05, 0.10);
/// 스큐 중립 밴드.
pub const SKEW_NEUTRAL_BAND: f64 = 0.02;
/// 기간 구조 평탄 판정 기울기.
pub const TERM_FLAT_BAND: f64 = 0.0001;

/// 옵션 데이터 분석기.
#[derive(Debug, Default)]
pub struct OptionAnalyzer;

impl OptionAnalyzer {
    /// 새로운 분석기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 근월물 + 월물 체인으로 전체 분석을 수행합니다.
    ///
    /// 첫 번째 체인을 근월물로 간주해 P/C 비율과 스큐를 계산하고,
    /// 전체 체인으로 기간 구조를 계산합니다.
    pub fn analyze(&self, chains: &[OptionChain]) -> OptionAnalysis {
        let (ratios, skew) = match chains.first() {
            Some(nearest) => (
                self.analyze_put_call_ratios(nearest),
                self.analyze_skew(nearest),
            ),
            None => (PutCallRatios::unknown(), SkewAnalysis::unknown()),
        };

        OptionAnalysis {
            ratios,
            skew,
            term: self.analyze_term_structure(chains),
        }
    }

    /// Put/Call 비율 분석.
    ///
    /// 거래량 기준과 미결제약정 기준 비율을 각각 분류한 뒤, 두 신호가
    /// 일치하면 강도는 둘 중 큰 값을, 불일치하면 거래량 신호에 0.7
    /// 가중치를 적용합니다.
    pub fn analyze_put_call_ratios(&self, chain: &OptionChain) -> PutCallRatios {
        if chain.calls.is_empty() || chain.puts.is_empty() {
            return PutCallRatios::unknown();
        }

        let call_volume: u64 = chain.calls.iter().map(|c| c.volume).sum();
        let put_volume: u64 = chain.puts.iter().map(|c| c.volume).sum();
        let volume_ratio = if call_volume > 0 {
            put_volume as f64 / call_volume as f64
        } else {
            0.0
        };

        let call_oi: u64 = chain.calls.iter().map(|c| c.open_interest).sum();
        let put_oi: u64 = chain.puts.iter().map(|c| c.open_interest).sum();
        let oi_ratio = if call_oi > 0 {
            put_oi as f64 / call_oi as f64
        } else {
            0.0
        };

        let volume_signal = Self::signal(volume_ratio);
        let oi_signal = Self::signal(oi_ratio);

        // 거래량 신호를 우선하되, 미결제약정과 일치할 때만 강도를 합산
        let (final_signal, strength) = if volume_signal == oi_signal {
            (
                volume_signal,
                Self::signal_strength(volume_ratio).max(Self::signal_strength(oi_ratio)),
            )
        } else {
            (volume_signal, Self::signal_strength(volume_ratio) * 0.7)
        };

        PutCallRatios {
            volume_ratio,
            oi_ratio,
            volume_signal,
            oi_signal,
            final_signal,
            strength,
        }
    }

    /// 변동성 스큐 분석.
    ///
    /// ATM IV는 콜/풋을 합쳐 moneyness ±1% 이내 계약의 평균이며,
    /// OTM 구간 IV가 없으면 해당 스큐는 0으로 간주합니다.
    pub fn analyze_skew(&self, chain: &OptionChain) -> SkewAnalysis {
        let Some(atm_iv) = Self::atm_iv(chain) else {
            return SkewAnalysis::unknown();
        };

        let otm_put_iv = Self::mean_iv_in_range(&chain.puts, chain.underlying_price, OTM_PUT_RANGE);
        let otm_call_iv =
            Self::mean_iv_in_range(&chain.calls, chain.underlying_price, OTM_CALL_RANGE);

        let put_skew = otm_put_iv.map(|iv| iv - atm_iv).unwrap_or(0.0);
        let call_skew = otm_call_iv.map(|iv| iv - atm_iv).unwrap_or(0.0);
        let skew_level = put_skew - call_skew;

        let trend = if skew_level.abs() < SKEW_NEUTRAL_BAND {
            SkewTrend::Neutral
        } else if skew_level > 0.0 {
            SkewTrend::LeftSkewed
        } else {
            SkewTrend::RightSkewed
        };

        SkewAnalysis {
            atm_iv,
            otm_put_iv: otm_put_iv.unwrap_or(0.0),
            otm_call_iv: otm_call_iv.unwrap_or(0.0),
            put_skew,
            call_skew,
            skew_level,
            trend,
        }
    }

    /// 기간 구조 분석.
    ///
    /// 만기별 ATM IV를 만기순으로 정렬한 뒤 근월물 대비 원월물의 일당
    /// 기울기로 콘탱고/백워데이션을 판정합니다.
    pub fn analyze_term_structure(&self, chains: &[OptionChain]) -> TermStructure {
        let mut points: Vec<TermPoint> = chains
            .iter()
            .filter_map(|chain| {
                Self::atm_iv(chain).map(|atm_iv| TermPoint {
                    expiry: chain.expiry,
                    atm_iv,
                })
            })
            .collect();

        if points.is_empty() {
            return TermStructure::unknown();
        }

        points.sort_by_key(|p| p.expiry);

        let first = &points[0];
        let last = &points[points.len() - 1];
        let days_between = (last.expiry - first.expiry).num_days();
        let slope = if days_between > 0 {
            (last.atm_iv - first.atm_iv) / days_between as f64
        } else {
            0.0
        };

        let trend = if slope.abs() < TERM_FLAT_BAND {
            TermTrend::Flat
        } else if slope > 0.0 {
            TermTrend::Contango
        } else {
            TermTrend::Backwardation
        };

        TermStructure {
            points,
            slope,
            trend,
        }
    }

    /// P/C 비율 신호 분류.
    fn signal(ratio: f64) -> OptionSignal {
        if ratio > PC_BEARISH_THRESHOLD {
            OptionSignal::Bearish
        } else if ratio < PC_BULLISH_THRESHOLD {
            OptionSignal::Bullish
        } else {
            OptionSignal::Neutral
        }
    }

    /// 신호 강도 (0~1).
    fn signal_strength(ratio: f64) -> f64 {
        if ratio > PC_BEARISH_THRESHOLD {
            ((ratio - PC_BEARISH_THRESHOLD) / 0.8).min(1.0)
        } else if ratio < PC_BULLISH_THRESHOLD {
            ((PC_BULLISH_THRESHOLD - ratio) / 0.4).min(1.0)
        } else {
            0.0
        }
    }

    /// ATM 내재변동성 (콜/풋 합산, moneyness ±1%).
    fn atm_iv(chain: &OptionChain) -> Option<f64> {
        if chain.underlying_price <= 0.0 {
            return None;
        }

        let ivs: Vec<f64> = chain
            .calls
            .iter()
            .chain(chain.puts.iter())
            .filter(|c| {
                let moneyness = c.strike / chain.underlying_price - 1.0;
                moneyness.abs() < ATM_BAND
            })
            .filter_map(|c| c.implied_volatility)
            .collect();

        if ivs.is_empty() {
            None
        } else {
            Some(ivs.iter().sum::<f64>() / ivs.len() as f64)
        }
    }

    /// moneyness 구간 내 평균 내재변동성.
    fn mean_iv_in_range(
        contracts: &[OptionContract],
        underlying_price: f64,
        range: (f64, f64),
    ) -> Option<f64> {
        if underlying_price <= 0.0 {
            return None;
        }

        let ivs: Vec<f64> = contracts
            .iter()
            .filter(|c| {
                let moneyness = c.strike / underlying_price - 1.0;
                range.0 < moneyness && moneyness < range.1
            })
            .filter_map(|c| c.implied_volatility)
            .collect();

        if ivs.is_empty() {
            None
        } else {
            Some(ivs.iter().sum::<f64>() / ivs.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn contract(strike: f64, volume: u64, oi: u64, iv: Option<f64>) -> OptionContract {
        OptionContract {
            strike,
            volume,
            open_interest: oi,
            implied_volatility: iv,
        }
    }

    fn chain_with_volumes(call_volume: u64, put_volume: u64) -> OptionChain {
        OptionChain {
            expiry: NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(),
            calls: vec![contract(5000.0, call_volume, 1000, Some(0.15))],
            puts: vec![contract(5000.0, put_volume, 1000, Some(0.16))],
            underlying_price: 5000.0,
        }
    }

    #[test]
    fn test_put_call_bearish_signal() {
        let analyzer = OptionAnalyzer::new();
        let ratios = analyzer.analyze_put_call_ratios(&chain_with_volumes(100, 150));

        assert!((ratios.volume_ratio - 1.5).abs() < 1e-9);
        assert_eq!(ratios.volume_signal, OptionSignal::Bearish);
        assert_eq!(ratios.final_signal, OptionSignal::Bearish);
        // OI 비율 1.0 (NEUTRAL) → 신호 불일치, 강도 = (1.5-1.2)/0.8 * 0.7
        assert!((ratios.strength - (0.3 / 0.8) * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_put_call_agreeing_signals_take_max_strength() {
        let chain = OptionChain {
            expiry: NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(),
            calls: vec![contract(5000.0, 100, 100, None)],
            puts: vec![contract(5000.0, 50, 40, None)],
            underlying_price: 5000.0,
        };

        let analyzer = OptionAnalyzer::new();
        let ratios = analyzer.analyze_put_call_ratios(&chain);

        // 거래량 0.5 / OI 0.4 모두 BULLISH
        assert_eq!(ratios.final_signal, OptionSignal::Bullish);
        let vol_strength = (0.8f64 - 0.5) / 0.4;
        let oi_strength = 1.0; // (0.8-0.4)/0.4 = 1.0
        assert!((ratios.strength - vol_strength.max(oi_strength)).abs() < 1e-9);
    }

    #[test]
    fn test_put_call_empty_side_is_unknown() {
        let chain = OptionChain {
            expiry: NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(),
            calls: Vec::new(),
            puts: vec![contract(5000.0, 50, 40, None)],
            underlying_price: 5000.0,
        };

        let analyzer = OptionAnalyzer::new();
        let ratios = analyzer.analyze_put_call_ratios(&chain);
        assert_eq!(ratios.final_signal, OptionSignal::Unknown);
    }

    fn skewed_chain(otm_put_iv: f64, otm_call_iv: f64) -> OptionChain {
        OptionChain {
            expiry: NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(),
            calls: vec![
                contract(5000.0, 10, 10, Some(0.15)), // ATM
                contract(5350.0, 10, 10, Some(otm_call_iv)), // +7%
            ],
            puts: vec![
                contract(5010.0, 10, 10, Some(0.15)), // ATM
                contract(4650.0, 10, 10, Some(otm_put_iv)), // -7%
            ],
            underlying_price: 5000.0,
        }
    }

    #[test]
    fn test_skew_left_skewed() {
        let analyzer = OptionAnalyzer::new();
        let skew = analyzer.analyze_skew(&skewed_chain(0.22, 0.16));

        assert!((skew.atm_iv - 0.15).abs() < 1e-9);
        assert!((skew.put_skew - 0.07).abs() < 1e-9);
        assert!((skew.call_skew - 0.01).abs() < 1e-9);
        assert_eq!(skew.trend, SkewTrend::LeftSkewed);
    }

    #[test]
    fn test_skew_neutral_band() {
        let analyzer = OptionAnalyzer::new();
        let skew = analyzer.analyze_skew(&skewed_chain(0.158, 0.152));
        assert_eq!(skew.trend, SkewTrend::Neutral);
    }

    #[test]
    fn test_skew_without_iv_is_unknown() {
        let chain = OptionChain {
            expiry: NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(),
            calls: vec![contract(5000.0, 10, 10, None)],
            puts: vec![contract(5000.0, 10, 10, None)],
            underlying_price: 5000.0,
        };

        let analyzer = OptionAnalyzer::new();
        assert_eq!(analyzer.analyze_skew(&chain).trend, SkewTrend::Unknown);
    }

    fn atm_only_chain(expiry: NaiveDate, iv: f64) -> OptionChain {
        OptionChain {
            expiry,
            calls: vec![contract(5000.0, 10, 10, Some(iv))],
            puts: vec![contract(5000.0, 10, 10, Some(iv))],
            underlying_price: 5000.0,
        }
    }

    #[test]
    fn test_term_structure_contango() {
        let analyzer = OptionAnalyzer::new();
        let chains = vec![
            atm_only_chain(NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(), 0.15),
            atm_only_chain(NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(), 0.19),
        ];

        let term = analyzer.analyze_term_structure(&chains);
        assert_eq!(term.trend, TermTrend::Contango);
        assert_eq!(term.points.len(), 2);
        assert!(term.slope > 0.0);
    }

    #[test]
    fn test_term_structure_backwardation() {
        let analyzer = OptionAnalyzer::new();
        let chains = vec![
            atm_only_chain(NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(), 0.25),
            atm_only_chain(NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(), 0.18),
        ];

        assert_eq!(
            analyzer.analyze_term_structure(&chains).trend,
            TermTrend::Backwardation
        );
    }

    #[test]
    fn test_term_structure_empty_is_unknown() {
        let analyzer = OptionAnalyzer::new();
        assert_eq!(
            analyzer.analyze_term_structure(&[]).trend,
            TermTrend::Unknown
        );
    }

    #[test]
    fn test_analyze_combines_all() {
        let analyzer = OptionAnalyzer::new();
        let chains = vec![
            atm_only_chain(NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(), 0.15),
            atm_only_chain(NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(), 0.19),
        ];

        let analysis = analyzer.analyze(&chains);
        assert_eq!(analysis.term.trend, TermTrend::Contango);
        assert_ne!(analysis.ratios.final_signal, OptionSignal::Unknown);
    }
}
