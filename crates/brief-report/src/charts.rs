//! 가격 차트 PNG 생성.
//!
//! 일봉 시계열을 캔들스틱 + 거래량 2패널 차트로 렌더링합니다.
//! x축은 거래일 인덱스를 사용합니다 (휴장일 공백 제거).

use std::path::Path;

use brief_core::domain::DailyBar;
use brief_core::error::{BriefError, BriefResult};
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

/// 차트 렌더링 설정.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// 차트 너비 (픽셀)
    pub width: u32,
    /// 차트 높이 (픽셀)
    pub height: u32,
    /// 배경색
    pub background_color: RGBColor,
    /// 상승 캔들 색상
    pub candle_up_color: RGBColor,
    /// 하락 캔들 색상
    pub candle_down_color: RGBColor,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 640,
            background_color: WHITE,
            candle_up_color: RGBColor(200, 30, 30),
            candle_down_color: RGBColor(30, 60, 200),
        }
    }
}

/// 캔들스틱 가격 차트 생성기.
pub struct PriceChartGenerator {
    config: ChartConfig,
}

impl PriceChartGenerator {
    /// 기본 설정으로 생성.
    pub fn new() -> Self {
        Self {
            config: ChartConfig::default(),
        }
    }

    /// 사용자 지정 설정으로 생성.
    pub fn with_config(config: ChartConfig) -> Self {
        Self { config }
    }

    /// 일봉 시계열을 캔들스틱 + 거래량 차트로 저장합니다.
    ///
    /// 캔들이 2개 미만이면 축 범위를 만들 수 없어 에러를 반환합니다.
    pub fn generate(&self, bars: &[DailyBar], title: &str, output_path: &Path) -> BriefResult<()> {
        if bars.len() < 2 {
            return Err(BriefError::Chart(format!(
                "캔들 데이터가 부족합니다 ({} 포인트)",
                bars.len()
            )));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let (price_range, volume_range) = Self::value_ranges(bars);
        let x_range = -0.5f64..(bars.len() as f64 - 0.5);

        let root = BitMapBackend::new(output_path, (self.config.width, self.config.height))
            .into_drawing_area();
        root.fill(&self.config.background_color)
            .map_err(|e| BriefError::Chart(e.to_string()))?;

        // 가격(5) : 거래량(1) 패널 분리
        let price_height = self.config.height * 5 / 6;
        let (price_area, volume_area) = root.split_vertically(price_height);

        self.draw_price_panel(&price_area, bars, title, &x_range, &price_range)?;
        self.draw_volume_panel(&volume_area, bars, &x_range, &volume_range)?;

        root.present().map_err(|e| BriefError::Chart(e.to_string()))?;
        debug!(path = %output_path.display(), "차트 저장 완료");
        Ok(())
    }

    /// 가격/거래량 축 범위 계산 (상하 2% 여백).
    fn value_ranges(bars: &[DailyBar]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let mut price_min = f64::MAX;
        let mut price_max = f64::MIN;
        let mut volume_max = 0.0f64;

        for bar in bars {
            let low = bar.low.to_f64().unwrap_or(0.0);
            let high = bar.high.to_f64().unwrap_or(0.0);
            price_min = price_min.min(low);
            price_max = price_max.max(high);
            volume_max = volume_max.max(bar.volume as f64);
        }

        let margin = (price_max - price_min).max(f64::EPSILON) * 0.02;
        (
            (price_min - margin)..(price_max + margin),
            0.0..(volume_max * 1.05).max(1.0),
        )
    }

    fn draw_price_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, plotters::coord::Shift>,
        bars: &[DailyBar],
        title: &str,
        x_range: &std::ops::Range<f64>,
        price_range: &std::ops::Range<f64>,
    ) -> BriefResult<()> {
        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(0)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), price_range.clone())
            .map_err(|e| BriefError::Chart(e.to_string()))?;

        chart
            .configure_mesh()
            .x_labels(0)
            .y_labels(8)
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(|e| BriefError::Chart(e.to_string()))?;

        for (i, bar) in bars.iter().enumerate() {
            let open = bar.open.to_f64().unwrap_or(0.0);
            let high = bar.high.to_f64().unwrap_or(0.0);
            let low = bar.low.to_f64().unwrap_or(0.0);
            let close = bar.close.to_f64().unwrap_or(0.0);
            let x = i as f64;

            let color = if close >= open {
                &self.config.candle_up_color
            } else {
                &self.config.candle_down_color
            };

            // 심지
            chart
                .draw_series(LineSeries::new(vec![(x, low), (x, high)], color))
                .map_err(|e| BriefError::Chart(e.to_string()))?;

            // 몸통
            let body_top = open.max(close);
            let body_bottom = open.min(close);
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.35, body_bottom), (x + 0.35, body_top)],
                    color.filled(),
                )))
                .map_err(|e| BriefError::Chart(e.to_string()))?;
        }

        Ok(())
    }

    fn draw_volume_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, plotters::coord::Shift>,
        bars: &[DailyBar],
        x_range: &std::ops::Range<f64>,
        volume_range: &std::ops::Range<f64>,
    ) -> BriefResult<()> {
        let dates: Vec<String> = bars
            .iter()
            .map(|b| b.date.format("%m/%d").to_string())
            .collect();

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), volume_range.clone())
            .map_err(|e| BriefError::Chart(e.to_string()))?;

        chart
            .configure_mesh()
            .x_labels(8)
            .y_labels(3)
            .x_label_formatter(&move |x| {
                let idx = x.round() as usize;
                dates.get(idx).cloned().unwrap_or_default()
            })
            .y_label_formatter(&|v| {
                if *v >= 1e9 {
                    format!("{:.1}B", v / 1e9)
                } else if *v >= 1e6 {
                    format!("{:.1}M", v / 1e6)
                } else {
                    format!("{:.0}", v)
                }
            })
            .draw()
            .map_err(|e| BriefError::Chart(e.to_string()))?;

        for (i, bar) in bars.iter().enumerate() {
            let open = bar.open.to_f64().unwrap_or(0.0);
            let close = bar.close.to_f64().unwrap_or(0.0);
            let x = i as f64;

            let color = if close >= open {
                self.config.candle_up_color.mix(0.5)
            } else {
                self.config.candle_down_color.mix(0.5)
            };

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.35, 0.0), (x + 0.35, bar.volume as f64)],
                    color.filled(),
                )))
                .map_err(|e| BriefError::Chart(e.to_string()))?;
        }

        Ok(())
    }
}

impl Default for PriceChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}
