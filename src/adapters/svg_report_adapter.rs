//! SVG chart rendering for the layered chart set.
//!
//! One document: the price panel (candle strokes, overlays, optional
//! volume bars) stacked above one panel per oscillator. Scales are shared
//! across symbols so the layers are comparable.

use crate::domain::chart::{ChartLayerSet, OscillatorPanel, PriceLayer};
use crate::domain::error::MarketdashError;
use crate::domain::indicator::{IndicatorKind, IndicatorSeries, IndicatorValue};
use crate::domain::performance::PerformanceRecord;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

const PANEL_WIDTH: f64 = 800.0;
const PRICE_HEIGHT: f64 = 320.0;
const OSC_HEIGHT: f64 = 140.0;
const PADDING: f64 = 40.0;

pub struct SvgReportAdapter;

impl SvgReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for SvgReportAdapter {
    fn write(
        &self,
        chart: &ChartLayerSet,
        performance: &[PerformanceRecord],
        output_path: &Path,
    ) -> Result<(), MarketdashError> {
        fs::write(output_path, render_document(chart, performance))?;
        Ok(())
    }
}

pub fn render_document(chart: &ChartLayerSet, performance: &[PerformanceRecord]) -> String {
    if chart.price_layers.is_empty() {
        return "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"40\">\
                <text x=\"10\" y=\"25\">No chart data available.</text></svg>\n"
            .to_string();
    }

    let total_height = PRICE_HEIGHT + chart.oscillator_panels.len() as f64 * OSC_HEIGHT;
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\">\n",
        PANEL_WIDTH, total_height
    );
    out.push_str(&format!(
        "<rect width=\"{:.0}\" height=\"{:.0}\" fill=\"white\"/>\n",
        PANEL_WIDTH, total_height
    ));

    out.push_str(&render_price_panel(&chart.price_layers, performance));

    let mut offset = PRICE_HEIGHT;
    for panel in &chart.oscillator_panels {
        out.push_str(&format!("<g transform=\"translate(0,{:.0})\">\n", offset));
        out.push_str(&render_oscillator_panel(panel));
        out.push_str("</g>\n");
        offset += OSC_HEIGHT;
    }

    out.push_str("</svg>\n");
    out
}

/// Map an index along the shared x axis. Every series uses the longest
/// layer's bar count so panels line up vertically.
fn x_position(index: usize, max_len: usize) -> f64 {
    let plot_width = PANEL_WIDTH - 2.0 * PADDING;
    let scale = if max_len > 1 {
        plot_width / (max_len - 1) as f64
    } else {
        0.0
    };
    PADDING + index as f64 * scale
}

fn y_position(value: f64, min: f64, max: f64, height: f64) -> f64 {
    let plot_height = height - 2.0 * PADDING;
    let range = max - min;
    let scale = if range > 0.0 { plot_height / range } else { 0.0 };
    height - PADDING - (value - min) * scale
}

fn render_price_panel(layers: &[PriceLayer], performance: &[PerformanceRecord]) -> String {
    let max_len = layers.iter().map(|l| l.candles.len()).max().unwrap_or(0);
    let extremes: Vec<(f64, f64)> = layers.iter().filter_map(|l| l.extremes).collect();
    let max_high = extremes
        .iter()
        .map(|e| e.0)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_low = extremes.iter().map(|e| e.1).fold(f64::INFINITY, f64::min);
    if !max_high.is_finite() || !min_low.is_finite() {
        return String::new();
    }

    let max_volume = layers
        .iter()
        .flat_map(|l| l.candles.iter().map(|b| b.volume))
        .max()
        .unwrap_or(0);

    let mut out = String::from("<g class=\"price\">\n");

    for (i, record) in performance.iter().enumerate() {
        out.push_str(&format!(
            "<text x=\"{:.0}\" y=\"16\" font-size=\"12\">{} {:+.2}%</text>\n",
            PADDING + i as f64 * 120.0,
            record.symbol,
            record.percent_return
        ));
    }

    for layer in layers {
        let color = layer.color.0;

        if layer.show_volume && max_volume > 0 {
            for (i, bar) in layer.candles.iter().enumerate() {
                let x = x_position(i, max_len);
                let h = (PRICE_HEIGHT * 0.15) * bar.volume as f64 / max_volume as f64;
                out.push_str(&format!(
                    "<rect class=\"volume\" x=\"{:.1}\" y=\"{:.1}\" width=\"2\" height=\"{:.1}\" \
                     fill=\"{}\" opacity=\"0.3\"/>\n",
                    x - 1.0,
                    PRICE_HEIGHT - PADDING - h,
                    h,
                    color
                ));
            }
        }

        for (i, bar) in layer.candles.iter().enumerate() {
            let x = x_position(i, max_len);
            let y_high = y_position(bar.high, min_low, max_high, PRICE_HEIGHT);
            let y_low = y_position(bar.low, min_low, max_high, PRICE_HEIGHT);
            let y_open = y_position(bar.open, min_low, max_high, PRICE_HEIGHT);
            let y_close = y_position(bar.close, min_low, max_high, PRICE_HEIGHT);

            out.push_str(&format!(
                "<line class=\"wick\" x1=\"{x:.1}\" y1=\"{:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" \
                 stroke=\"{}\" stroke-width=\"1\"/>\n",
                y_high, y_low, color
            ));
            out.push_str(&format!(
                "<line class=\"body\" x1=\"{x:.1}\" y1=\"{:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" \
                 stroke=\"{}\" stroke-width=\"3\"/>\n",
                y_open, y_close, color
            ));
        }

        for overlay in &layer.overlays {
            out.push_str(&render_overlay(
                overlay, color, max_len, min_low, max_high,
            ));
        }
    }

    out.push_str("</g>\n");
    out
}

fn render_overlay(
    series: &IndicatorSeries,
    color: &str,
    max_len: usize,
    min: f64,
    max: f64,
) -> String {
    match series.kind {
        IndicatorKind::Bollinger { .. } => {
            let select =
                |f: fn(f64, f64, f64) -> f64| -> String {
                    polyline_points(series, max_len, min, max, PRICE_HEIGHT, move |v| match v {
                        IndicatorValue::Bollinger {
                            upper,
                            middle,
                            lower,
                        } => Some(f(*upper, *middle, *lower)),
                        _ => None,
                    })
                };
            let mut out = String::new();
            for points in [
                select(|u, _, _| u),
                select(|_, m, _| m),
                select(|_, _, l| l),
            ] {
                if !points.is_empty() {
                    out.push_str(&format!(
                        "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1\" \
                         stroke-dasharray=\"2,2\" points=\"{}\"/>\n",
                        color, points
                    ));
                }
            }
            out
        }
        _ => {
            let points =
                polyline_points(series, max_len, min, max, PRICE_HEIGHT, |v| match v {
                    IndicatorValue::Simple(value) => Some(*value),
                    _ => None,
                });
            if points.is_empty() {
                String::new()
            } else {
                format!(
                    "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" points=\"{}\"/>\n",
                    color, points
                )
            }
        }
    }
}

fn render_oscillator_panel(panel: &OscillatorPanel) -> String {
    let max_len = panel
        .traces
        .iter()
        .map(|t| t.series.values.len())
        .max()
        .unwrap_or(0);

    // RSI has a fixed domain; MACD scales to its own range
    let (min, max) = match panel.kind {
        IndicatorKind::Rsi(_) => (0.0, 100.0),
        _ => {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for trace in &panel.traces {
                for point in trace.series.values.iter().filter(|p| p.valid) {
                    if let IndicatorValue::Macd { line, signal } = point.value {
                        min = min.min(line).min(signal);
                        max = max.max(line).max(signal);
                    }
                }
            }
            if !min.is_finite() {
                (0.0, 1.0)
            } else {
                (min, max)
            }
        }
    };

    let mut out = format!(
        "<g class=\"oscillator\">\n<text x=\"{:.0}\" y=\"16\" font-size=\"12\">{}</text>\n",
        PADDING, panel.kind
    );

    for trace in &panel.traces {
        let color = trace.color.0;
        match panel.kind {
            IndicatorKind::Macd { .. } => {
                let line = polyline_points(&trace.series, max_len, min, max, OSC_HEIGHT, |v| {
                    match v {
                        IndicatorValue::Macd { line, .. } => Some(*line),
                        _ => None,
                    }
                });
                let signal =
                    polyline_points(&trace.series, max_len, min, max, OSC_HEIGHT, |v| match v {
                        IndicatorValue::Macd { signal, .. } => Some(*signal),
                        _ => None,
                    });
                if !line.is_empty() {
                    out.push_str(&format!(
                        "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" points=\"{}\"/>\n",
                        color, line
                    ));
                }
                if !signal.is_empty() {
                    out.push_str(&format!(
                        "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1\" \
                         stroke-dasharray=\"4,2\" points=\"{}\"/>\n",
                        color, signal
                    ));
                }
            }
            _ => {
                let points =
                    polyline_points(&trace.series, max_len, min, max, OSC_HEIGHT, |v| match v {
                        IndicatorValue::Simple(value) => Some(*value),
                        _ => None,
                    });
                if !points.is_empty() {
                    out.push_str(&format!(
                        "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" points=\"{}\"/>\n",
                        color, points
                    ));
                }
            }
        }
    }

    out.push_str("</g>\n");
    out
}

/// Build an SVG points list from the valid entries of a series.
fn polyline_points<F>(
    series: &IndicatorSeries,
    max_len: usize,
    min: f64,
    max: f64,
    height: f64,
    select: F,
) -> String
where
    F: Fn(&IndicatorValue) -> Option<f64>,
{
    let coords: Vec<String> = series
        .values
        .iter()
        .enumerate()
        .filter(|(_, p)| p.valid)
        .filter_map(|(i, p)| {
            select(&p.value).map(|v| {
                format!(
                    "{:.1},{:.1}",
                    x_position(i, max_len),
                    y_position(v, min, max, height)
                )
            })
        })
        .collect();
    coords.join(" ")
}
