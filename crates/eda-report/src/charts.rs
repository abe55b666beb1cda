//! PNG chart rendering. Every chart goes through the same shape: build
//! the figure with plotters, translate any backend failure into a
//! `Render` error so callers can decide whether to abort or degrade.

use std::path::Path;

use chrono::{NaiveDate, Weekday};
use eda_analysis::correlation::CorrelationSummary;
use eda_analysis::technical::IndicatorSeries;
use eda_core::error::{EdaError, Result};
use eda_core::models::{DailyAggregate, PriceBar};
use eda_core::time_utils::weekday_name;
use plotters::prelude::*;
use tracing::info;

const FIGURE_SIZE: (u32, u32) = (1280, 720);
const PANEL_SIZE: (u32, u32) = (1280, 1080);

type RenderResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn to_render_err(e: Box<dyn std::error::Error>) -> EdaError {
    EdaError::Render(e.to_string())
}

// ── Histogram binning ─────────────────────────────────────────────────────────

/// Bucket values into `bins` equal-width bins over [min, max].
/// Values at the upper edge land in the last bin.
pub fn bin_values(values: &[f64], bins: usize) -> Vec<((f64, f64), usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min {
        (max - min) / bins as f64
    } else {
        1.0
    };

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let lo = min + i as f64 * width;
            ((lo, lo + width), c)
        })
        .collect()
}

// ── Charts ────────────────────────────────────────────────────────────────────

/// Daily article counts as a line, overlaid with the rolling mean.
pub fn daily_volume_chart(
    path: &Path,
    daily: &[(NaiveDate, usize)],
    rolling: &[Option<f64>],
    window: u32,
) -> Result<()> {
    let render = || -> RenderResult {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let max_count = daily.iter().map(|(_, c)| *c).max().unwrap_or(1) as f64;
        let n = daily.len().max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption("Daily news volume", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0..n, 0f64..max_count * 1.05)?;
        chart
            .configure_mesh()
            .x_desc("Day")
            .y_desc("Articles")
            .x_label_formatter(&|i| {
                daily
                    .get(*i)
                    .map(|(d, _)| d.to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                daily.iter().enumerate().map(|(i, (_, c))| (i, *c as f64)),
                &BLUE,
            ))?
            .label("daily")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        let smoothed: Vec<(usize, f64)> = rolling
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
            .collect();
        chart
            .draw_series(LineSeries::new(smoothed, &RED))?
            .label(format!("{window}-day mean"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart.configure_series_labels().border_style(&BLACK).draw()?;
        root.present()?;
        Ok(())
    };

    render().map_err(to_render_err)?;
    info!("Saved figure {}", path.display());
    Ok(())
}

/// Article counts per EST hour of day.
pub fn hourly_chart(path: &Path, hourly: &[usize; 24]) -> Result<()> {
    let render = || -> RenderResult {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let max_count = hourly.iter().copied().max().unwrap_or(1);
        let mut chart = ChartBuilder::on(&root)
            .caption("Publication volume by hour (EST)", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0i32..24, 0usize..max_count + 1)?;
        chart
            .configure_mesh()
            .x_desc("Hour")
            .y_desc("Articles")
            .draw()?;

        chart.draw_series(hourly.iter().enumerate().map(|(h, &c)| {
            Rectangle::new([(h as i32, 0), (h as i32 + 1, c)], BLUE.filled())
        }))?;

        root.present()?;
        Ok(())
    };

    render().map_err(to_render_err)?;
    info!("Saved figure {}", path.display());
    Ok(())
}

/// Article counts per weekday, Monday first.
pub fn weekday_chart(path: &Path, counts: &[(Weekday, usize); 7]) -> Result<()> {
    let render = || -> RenderResult {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(1);
        let mut chart = ChartBuilder::on(&root)
            .caption("Publication volume by weekday", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0i32..7, 0usize..max_count + 1)?;
        chart
            .configure_mesh()
            .x_desc("Weekday")
            .y_desc("Articles")
            .x_label_formatter(&|i| {
                counts
                    .get(*i as usize)
                    .map(|(w, _)| weekday_name(*w).to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, (_, c))| {
            Rectangle::new([(i as i32, 0), (i as i32 + 1, *c)], BLUE.filled())
        }))?;

        root.present()?;
        Ok(())
    };

    render().map_err(to_render_err)?;
    info!("Saved figure {}", path.display());
    Ok(())
}

/// Horizontal bar ranking, used for both raw publishers and domains.
pub fn ranking_chart(path: &Path, title: &str, items: &[(String, usize)]) -> Result<()> {
    let render = || -> RenderResult {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let max_count = items.iter().map(|(_, c)| *c).max().unwrap_or(1);
        let n = items.len().max(1) as i32;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(200)
            .build_cartesian_2d(0usize..max_count + 1, 0i32..n)?;
        chart
            .configure_mesh()
            .x_desc("Articles")
            .y_label_formatter(&|i| {
                items
                    .get(*i as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(items.iter().enumerate().map(|(i, (_, c))| {
            Rectangle::new([(0, i as i32), (*c, i as i32 + 1)], BLUE.filled())
        }))?;

        root.present()?;
        Ok(())
    };

    render().map_err(to_render_err)?;
    info!("Saved figure {}", path.display());
    Ok(())
}

/// Histogram of headline lengths in characters.
pub fn length_histogram(path: &Path, lengths: &[f64]) -> Result<()> {
    let binned = bin_values(lengths, 30);

    let render = || -> RenderResult {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let max_count = binned.iter().map(|(_, c)| *c).max().unwrap_or(1);
        let x_max = binned.last().map(|((_, hi), _)| *hi).unwrap_or(1.0);
        let x_min = binned.first().map(|((lo, _), _)| *lo).unwrap_or(0.0);

        let mut chart = ChartBuilder::on(&root)
            .caption("Headline length distribution", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0usize..max_count + 1)?;
        chart
            .configure_mesh()
            .x_desc("Length (chars)")
            .y_desc("Headlines")
            .draw()?;

        chart.draw_series(binned.iter().map(|((lo, hi), c)| {
            Rectangle::new([(*lo, 0), (*hi, *c)], BLUE.filled())
        }))?;

        root.present()?;
        Ok(())
    };

    render().map_err(to_render_err)?;
    info!("Saved figure {}", path.display());
    Ok(())
}

/// Average sentiment vs next-day return, one point per aligned date.
/// The lagged Pearson r lands in the title.
pub fn sentiment_scatter(
    path: &Path,
    aggregates: &[DailyAggregate],
    summary: &CorrelationSummary,
) -> Result<()> {
    let render = || -> RenderResult {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let y_abs = aggregates
            .iter()
            .map(|a| a.lagged_return.abs())
            .fold(0.01, f64::max);

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Sentiment vs next-day return (r = {:.4})", summary.lagged),
                ("sans-serif", 30),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-1.05f64..1.05, -y_abs * 1.1..y_abs * 1.1)?;
        chart
            .configure_mesh()
            .x_desc("Average daily sentiment")
            .y_desc("Next-day return")
            .draw()?;

        chart.draw_series(
            aggregates
                .iter()
                .map(|a| Circle::new((a.avg_sentiment, a.lagged_return), 4, BLUE.filled())),
        )?;

        root.present()?;
        Ok(())
    };

    render().map_err(to_render_err)?;
    info!("Saved figure {}", path.display());
    Ok(())
}

/// Three-row technical panel: close with SMA/EMA overlays, RSI with the
/// 30/70 guides, MACD with its signal line.
pub fn indicator_panel(
    path: &Path,
    ticker: &str,
    bars: &[PriceBar],
    series: &IndicatorSeries,
) -> Result<()> {
    let render = || -> RenderResult {
        let root = BitMapBackend::new(path, PANEL_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly((3, 1));
        let n = bars.len().max(1);

        // Price + moving averages.
        {
            let lo = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            let hi = bars.iter().map(|b| b.high).fold(1.0, f64::max);
            let mut chart = ChartBuilder::on(&panels[0])
                .caption(format!("{ticker} close / SMA-50 / EMA-20"), ("sans-serif", 24))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(60)
                .build_cartesian_2d(0..n, lo * 0.98..hi * 1.02)?;
            chart.configure_mesh().y_desc("Price").draw()?;

            chart
                .draw_series(LineSeries::new(
                    bars.iter().enumerate().map(|(i, b)| (i, b.close)),
                    &BLACK,
                ))?
                .label("close")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));
            chart
                .draw_series(LineSeries::new(masked_points(&series.sma_50), &BLUE))?
                .label("SMA-50")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
            chart
                .draw_series(LineSeries::new(masked_points(&series.ema_20), &RED))?
                .label("EMA-20")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
            chart.configure_series_labels().border_style(&BLACK).draw()?;
        }

        // RSI.
        {
            let mut chart = ChartBuilder::on(&panels[1])
                .caption("RSI-14", ("sans-serif", 24))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(60)
                .build_cartesian_2d(0..n, 0f64..100f64)?;
            chart.configure_mesh().y_desc("RSI").draw()?;

            chart.draw_series(LineSeries::new(masked_points(&series.rsi_14), &BLUE))?;
            for guide in [30.0, 70.0] {
                chart.draw_series(LineSeries::new(
                    vec![(0, guide), (n - 1, guide)],
                    &RED.mix(0.5),
                ))?;
            }
        }

        // MACD + signal.
        {
            let extent = series
                .macd
                .iter()
                .chain(series.macd_signal.iter())
                .filter_map(|v| v.map(f64::abs))
                .fold(0.01, f64::max);
            let mut chart = ChartBuilder::on(&panels[2])
                .caption("MACD(12, 26, 9)", ("sans-serif", 24))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(60)
                .build_cartesian_2d(0..n, -extent * 1.1..extent * 1.1)?;
            chart.configure_mesh().y_desc("MACD").draw()?;

            chart
                .draw_series(LineSeries::new(masked_points(&series.macd), &BLUE))?
                .label("macd")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
            chart
                .draw_series(LineSeries::new(masked_points(&series.macd_signal), &RED))?
                .label("signal")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
            chart.configure_series_labels().border_style(&BLACK).draw()?;
        }

        root.present()?;
        Ok(())
    };

    render().map_err(to_render_err)?;
    info!("Saved figure {}", path.display());
    Ok(())
}

fn masked_points(values: &[Option<f64>]) -> Vec<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
