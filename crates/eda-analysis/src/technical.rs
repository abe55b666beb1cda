//! Technical indicators over daily price bars and per-ticker summary
//! metrics. Indicator arithmetic is delegated to the `ta` crate; this
//! module handles warm-up masking and the derived summary statistics.

use eda_core::error::{EdaError, Result};
use eda_core::models::PriceBar;
use eda_core::stats;
use ta::indicators::{
    ExponentialMovingAverage, MovingAverageConvergenceDivergence, RelativeStrengthIndex,
    SimpleMovingAverage,
};
use ta::Next;
use tracing::debug;

const SMA_PERIOD: usize = 50;
const EMA_PERIOD: usize = 20;
const RSI_PERIOD: usize = 14;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

// ── Indicator series ──────────────────────────────────────────────────────────

/// Per-bar indicator values, index-aligned with the input series.
/// Warm-up positions are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub sma_50: Vec<Option<f64>>,
    pub ema_20: Vec<Option<f64>>,
    pub rsi_14: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
}

/// Compute SMA-50, EMA-20, RSI-14 and MACD(12, 26, 9) over the close
/// series. Values inside each indicator's warm-up window are masked to
/// `None`; the series must be non-empty.
pub fn compute_indicators(bars: &[PriceBar]) -> Result<IndicatorSeries> {
    if bars.is_empty() {
        return Err(EdaError::InsufficientData { needed: 1, got: 0 });
    }

    let mut sma = SimpleMovingAverage::new(SMA_PERIOD)
        .map_err(|e| EdaError::Config(format!("sma period: {e}")))?;
    let mut ema = ExponentialMovingAverage::new(EMA_PERIOD)
        .map_err(|e| EdaError::Config(format!("ema period: {e}")))?;
    let mut rsi = RelativeStrengthIndex::new(RSI_PERIOD)
        .map_err(|e| EdaError::Config(format!("rsi period: {e}")))?;
    let mut macd = MovingAverageConvergenceDivergence::default();

    let n = bars.len();
    let mut series = IndicatorSeries {
        sma_50: Vec::with_capacity(n),
        ema_20: Vec::with_capacity(n),
        rsi_14: Vec::with_capacity(n),
        macd: Vec::with_capacity(n),
        macd_signal: Vec::with_capacity(n),
    };

    for (i, bar) in bars.iter().enumerate() {
        let sma_v = sma.next(bar.close);
        let ema_v = ema.next(bar.close);
        let rsi_v = rsi.next(bar.close);
        let macd_v = macd.next(bar.close);

        series.sma_50.push((i + 1 >= SMA_PERIOD).then_some(sma_v));
        series.ema_20.push((i + 1 >= EMA_PERIOD).then_some(ema_v));
        series.rsi_14.push((i >= RSI_PERIOD).then_some(rsi_v));
        series.macd.push((i >= MACD_SLOW - 1).then_some(macd_v.macd));
        series
            .macd_signal
            .push((i >= MACD_SLOW - 1 + MACD_SIGNAL - 1).then_some(macd_v.signal));
    }

    debug!("Computed indicators over {n} bars");
    Ok(series)
}

// ── Summary metrics ───────────────────────────────────────────────────────────

/// Annualized performance summary for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSummary {
    pub ticker: String,
    pub bars: usize,
    /// `(1 + total_return)^(252/bars) - 1`, exponent over the bar count.
    pub annualized_return: f64,
    /// Population std of daily log returns, scaled by sqrt(252).
    pub annualized_volatility: f64,
    /// Largest peak-to-trough decline of the cumulative return curve,
    /// reported as a negative fraction (0 for a monotone rise).
    pub max_drawdown: f64,
    pub avg_daily_volume: f64,
}

/// Return / volatility / drawdown summary over the bar series.
/// Needs at least 2 bars for a return to exist.
pub fn summary_metrics(bars: &[PriceBar], ticker: &str) -> Result<TickerSummary> {
    if bars.len() < 2 {
        return Err(EdaError::InsufficientData {
            needed: 2,
            got: bars.len(),
        });
    }

    let log_returns: Vec<f64> = bars
        .windows(2)
        .map(|w| (w[1].close / w[0].close).ln())
        .collect();

    let total_return = bars[bars.len() - 1].close / bars[0].close - 1.0;
    let annualized_return = (1.0 + total_return).powf(252.0 / bars.len() as f64) - 1.0;
    let annualized_volatility =
        stats::std_population(&log_returns).unwrap_or(0.0) * 252.0_f64.sqrt();

    // Max drawdown via a running peak over the cumulative curve. The curve
    // compounds 1 + log_return, the pynance-style convention these metrics
    // are reported against.
    let mut cumulative = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut max_drawdown = 0.0_f64;
    for r in &log_returns {
        cumulative *= 1.0 + r;
        peak = peak.max(cumulative);
        max_drawdown = max_drawdown.min(cumulative / peak - 1.0);
    }

    let avg_daily_volume =
        bars.iter().map(|b| b.volume as f64).sum::<f64>() / bars.len() as f64;

    Ok(TickerSummary {
        ticker: ticker.to_string(),
        bars: bars.len(),
        annualized_return,
        annualized_volatility,
        max_drawdown,
        avg_daily_volume,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
