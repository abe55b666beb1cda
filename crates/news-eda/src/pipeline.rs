//! The batch pipeline: load, analyse, render. News-side analyses run
//! once; the technical and correlation studies run per ticker. A ticker
//! whose price CSV is missing or too short is skipped with a warning
//! rather than aborting the run.

use eda_analysis::correlation::{align_and_aggregate, correlate, SentimentScorer};
use eda_analysis::{descriptive, publisher, technical, text, time_series};
use eda_core::config::{AliasTable, EventCalendar};
use eda_core::error::EdaError;
use eda_core::models::NewsRecord;
use eda_core::settings::Settings;
use eda_core::stats;
use eda_core::time_utils::weekday_name;
use eda_data::{load_news, PriceDataset};
use eda_report::{charts, wordcloud};
use tracing::{info, warn};

pub fn run(settings: &Settings) -> anyhow::Result<()> {
    let aliases = AliasTable::load_or_default(settings.aliases.as_deref())?;
    let events = EventCalendar::load_or_default(settings.events.as_deref())?;

    let top_n = settings.top_n as usize;
    let min_df = settings.min_doc_freq as usize;
    let figures_dir = settings.out_dir.join("figures");
    let indicators_dir = settings.out_dir.join("indicators");

    // ── News side ──────────────────────────────────────────────────────────────

    let mut news = load_news(&settings.news)?;
    publisher::attach_domains(&mut news, &aliases);

    info!("Scoring sentiment for {} headlines", news.len());
    let scorer = SentimentScorer::new();
    scorer.score_records(&mut news);

    run_descriptive(&news, top_n);
    let daily = run_time_series(&news, &events, settings.window);
    run_text(&news, min_df, top_n);
    let domains = run_publisher(&news, &aliases, top_n);

    if !settings.no_figures {
        render_news_figures(settings, &figures_dir, &news, &daily, &domains, top_n)?;
    }

    // ── Price side ─────────────────────────────────────────────────────────────

    let dataset = PriceDataset::new(&settings.data_dir);
    let tickers = if settings.tickers.is_empty() {
        dataset.available_tickers()
    } else {
        settings.tickers.clone()
    };
    if tickers.is_empty() {
        warn!(
            "No price CSVs under {}; skipping technical and correlation analyses",
            settings.data_dir.display()
        );
    }

    for ticker in &tickers {
        if let Err(e) = run_ticker(settings, &dataset, &news, ticker, &indicators_dir, &figures_dir)
        {
            warn!("Skipping {ticker}: {e}");
        }
    }

    info!("Pipeline complete; reports under {}", settings.out_dir.display());
    Ok(())
}

// ── News analyses ─────────────────────────────────────────────────────────────

fn run_descriptive(news: &[NewsRecord], top_n: usize) {
    match descriptive::headline_length_stats(news) {
        Ok(stats) => info!(
            "Headline lengths: count={} mean={:.1} std={:.1} min={} q25={:.1} median={:.1} q75={:.1} max={}",
            stats.count, stats.mean, stats.std, stats.min, stats.q25, stats.median, stats.q75, stats.max
        ),
        Err(e) => warn!("Headline length stats unavailable: {e}"),
    }

    for (name, count) in descriptive::publisher_activity(news, top_n) {
        info!("Publisher {name}: {count} articles");
    }
}

fn run_time_series(
    news: &[NewsRecord],
    events: &EventCalendar,
    window: u32,
) -> Vec<(chrono::NaiveDate, usize)> {
    let daily = time_series::daily_counts(news);
    info!("{} distinct publication dates", daily.len());

    for (date, count) in time_series::top_spike_days(&daily, 5) {
        info!("Spike day {date}: {count} articles");
    }

    let hourly = time_series::hourly_pattern(news);
    if let Some(peak) = hourly.iter().enumerate().max_by_key(|(_, c)| **c) {
        info!("Peak publication hour (EST): {:02}:00 with {} articles", peak.0, peak.1);
    }

    for (weekday, count) in time_series::weekday_counts(news) {
        info!("{}: {count} articles", weekday_name(weekday));
    }
    info!(
        "Weekend share: {:.1}%",
        time_series::weekend_share(news) * 100.0
    );

    for event in time_series::event_day_volumes(news, events) {
        info!(
            "Event {} ({}): {} articles{}",
            event.date,
            event.label,
            event.volume,
            if event.high_impact { " [high impact]" } else { "" }
        );
    }

    daily
}

fn run_text(news: &[NewsRecord], min_df: usize, top_n: usize) {
    for (term, count) in text::top_keywords_and_phrases(news, min_df, top_n) {
        info!("Keyword/phrase '{term}': {count}");
    }
    for (term, count) in text::top_bigram_signals(news, min_df, top_n) {
        info!("Bigram '{term}': {count}");
    }
}

fn run_publisher(
    news: &[NewsRecord],
    aliases: &AliasTable,
    top_n: usize,
) -> Vec<(String, usize)> {
    let domains = publisher::top_domains(news, aliases, top_n);
    for (domain, count) in &domains {
        info!("Domain {domain}: {count} articles");
    }
    for s in publisher::content_comparison(news, aliases, top_n) {
        info!(
            "Domain {} content: {} headlines, mean len {:.1}, median {:.1}, std {:.1}",
            s.domain, s.count, s.mean_len, s.median_len, s.std_len
        );
    }
    domains
}

// ── Figures ───────────────────────────────────────────────────────────────────

fn render_news_figures(
    settings: &Settings,
    figures: &std::path::Path,
    news: &[NewsRecord],
    daily: &[(chrono::NaiveDate, usize)],
    domains: &[(String, usize)],
    top_n: usize,
) -> anyhow::Result<()> {
    let counts: Vec<f64> = daily.iter().map(|(_, c)| *c as f64).collect();
    let rolling = stats::rolling_mean(&counts, settings.window as usize);
    charts::daily_volume_chart(
        &figures.join("daily_volume.png"),
        daily,
        &rolling,
        settings.window,
    )?;

    charts::hourly_chart(
        &figures.join("hourly_pattern.png"),
        &time_series::hourly_pattern(news),
    )?;
    charts::weekday_chart(
        &figures.join("weekday_pattern.png"),
        &time_series::weekday_counts(news),
    )?;

    charts::ranking_chart(
        &figures.join("top_publishers.png"),
        "Most active publishers",
        &descriptive::publisher_activity(news, top_n),
    )?;
    charts::ranking_chart(
        &figures.join("top_domains.png"),
        "Most active publisher domains",
        domains,
    )?;

    let lengths: Vec<f64> = news.iter().map(|r| r.headline_len as f64).collect();
    charts::length_histogram(&figures.join("headline_lengths.png"), &lengths)?;

    // The word cloud is a nice-to-have; a render failure degrades the run
    // instead of aborting it.
    let terms = text::wordcloud_terms(news, 100);
    if let Err(e) = wordcloud::render_wordcloud(&figures.join("wordcloud.png"), &terms) {
        warn!("Word cloud skipped: {e}");
    }

    Ok(())
}

// ── Per-ticker analyses ───────────────────────────────────────────────────────

fn run_ticker(
    settings: &Settings,
    dataset: &PriceDataset,
    news: &[NewsRecord],
    ticker: &str,
    indicators_dir: &std::path::Path,
    figures_dir: &std::path::Path,
) -> eda_core::Result<()> {
    let bars = dataset.load(ticker)?;
    info!("{ticker}: {} price bars", bars.len());

    let summary = technical::summary_metrics(&bars, ticker)?;
    info!(
        "{ticker}: annualized return {:.2}%, volatility {:.2}%, max drawdown {:.2}%, avg volume {:.0}",
        summary.annualized_return * 100.0,
        summary.annualized_volatility * 100.0,
        summary.max_drawdown * 100.0,
        summary.avg_daily_volume
    );

    let indicators = technical::compute_indicators(&bars)?;
    if !settings.no_figures {
        charts::indicator_panel(
            &indicators_dir.join(format!("{ticker}_indicators.png")),
            ticker,
            &bars,
            &indicators,
        )?;
    }

    let aggregates = align_and_aggregate(news, &bars)?;
    match correlate(&aggregates) {
        Ok(correlation) => {
            info!(
                "{ticker}: sentiment correlation over {} aligned days: same-day r={:.4}, lagged r={:.4}",
                correlation.aligned_days, correlation.same_day, correlation.lagged
            );
            if !settings.no_figures {
                charts::sentiment_scatter(
                    &figures_dir.join(format!("{ticker}_sentiment_scatter.png")),
                    &aggregates,
                    &correlation,
                )?;
            }
        }
        Err(EdaError::InsufficientData { needed, got }) => {
            warn!("{ticker}: correlation skipped, {got} aligned days (need {needed})");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
