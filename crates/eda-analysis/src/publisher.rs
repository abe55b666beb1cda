//! Publisher analysis: domain extraction from publisher strings, frequency
//! ranking and a per-domain headline-length content comparison.

use std::collections::HashMap;
use std::sync::OnceLock;

use eda_core::config::AliasTable;
use eda_core::models::NewsRecord;
use eda_core::stats;
use regex::Regex;
use tracing::debug;

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@([A-Za-z0-9.-]+)").expect("regex is valid"))
}

// ── Domain extraction ─────────────────────────────────────────────────────────

/// Derive a domain from a publisher string.
///
/// E-mail-shaped strings yield the part after `@`, lowercased. Everything
/// else is lowercased and trimmed, then mapped through the alias table
/// when a canonical domain is known for it.
pub fn extract_domain(publisher: &str, aliases: &AliasTable) -> String {
    if let Some(captures) = email_pattern().captures(publisher) {
        return captures[1].to_lowercase().trim().to_string();
    }

    let name = publisher.trim().to_lowercase();
    match aliases.resolve(&name) {
        Some(domain) => domain.to_string(),
        None => name,
    }
}

/// Fill `NewsRecord::domain` in place for every record that lacks one.
pub fn attach_domains(records: &mut [NewsRecord], aliases: &AliasTable) {
    let mut attached = 0usize;
    for record in records.iter_mut() {
        if record.domain.is_none() {
            record.domain = Some(extract_domain(&record.publisher, aliases));
            attached += 1;
        }
    }
    debug!("Attached domains to {attached} records");
}

// ── Frequency ranking ─────────────────────────────────────────────────────────

/// Article counts per domain, descending; ties broken by name. Records
/// without an attached domain are resolved on the fly.
pub fn top_domains(
    records: &[NewsRecord],
    aliases: &AliasTable,
    top_n: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let domain = match &record.domain {
            Some(d) => d.clone(),
            None => extract_domain(&record.publisher, aliases),
        };
        *counts.entry(domain).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked
}

// ── Content comparison ────────────────────────────────────────────────────────

/// Headline-length profile of one domain, a cheap proxy for content style.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainContentStats {
    pub domain: String,
    pub count: usize,
    pub mean_len: f64,
    pub median_len: f64,
    pub std_len: f64,
}

/// Headline-length statistics for the `top_n_domains` busiest domains,
/// in descending article-count order.
pub fn content_comparison(
    records: &[NewsRecord],
    aliases: &AliasTable,
    top_n_domains: usize,
) -> Vec<DomainContentStats> {
    let top = top_domains(records, aliases, top_n_domains);

    top.into_iter()
        .map(|(domain, count)| {
            let mut lengths: Vec<f64> = records
                .iter()
                .filter(|r| match &r.domain {
                    Some(d) => *d == domain,
                    None => extract_domain(&r.publisher, aliases) == domain,
                })
                .map(|r| r.headline_len as f64)
                .collect();
            lengths.sort_by(|a, b| a.total_cmp(b));

            DomainContentStats {
                mean_len: stats::mean(&lengths).unwrap_or(0.0),
                median_len: stats::quantile_sorted(&lengths, 0.5).unwrap_or(0.0),
                std_len: stats::std_sample(&lengths).unwrap_or(0.0),
                domain,
                count,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
