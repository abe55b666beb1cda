//! Headline text analysis: cleaning, n-gram frequency extraction and the
//! term weights fed to the word-cloud renderer.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use eda_core::models::NewsRecord;
use regex::Regex;

/// English stop-words removed before n-gram extraction. Tokens of length
/// two or less never survive cleaning, so short stop-words are omitted.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "has", "have",
    "her", "him", "his", "how", "its", "may", "new", "now", "our", "out", "she", "their", "them",
    "then", "there", "these", "they", "this", "those", "was", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "your", "about", "above",
    "after", "again", "against", "because", "been", "before", "being", "below", "between",
    "both", "could", "does", "doing", "down", "during", "each", "from", "further", "here",
    "into", "more", "most", "once", "only", "other", "over", "same", "should", "some", "such",
    "than", "that", "through", "under", "until", "very", "says", "said",
];

fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"http\S+").expect("regex is valid"))
}

fn non_alnum_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]").expect("regex is valid"))
}

// ── Cleaning ──────────────────────────────────────────────────────────────────

/// Normalise a headline for frequency analysis: lowercase, strip URLs,
/// replace non-alphanumerics with spaces and drop tokens of length <= 2.
pub fn clean_headline(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_urls = url_pattern().replace_all(&lowered, "");
    let alnum = non_alnum_pattern().replace_all(&no_urls, " ");
    alnum
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .collect::<Vec<_>>()
        .join(" ")
}

fn content_tokens(text: &str) -> Vec<String> {
    let cleaned = clean_headline(text);
    cleaned
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}

// ── N-gram frequencies ────────────────────────────────────────────────────────

/// Extract the `top_n` most frequent n-grams over `records`.
///
/// `ngram` is an inclusive `(lo, hi)` range of gram sizes; terms must
/// appear in at least `min_df` distinct headlines. Result is sorted by
/// total count descending, ties by term.
pub fn top_terms(
    records: &[NewsRecord],
    ngram: (usize, usize),
    min_df: usize,
    top_n: usize,
) -> Vec<(String, usize)> {
    let (lo, hi) = ngram;
    let mut totals: HashMap<String, usize> = HashMap::new();
    let mut doc_freq: HashMap<String, usize> = HashMap::new();

    for record in records {
        let tokens = content_tokens(&record.headline);
        let mut seen: HashSet<String> = HashSet::new();

        for n in lo.max(1)..=hi {
            if tokens.len() < n {
                continue;
            }
            for window in tokens.windows(n) {
                let term = window.join(" ");
                *totals.entry(term.clone()).or_insert(0) += 1;
                seen.insert(term);
            }
        }

        for term in seen {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = totals
        .into_iter()
        .filter(|(term, _)| doc_freq.get(term).copied().unwrap_or(0) >= min_df)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked
}

/// Combined unigram + bigram view of the most frequent terms.
pub fn top_keywords_and_phrases(
    records: &[NewsRecord],
    min_df: usize,
    top_n: usize,
) -> Vec<(String, usize)> {
    top_terms(records, (1, 2), min_df, top_n)
}

/// Bigrams only: isolates phrase signals like "price target".
pub fn top_bigram_signals(records: &[NewsRecord], min_df: usize, top_n: usize) -> Vec<(String, usize)> {
    top_terms(records, (2, 2), min_df, top_n)
}

/// Unigram weights for the word cloud; no document-frequency floor so a
/// small corpus still renders something.
pub fn wordcloud_terms(records: &[NewsRecord], top_n: usize) -> Vec<(String, usize)> {
    top_terms(records, (1, 1), 1, top_n)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
