//! Word-cloud rendering: a size-scaled grid of the most frequent terms.
//! Layout is computed separately from drawing so the scaling logic is
//! testable without a font backend.

use std::path::Path;

use eda_core::error::{EdaError, Result};
use plotters::prelude::*;
use tracing::info;

const CLOUD_SIZE: (u32, u32) = (1280, 720);
const MIN_FONT: f64 = 14.0;
const MAX_FONT: f64 = 64.0;
const COLUMNS: usize = 5;

/// One term placed on the grid, font size scaled by frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTerm {
    pub term: String,
    pub font_size: f64,
    pub x: i32,
    pub y: i32,
}

/// Scale a count into a font size, linear between the corpus min and max.
/// A constant-frequency cloud renders at the midpoint size.
fn scaled_font(count: usize, min_count: usize, max_count: usize) -> f64 {
    if max_count == min_count {
        return (MIN_FONT + MAX_FONT) / 2.0;
    }
    let t = (count - min_count) as f64 / (max_count - min_count) as f64;
    MIN_FONT + t * (MAX_FONT - MIN_FONT)
}

/// Arrange terms on a fixed-column grid inside `(width, height)`,
/// most frequent first.
pub fn layout_terms(terms: &[(String, usize)], width: u32, height: u32) -> Vec<PlacedTerm> {
    if terms.is_empty() {
        return Vec::new();
    }
    let min_count = terms.iter().map(|(_, c)| *c).min().unwrap_or(1);
    let max_count = terms.iter().map(|(_, c)| *c).max().unwrap_or(1);

    let rows = terms.len().div_ceil(COLUMNS);
    let cell_w = width as i32 / COLUMNS as i32;
    let cell_h = height as i32 / rows.max(1) as i32;

    terms
        .iter()
        .enumerate()
        .map(|(i, (term, count))| {
            let col = (i % COLUMNS) as i32;
            let row = (i / COLUMNS) as i32;
            PlacedTerm {
                term: term.clone(),
                font_size: scaled_font(*count, min_count, max_count),
                x: col * cell_w + cell_w / 8,
                y: row * cell_h + cell_h / 2,
            }
        })
        .collect()
}

/// Render the word cloud to `path`. An empty term list is a `Render`
/// error so the pipeline can warn and continue.
pub fn render_wordcloud(path: &Path, terms: &[(String, usize)]) -> Result<()> {
    if terms.is_empty() {
        return Err(EdaError::Render("no terms to render".to_string()));
    }
    let placed = layout_terms(terms, CLOUD_SIZE.0, CLOUD_SIZE.1);

    let render = || -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, CLOUD_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let palette = [BLUE, RED, GREEN, MAGENTA, CYAN];
        for (i, term) in placed.iter().enumerate() {
            let color = palette[i % palette.len()];
            root.draw(&Text::new(
                term.term.clone(),
                (term.x, term.y),
                ("sans-serif", term.font_size).into_font().color(&color),
            ))?;
        }

        root.present()?;
        Ok(())
    };

    render().map_err(|e| EdaError::Render(e.to_string()))?;
    info!("Saved word cloud {}", path.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    #[test]
    fn test_layout_empty_terms() {
        assert!(layout_terms(&[], 1280, 720).is_empty());
    }

    #[test]
    fn test_layout_scales_by_frequency() {
        let placed = layout_terms(&terms(&[("big", 100), ("mid", 50), ("small", 1)]), 1280, 720);
        assert_eq!(placed[0].font_size, MAX_FONT);
        assert_eq!(placed[2].font_size, MIN_FONT);
        assert!(placed[1].font_size > MIN_FONT && placed[1].font_size < MAX_FONT);
    }

    #[test]
    fn test_layout_constant_frequency_midpoint() {
        let placed = layout_terms(&terms(&[("a", 5), ("b", 5)]), 1280, 720);
        let mid = (MIN_FONT + MAX_FONT) / 2.0;
        assert!(placed.iter().all(|p| p.font_size == mid));
    }

    #[test]
    fn test_layout_positions_inside_canvas() {
        let pairs: Vec<(String, usize)> =
            (0..23).map(|i| (format!("term{i}"), i + 1)).collect();
        let placed = layout_terms(&pairs, 1280, 720);
        assert_eq!(placed.len(), 23);
        for p in &placed {
            assert!(p.x >= 0 && p.x < 1280);
            assert!(p.y >= 0 && p.y < 720);
        }
    }

    #[test]
    fn test_render_empty_is_render_error() {
        let err = render_wordcloud(Path::new("/tmp/unused.png"), &[]).unwrap_err();
        assert!(matches!(err, EdaError::Render(_)));
    }
}
