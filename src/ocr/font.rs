//! Average font size estimation from word layout data.

use super::backend::OcrWord;

/// Mean point size over every recognized symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontEstimate {
    /// Average point size.
    pub point_size: f64,
    /// Number of symbols the average was taken over.
    pub symbols: usize,
}

impl FontEstimate {
    /// Estimate the average symbol size.
    ///
    /// Each word contributes its point size once per non-empty symbol, so a
    /// long word at 12pt outweighs a short one at 20pt. Words without a
    /// reported size are skipped. Returns `None` when no symbol was measured.
    pub fn from_words(words: &[OcrWord]) -> Option<Self> {
        let mut total = 0.0;
        let mut symbols = 0usize;

        for word in words {
            let Some(size) = word.point_size.filter(|s| s.is_finite() && *s >= 0.0) else {
                continue;
            };
            let count = word.symbol_count();
            for symbol in word.text.chars().filter(|c| !c.is_whitespace()) {
                tracing::trace!("symbol {}, size {}", symbol, size);
            }
            total += size * count as f64;
            symbols += count;
        }

        if symbols == 0 {
            return None;
        }

        Some(Self {
            point_size: total / symbols as f64,
            symbols,
        })
    }

    /// Size rendered for a CSS rule, without trailing zeros (`12`, `11.5`).
    pub fn css_size(&self) -> String {
        let rounded = (self.point_size * 100.0).round() / 100.0;
        let text = format!("{:.2}", rounded);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }

    /// Size in DOCX half-points, rounded to the nearest half point.
    pub fn half_points(&self) -> usize {
        (self.point_size * 2.0).round() as usize
    }
}
